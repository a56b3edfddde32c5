//! Stateless generation endpoints under `/api/enhanced`.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::Form;
use serde::Serialize;
use serde_json::Value;

use super::ApiClient;
use super::workspace::resume_part;
use crate::domain::entities::ScrapedJob;
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    BatchGenerateRequest, CoverLetterRequest, GenerationPort, InterviewPrepRequest, JobContext,
    LatexResumeRequest, QuickGenerateRequest, ResumeAnalysisRequest,
};

impl ApiClient {
    async fn post_enhanced<B: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        self.send_json(
            self.request(Method::POST, &format!("/api/enhanced/{endpoint}"))
                .json(body),
        )
        .await
    }
}

#[async_trait]
impl GenerationPort for ApiClient {
    async fn scrape_job(&self, url: &str) -> Result<ScrapedJob, ApiError> {
        self.send_json(
            self.request(Method::POST, "/api/enhanced/scrape-job")
                .json(&serde_json::json!({ "url": url })),
        )
        .await
    }

    async fn quick_generate(&self, request: &QuickGenerateRequest) -> Result<Value, ApiError> {
        self.post_enhanced("quick-generate", request).await
    }

    async fn quick_email(&self, request: &QuickGenerateRequest) -> Result<Value, ApiError> {
        self.post_enhanced("quick-email", request).await
    }

    async fn cover_letter(&self, request: &CoverLetterRequest) -> Result<Value, ApiError> {
        self.post_enhanced("cover-letter", request).await
    }

    async fn analyze_resume(&self, request: &ResumeAnalysisRequest) -> Result<Value, ApiError> {
        self.post_enhanced("analyze-resume", request).await
    }

    async fn ats_score(&self, request: &ResumeAnalysisRequest) -> Result<Value, ApiError> {
        self.post_enhanced("ats-score", request).await
    }

    async fn latex_resume(&self, request: &LatexResumeRequest) -> Result<Value, ApiError> {
        self.post_enhanced("latex-resume", request).await
    }

    async fn interview_prep(&self, request: &InterviewPrepRequest) -> Result<Value, ApiError> {
        self.post_enhanced("interview-prep", request).await
    }

    async fn upload_and_analyze(
        &self,
        path: &Path,
        job: &JobContext,
    ) -> Result<Value, ApiError> {
        let mut form = Form::new().part("file", resume_part(path).await?);

        for (name, value) in [
            ("job_description", &job.job_description),
            ("job_title", &job.job_title),
            ("company_name", &job.company_name),
        ] {
            if !value.is_empty() {
                form = form.text(name, value.clone());
            }
        }

        self.send_json(
            self.request(Method::POST, "/api/enhanced/upload-and-analyze")
                .multipart(form),
        )
        .await
    }

    async fn batch_generate(&self, request: &BatchGenerateRequest) -> Result<Value, ApiError> {
        if request.jobs.is_empty() {
            return Err(ApiError::invalid_input("batch needs at least one job"));
        }
        self.post_enhanced("batch-generate", request).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{body_json, body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::ports::{BatchKind, GenerationOptions};
    use crate::domain::session_channel;
    use crate::infrastructure::storage::MemoryTokenStorage;

    fn client(server: &MockServer) -> ApiClient {
        let (tx, _rx) = session_channel();
        ApiClient::new(server.uri(), Arc::new(MemoryTokenStorage::new()), tx).unwrap()
    }

    #[tokio::test]
    async fn test_scrape_job() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/enhanced/scrape-job"))
            .and(body_json(serde_json::json!({"url": "https://jobs.example.com/42"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "source": "generic",
                "url": "https://jobs.example.com/42",
                "company_name": "Acme",
                "job_title": "Engineer",
                "location": "",
                "job_description": "Build rockets",
                "job_type": "",
                "salary": "",
                "experience_level": ""
            })))
            .expect(1)
            .mount(&server)
            .await;

        let job = client(&server)
            .scrape_job("https://jobs.example.com/42")
            .await
            .unwrap();

        assert_eq!(job.company_name, "Acme");
    }

    #[tokio::test]
    async fn test_quick_generate_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/enhanced/quick-generate"))
            .and(body_partial_json(serde_json::json!({
                "resume_content": "resume",
                "company_name": "Acme",
                "options": {"generate_email": true}
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"email": {"subject": "Hi"}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let request = QuickGenerateRequest {
            resume_content: "resume".to_string(),
            job: JobContext::new("Acme", "Engineer", "Build"),
            options: GenerationOptions {
                generate_email: Some(true),
                ..GenerationOptions::default()
            },
        };

        let result = client(&server).quick_generate(&request).await.unwrap();

        assert_eq!(result["email"]["subject"], "Hi");
    }

    #[tokio::test]
    async fn test_generation_failure_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/enhanced/ats-score"))
            .respond_with(ResponseTemplate::new(500).set_body_json(
                serde_json::json!({"detail": "ATS scoring failed: model overloaded"}),
            ))
            .mount(&server)
            .await;

        let request = ResumeAnalysisRequest {
            resume_content: "resume".to_string(),
            job: JobContext::default(),
        };

        let err = client(&server).ats_score(&request).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message("fallback"), "ATS scoring failed: model overloaded");
    }

    #[tokio::test]
    async fn test_upload_and_analyze_skips_empty_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/enhanced/upload-and-analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cv.txt");
        std::fs::write(&file, "Rust engineer with ten years of experience").unwrap();

        client(&server)
            .upload_and_analyze(&file, &JobContext::new("", "Engineer", ""))
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains("name=\"job_title\""));
        assert!(!body.contains("name=\"company_name\""));
        assert!(!body.contains("name=\"job_description\""));
    }

    #[tokio::test]
    async fn test_empty_batch_rejected_locally() {
        let server = MockServer::start().await;
        let request = BatchGenerateRequest {
            resume_content: "resume".to_string(),
            jobs: Vec::new(),
            generate_type: BatchKind::Both,
        };

        let err = client(&server).batch_generate(&request).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidInput { .. }));
    }
}
