//! Resume, job and email endpoints.

use std::path::Path;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::ApiClient;
use crate::domain::entities::{
    EmailId, EmailRequest, GeneratedEmail, Job, JobDraft, JobId, Resume, ResumeId, UsageStats,
    is_supported_resume,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{Page, WorkspacePort};

/// Reads a resume file into a multipart part, rejecting unsupported types locally.
pub(crate) async fn resume_part(path: &Path) -> Result<Part, ApiError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ApiError::invalid_input(format!("not a file: {}", path.display())))?
        .to_string();

    if !is_supported_resume(&file_name) {
        return Err(ApiError::invalid_input(
            "File type not supported. Allowed: .pdf, .txt, .doc, .docx",
        ));
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| ApiError::invalid_input(format!("cannot read {}: {e}", path.display())))?;

    debug!(file = %file_name, size = bytes.len(), "Prepared resume upload");
    Ok(Part::bytes(bytes).file_name(file_name))
}

#[async_trait]
impl WorkspacePort for ApiClient {
    async fn upload_resume(&self, path: &Path) -> Result<Resume, ApiError> {
        let form = Form::new().part("file", resume_part(path).await?);

        self.send_json(self.request(Method::POST, "/api/resumes/upload").multipart(form))
            .await
    }

    async fn list_resumes(&self, page: Page) -> Result<Vec<Resume>, ApiError> {
        self.send_json(self.request(Method::GET, "/api/resumes").query(&page.query()))
            .await
    }

    async fn get_resume(&self, id: ResumeId) -> Result<Resume, ApiError> {
        self.send_json(self.request(Method::GET, &format!("/api/resumes/{id}")))
            .await
    }

    async fn delete_resume(&self, id: ResumeId) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/resumes/{id}")))
            .await
    }

    async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError> {
        self.send_json(self.request(Method::POST, "/api/jobs").json(draft))
            .await
    }

    async fn list_jobs(&self, page: Page) -> Result<Vec<Job>, ApiError> {
        self.send_json(self.request(Method::GET, "/api/jobs").query(&page.query()))
            .await
    }

    async fn get_job(&self, id: JobId) -> Result<Job, ApiError> {
        self.send_json(self.request(Method::GET, &format!("/api/jobs/{id}")))
            .await
    }

    async fn update_job(&self, id: JobId, draft: &JobDraft) -> Result<Job, ApiError> {
        self.send_json(
            self.request(Method::PUT, &format!("/api/jobs/{id}"))
                .json(draft),
        )
        .await
    }

    async fn delete_job(&self, id: JobId) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/jobs/{id}")))
            .await
    }

    async fn generate_email(&self, request: &EmailRequest) -> Result<GeneratedEmail, ApiError> {
        self.send_json(
            self.request(Method::POST, "/api/emails/generate")
                .json(request),
        )
        .await
    }

    async fn list_emails(&self, page: Page) -> Result<Vec<GeneratedEmail>, ApiError> {
        self.send_json(self.request(Method::GET, "/api/emails").query(&page.query()))
            .await
    }

    async fn get_email(&self, id: EmailId) -> Result<GeneratedEmail, ApiError> {
        self.send_json(self.request(Method::GET, &format!("/api/emails/{id}")))
            .await
    }

    async fn delete_email(&self, id: EmailId) -> Result<(), ApiError> {
        self.send_empty(self.request(Method::DELETE, &format!("/api/emails/{id}")))
            .await
    }

    async fn usage_stats(&self) -> Result<UsageStats, ApiError> {
        self.send_json(self.request(Method::GET, "/api/emails/usage/stats"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::domain::session_channel;
    use crate::infrastructure::storage::MemoryTokenStorage;

    fn client(server: &MockServer) -> ApiClient {
        let (tx, _rx) = session_channel();
        ApiClient::new(server.uri(), Arc::new(MemoryTokenStorage::new()), tx).unwrap()
    }

    fn job_json(id: i64) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "user_id": 1,
            "company_name": "Acme",
            "job_title": "Engineer",
            "job_description": "Build rockets",
            "job_url": null,
            "parsed_data": null,
            "created_at": "2024-03-01T12:00:00.000001",
            "updated_at": "2024-03-02T08:00:00"
        })
    }

    #[tokio::test]
    async fn test_list_jobs_passes_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/jobs"))
            .and(query_param("skip", "20"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([job_json(1)])))
            .expect(1)
            .mount(&server)
            .await;

        let jobs = client(&server).list_jobs(Page::new(20, 5)).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company_name, "Acme");
    }

    #[tokio::test]
    async fn test_update_job_uses_put() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/jobs/4"))
            .and(body_json(serde_json::json!({
                "company_name": "Acme",
                "job_title": "Engineer",
                "job_description": "Build rockets"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_json(4)))
            .expect(1)
            .mount(&server)
            .await;

        let job = client(&server)
            .update_job(JobId(4), &JobDraft::new("Acme", "Engineer", "Build rockets"))
            .await
            .unwrap();

        assert_eq!(job.id, JobId(4));
    }

    #[tokio::test]
    async fn test_delete_resume_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/resumes/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Resume deleted successfully"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        client(&server).delete_resume(ResumeId(2)).await.unwrap();
    }

    #[tokio::test]
    async fn test_unsupported_upload_never_hits_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("photo.png");
        std::fs::write(&file, b"png").unwrap();

        let err = client(&server).upload_resume(&file).await.unwrap_err();

        assert!(matches!(err, ApiError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_upload_resume_sends_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/resumes/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 11,
                "user_id": 1,
                "filename": "cv.txt",
                "content": "Rust engineer",
                "parsed_data": null,
                "created_at": "2024-03-01T12:00:00",
                "updated_at": "2024-03-01T12:00:00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("cv.txt");
        std::fs::write(&file, "Rust engineer").unwrap();

        let resume = client(&server).upload_resume(&file).await.unwrap();

        assert_eq!(resume.id, ResumeId(11));
        let requests = server.received_requests().await.unwrap();
        let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
        assert!(String::from_utf8_lossy(&requests[0].body).contains("filename=\"cv.txt\""));
    }

    #[tokio::test]
    async fn test_usage_stats() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/emails/usage/stats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_emails_generated": 3,
                "total_resumes_uploaded": 1,
                "total_jobs_added": 2,
                "total_tokens_used": 1500,
                "total_cost": 0.03
            })))
            .mount(&server)
            .await;

        let stats = client(&server).usage_stats().await.unwrap();

        assert_eq!(stats.total_emails_generated, 3);
        assert_eq!(stats.total_tokens_used, 1500);
    }
}
