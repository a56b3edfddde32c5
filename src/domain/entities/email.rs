//! Generated cold email records and usage totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::utc_timestamp;

use super::{JobId, ResumeId};

/// Backend email identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(pub i64);

impl std::fmt::Display for EmailId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cold email produced for a resume and job pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedEmail {
    /// Email id.
    pub id: EmailId,
    /// Subject line.
    pub subject: String,
    /// Email body.
    pub body: String,
    /// Generation metadata, JSON encoded.
    #[serde(default)]
    pub metadata: Option<String>,
    /// Generation time.
    #[serde(with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /api/emails/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    /// Resume to write from.
    pub resume_id: ResumeId,
    /// Job to target.
    pub job_id: JobId,
    /// Writing tone, `professional` by default.
    pub tone: String,
    /// Target length, `medium` by default.
    pub length: String,
}

impl EmailRequest {
    /// Creates a request with the default tone and length.
    #[must_use]
    pub fn new(resume_id: ResumeId, job_id: JobId) -> Self {
        Self {
            resume_id,
            job_id,
            tone: "professional".to_string(),
            length: "medium".to_string(),
        }
    }

    /// Overrides the tone.
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Overrides the length.
    #[must_use]
    pub fn with_length(mut self, length: impl Into<String>) -> Self {
        self.length = length.into();
        self
    }
}

/// Per-user usage totals from `GET /api/emails/usage/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Emails generated.
    pub total_emails_generated: u64,
    /// Resumes uploaded.
    pub total_resumes_uploaded: u64,
    /// Jobs saved.
    pub total_jobs_added: u64,
    /// Model tokens consumed.
    pub total_tokens_used: u64,
    /// Accumulated model cost in USD.
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_request_defaults() {
        let body = serde_json::to_value(EmailRequest::new(ResumeId(1), JobId(2))).unwrap();

        assert_eq!(body["resume_id"], 1);
        assert_eq!(body["job_id"], 2);
        assert_eq!(body["tone"], "professional");
        assert_eq!(body["length"], "medium");
    }
}
