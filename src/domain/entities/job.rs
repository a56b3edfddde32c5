//! Job posting records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::utc_timestamp;

/// Backend job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub i64);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Saved job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job id.
    pub id: JobId,
    /// Owning user.
    pub user_id: i64,
    /// Hiring company.
    pub company_name: String,
    /// Position title.
    pub job_title: String,
    /// Full posting text.
    pub job_description: String,
    /// Original posting URL.
    #[serde(default)]
    pub job_url: Option<String>,
    /// Backend analysis, JSON encoded.
    #[serde(default)]
    pub parsed_data: Option<String>,
    /// Creation time.
    #[serde(with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(with = "utc_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    /// Hiring company.
    pub company_name: String,
    /// Position title.
    pub job_title: String,
    /// Full posting text.
    pub job_description: String,
    /// Original posting URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
}

impl JobDraft {
    /// Creates a draft without a URL.
    #[must_use]
    pub fn new(
        company_name: impl Into<String>,
        job_title: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Self {
        Self {
            company_name: company_name.into(),
            job_title: job_title.into(),
            job_description: job_description.into(),
            job_url: None,
        }
    }

    /// Sets the posting URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.job_url = Some(url.into());
        self
    }
}

/// Job details extracted from a posting URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedJob {
    /// Job board the posting came from.
    pub source: String,
    /// Scraped URL.
    pub url: String,
    /// Hiring company.
    pub company_name: String,
    /// Position title.
    pub job_title: String,
    /// Office location, if listed.
    #[serde(default)]
    pub location: Option<String>,
    /// Extracted posting text.
    pub job_description: String,
    /// Employment type such as full-time.
    #[serde(default)]
    pub job_type: Option<String>,
    /// Salary range as written in the posting.
    #[serde(default)]
    pub salary: Option<String>,
    /// Seniority, if listed.
    #[serde(default)]
    pub experience_level: Option<String>,
}

impl From<ScrapedJob> for JobDraft {
    fn from(job: ScrapedJob) -> Self {
        Self::new(job.company_name, job.job_title, job.job_description).with_url(job.url)
    }
}
