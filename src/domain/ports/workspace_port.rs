//! Workspace port for saved resumes, jobs and generated emails.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::entities::{
    EmailId, EmailRequest, GeneratedEmail, Job, JobDraft, JobId, Resume, ResumeId, UsageStats,
};
use crate::domain::errors::ApiError;

/// Offset pagination for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Records to skip.
    pub skip: u32,
    /// Maximum records returned.
    pub limit: u32,
}

impl Page {
    /// Backend default page size.
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Creates a page.
    #[must_use]
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }

    /// Query pairs appended to list requests.
    #[must_use]
    pub fn query(&self) -> [(&'static str, u32); 2] {
        [("skip", self.skip), ("limit", self.limit)]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }
}

/// Port for the CRUD endpoints behind the dashboard.
#[async_trait]
pub trait WorkspacePort: Send + Sync {
    /// Uploads a resume file for text extraction.
    async fn upload_resume(&self, path: &Path) -> Result<Resume, ApiError>;

    /// Lists the user's resumes.
    async fn list_resumes(&self, page: Page) -> Result<Vec<Resume>, ApiError>;

    /// Fetches one resume.
    async fn get_resume(&self, id: ResumeId) -> Result<Resume, ApiError>;

    /// Deletes a resume.
    async fn delete_resume(&self, id: ResumeId) -> Result<(), ApiError>;

    /// Saves a job posting.
    async fn create_job(&self, draft: &JobDraft) -> Result<Job, ApiError>;

    /// Lists saved jobs.
    async fn list_jobs(&self, page: Page) -> Result<Vec<Job>, ApiError>;

    /// Fetches one job.
    async fn get_job(&self, id: JobId) -> Result<Job, ApiError>;

    /// Replaces a job's fields.
    async fn update_job(&self, id: JobId, draft: &JobDraft) -> Result<Job, ApiError>;

    /// Deletes a job.
    async fn delete_job(&self, id: JobId) -> Result<(), ApiError>;

    /// Generates and stores a cold email.
    async fn generate_email(&self, request: &EmailRequest) -> Result<GeneratedEmail, ApiError>;

    /// Lists generated emails.
    async fn list_emails(&self, page: Page) -> Result<Vec<GeneratedEmail>, ApiError>;

    /// Fetches one email.
    async fn get_email(&self, id: EmailId) -> Result<GeneratedEmail, ApiError>;

    /// Deletes an email.
    async fn delete_email(&self, id: EmailId) -> Result<(), ApiError>;

    /// Returns the user's usage totals.
    async fn usage_stats(&self) -> Result<UsageStats, ApiError>;
}
