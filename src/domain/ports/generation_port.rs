//! Generation port for the stateless "enhanced" endpoints.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::ScrapedJob;
use crate::domain::errors::ApiError;

/// Job the generated material targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobContext {
    /// Hiring company.
    pub company_name: String,
    /// Position title.
    pub job_title: String,
    /// Posting text.
    pub job_description: String,
}

impl JobContext {
    /// Creates a job context.
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
        }
    }
}

/// Switches and tones for `quick-generate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationOptions {
    /// Include a cold email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_email: Option<bool>,
    /// Include a cover letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_cover_letter: Option<bool>,
    /// Include a resume analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyze_resume: Option<bool>,
    /// Include a LaTeX resume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_latex: Option<bool>,
    /// Include interview preparation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_interview_prep: Option<bool>,
    /// Email tone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_tone: Option<String>,
    /// Email length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_length: Option<String>,
    /// Cover letter tone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter_tone: Option<String>,
    /// LaTeX template style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latex_template: Option<String>,
}

/// Body shared by `quick-generate` and `quick-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickGenerateRequest {
    /// Resume text.
    pub resume_content: String,
    /// Target job.
    #[serde(flatten)]
    pub job: JobContext,
    /// Which materials to produce.
    pub options: GenerationOptions,
}

/// Body for `cover-letter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverLetterRequest {
    /// Resume text.
    pub resume_content: String,
    /// Target job.
    #[serde(flatten)]
    pub job: JobContext,
    /// Letter tone.
    pub tone: String,
    /// Mention salary expectations.
    pub include_salary_expectation: bool,
    /// Points the letter must cover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_points: Option<Vec<String>>,
}

/// Body shared by `analyze-resume` and `ats-score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeAnalysisRequest {
    /// Resume text.
    pub resume_content: String,
    /// Job to score against.
    #[serde(flatten)]
    pub job: JobContext,
}

/// Body for `latex-resume`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatexResumeRequest {
    /// Resume text.
    pub resume_content: String,
    /// Posting to tailor toward.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    /// Template name.
    pub template_style: String,
    /// Skills to highlight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emphasis_skills: Option<Vec<String>>,
}

/// Body for `interview-prep`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewPrepRequest {
    /// Resume text.
    pub resume_content: String,
    /// Target job.
    #[serde(flatten)]
    pub job: JobContext,
    /// Question categories to cover.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_types: Option<Vec<String>>,
}

/// What `batch-generate` produces per job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum BatchKind {
    /// One cold email per job.
    #[default]
    Email,
    /// One cover letter per job.
    CoverLetter,
    /// Email and cover letter per job.
    Both,
}

/// Body for `batch-generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchGenerateRequest {
    /// Resume text.
    pub resume_content: String,
    /// Jobs to generate for, at most [`Self::MAX_JOBS`].
    pub jobs: Vec<JobContext>,
    /// What to produce per job.
    pub generate_type: BatchKind,
}

impl BatchGenerateRequest {
    /// The backend processes at most this many jobs per batch.
    pub const MAX_JOBS: usize = 10;
}

/// Port for generation endpoints; results are passed through untyped.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Extracts job details from a posting URL.
    async fn scrape_job(&self, url: &str) -> Result<ScrapedJob, ApiError>;

    /// Produces the selected materials in one call.
    async fn quick_generate(&self, request: &QuickGenerateRequest) -> Result<Value, ApiError>;

    /// Produces a cold email without storing it.
    async fn quick_email(&self, request: &QuickGenerateRequest) -> Result<Value, ApiError>;

    /// Writes a cover letter.
    async fn cover_letter(&self, request: &CoverLetterRequest) -> Result<Value, ApiError>;

    /// Reviews a resume against a job.
    async fn analyze_resume(&self, request: &ResumeAnalysisRequest) -> Result<Value, ApiError>;

    /// Scores a resume for applicant tracking systems.
    async fn ats_score(&self, request: &ResumeAnalysisRequest) -> Result<Value, ApiError>;

    /// Renders the resume as LaTeX.
    async fn latex_resume(&self, request: &LatexResumeRequest) -> Result<Value, ApiError>;

    /// Prepares likely interview questions.
    async fn interview_prep(&self, request: &InterviewPrepRequest) -> Result<Value, ApiError>;

    /// Uploads a resume file and analyses it against an optional job.
    async fn upload_and_analyze(&self, path: &Path, job: &JobContext)
    -> Result<Value, ApiError>;

    /// Generates materials for several jobs at once.
    async fn batch_generate(&self, request: &BatchGenerateRequest) -> Result<Value, ApiError>;
}
