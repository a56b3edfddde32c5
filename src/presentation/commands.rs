//! Workspace and generation commands.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::application::NotificationManager;
use crate::domain::entities::{EmailId, EmailRequest, JobDraft, JobId, ResumeId};
use crate::domain::errors::ApiError;
use crate::domain::ports::{
    BatchGenerateRequest, CoverLetterRequest, GenerationOptions, GenerationPort,
    InterviewPrepRequest, JobContext, LatexResumeRequest, Page, QuickGenerateRequest,
    ResumeAnalysisRequest, WorkspacePort,
};
use crate::infrastructure::config::args::{
    EmailCommand, GenerateCommand, JobCommand, JobFields, MaterialArgs, PageArgs, ResumeCommand,
};

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::decode(e.to_string()))
}

impl From<PageArgs> for Page {
    fn from(args: PageArgs) -> Self {
        Self::new(args.skip, args.limit)
    }
}

/// Reads a text argument, treating `@path` as a file reference.
async fn text_arg(value: &str) -> Result<String, ApiError> {
    match value.strip_prefix('@') {
        Some(path) => read_text(Path::new(path)).await,
        None => Ok(value.to_string()),
    }
}

async fn read_text(path: &Path) -> Result<String, ApiError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ApiError::invalid_input(format!("cannot read {}: {e}", path.display())))
}

/// Runs dashboard commands against the backend ports.
pub struct CommandRunner {
    workspace: Arc<dyn WorkspacePort>,
    generation: Arc<dyn GenerationPort>,
}

impl CommandRunner {
    /// Creates a runner over the workspace and generation ports.
    #[must_use]
    pub fn new(workspace: Arc<dyn WorkspacePort>, generation: Arc<dyn GenerationPort>) -> Self {
        Self {
            workspace,
            generation,
        }
    }

    /// Runs a `resumes` subcommand.
    ///
    /// # Errors
    /// Returns error if the backend rejects the request or a local file is unusable.
    pub async fn resumes(
        &self,
        command: ResumeCommand,
        notifications: &mut NotificationManager,
    ) -> Result<Value, ApiError> {
        match command {
            ResumeCommand::List(page) => to_json(&self.workspace.list_resumes(page.into()).await?),
            ResumeCommand::Upload { path } => {
                let resume = self.workspace.upload_resume(&path).await?;
                notifications.success("Resume uploaded", resume.filename.clone());
                to_json(&resume)
            }
            ResumeCommand::Show { id } => to_json(&self.workspace.get_resume(ResumeId(id)).await?),
            ResumeCommand::Delete { id } => {
                self.workspace.delete_resume(ResumeId(id)).await?;
                notifications.success("Resume deleted", format!("#{id}"));
                Ok(json!({ "deleted": id }))
            }
        }
    }

    /// Runs a `jobs` subcommand.
    ///
    /// # Errors
    /// Returns error if the backend rejects the request or a local file is unusable.
    pub async fn jobs(
        &self,
        command: JobCommand,
        notifications: &mut NotificationManager,
    ) -> Result<Value, ApiError> {
        match command {
            JobCommand::List(page) => to_json(&self.workspace.list_jobs(page.into()).await?),
            JobCommand::Add(fields) => {
                let job = self.workspace.create_job(&job_draft(&fields).await?).await?;
                notifications.success("Job saved", format!("{} at {}", job.job_title, job.company_name));
                to_json(&job)
            }
            JobCommand::Show { id } => to_json(&self.workspace.get_job(JobId(id)).await?),
            JobCommand::Update { id, fields } => {
                let job = self
                    .workspace
                    .update_job(JobId(id), &job_draft(&fields).await?)
                    .await?;
                notifications.success("Job updated", format!("#{id}"));
                to_json(&job)
            }
            JobCommand::Delete { id } => {
                self.workspace.delete_job(JobId(id)).await?;
                notifications.success("Job deleted", format!("#{id}"));
                Ok(json!({ "deleted": id }))
            }
            JobCommand::Scrape { url, save } => {
                let scraped = self.generation.scrape_job(&url).await?;
                if !save {
                    return to_json(&scraped);
                }
                let job = self.workspace.create_job(&JobDraft::from(scraped)).await?;
                notifications.success("Job saved", format!("{} at {}", job.job_title, job.company_name));
                to_json(&job)
            }
        }
    }

    /// Runs an `emails` subcommand.
    ///
    /// # Errors
    /// Returns error if the backend rejects the request.
    pub async fn emails(
        &self,
        command: EmailCommand,
        notifications: &mut NotificationManager,
    ) -> Result<Value, ApiError> {
        match command {
            EmailCommand::Generate {
                resume_id,
                job_id,
                tone,
                length,
            } => {
                let request = EmailRequest::new(ResumeId(resume_id), JobId(job_id))
                    .with_tone(tone)
                    .with_length(length);
                let email = self.workspace.generate_email(&request).await?;
                notifications.success("Email generated", email.subject.clone());
                to_json(&email)
            }
            EmailCommand::List(page) => to_json(&self.workspace.list_emails(page.into()).await?),
            EmailCommand::Show { id } => to_json(&self.workspace.get_email(EmailId(id)).await?),
            EmailCommand::Delete { id } => {
                self.workspace.delete_email(EmailId(id)).await?;
                notifications.success("Email deleted", format!("#{id}"));
                Ok(json!({ "deleted": id }))
            }
            EmailCommand::Stats => to_json(&self.workspace.usage_stats().await?),
        }
    }

    /// Runs a `generate` subcommand.
    ///
    /// # Errors
    /// Returns error if the backend rejects the request or a local file is unusable.
    pub async fn generate(
        &self,
        command: GenerateCommand,
        notifications: &mut NotificationManager,
    ) -> Result<Value, ApiError> {
        let result = match command {
            GenerateCommand::Quick {
                material,
                email_tone,
                email_length,
                cover_letter_tone,
                latex,
                interview,
            } => {
                let (resume_content, job) = self.material(&material).await?;
                let request = QuickGenerateRequest {
                    resume_content,
                    job,
                    options: GenerationOptions {
                        generate_email: Some(true),
                        generate_cover_letter: Some(true),
                        analyze_resume: Some(true),
                        generate_latex: Some(latex),
                        generate_interview_prep: Some(interview),
                        email_tone: Some(email_tone),
                        email_length: Some(email_length),
                        cover_letter_tone: Some(cover_letter_tone),
                        latex_template: None,
                    },
                };
                self.generation.quick_generate(&request).await?
            }
            GenerateCommand::Email {
                material,
                tone,
                length,
            } => {
                let (resume_content, job) = self.material(&material).await?;
                let request = QuickGenerateRequest {
                    resume_content,
                    job,
                    options: GenerationOptions {
                        email_tone: Some(tone),
                        email_length: Some(length),
                        ..GenerationOptions::default()
                    },
                };
                self.generation.quick_email(&request).await?
            }
            GenerateCommand::CoverLetter {
                material,
                tone,
                include_salary,
                points,
            } => {
                let (resume_content, job) = self.material(&material).await?;
                let request = CoverLetterRequest {
                    resume_content,
                    job,
                    tone,
                    include_salary_expectation: include_salary,
                    custom_points: (!points.is_empty()).then_some(points),
                };
                self.generation.cover_letter(&request).await?
            }
            GenerateCommand::Analyze { material } => {
                let (resume_content, job) = self.material(&material).await?;
                self.generation
                    .analyze_resume(&ResumeAnalysisRequest { resume_content, job })
                    .await?
            }
            GenerateCommand::Ats { material } => {
                let (resume_content, job) = self.material(&material).await?;
                self.generation
                    .ats_score(&ResumeAnalysisRequest { resume_content, job })
                    .await?
            }
            GenerateCommand::Latex {
                material,
                template,
                skills,
            } => {
                let (resume_content, job) = self.material(&material).await?;
                let request = LatexResumeRequest {
                    resume_content,
                    job_description: Some(job.job_description)
                        .filter(|description| !description.is_empty()),
                    template_style: template,
                    emphasis_skills: (!skills.is_empty()).then_some(skills),
                };
                self.generation.latex_resume(&request).await?
            }
            GenerateCommand::Interview {
                material,
                question_types,
            } => {
                let (resume_content, job) = self.material(&material).await?;
                let request = InterviewPrepRequest {
                    resume_content,
                    job,
                    question_types: (!question_types.is_empty()).then_some(question_types),
                };
                self.generation.interview_prep(&request).await?
            }
            GenerateCommand::UploadAnalyze {
                path,
                description,
                company,
                title,
            } => {
                let job = JobContext::new(company, title, text_arg(&description).await?);
                self.generation.upload_and_analyze(&path, &job).await?
            }
            GenerateCommand::Batch { resume, jobs, kind } => {
                let resume_content = read_text(&resume).await?;
                let mut jobs: Vec<JobContext> = serde_json::from_str(&read_text(&jobs).await?)
                    .map_err(|e| ApiError::invalid_input(format!("invalid jobs file: {e}")))?;

                if jobs.len() > BatchGenerateRequest::MAX_JOBS {
                    warn!(count = jobs.len(), "Batch too large, truncating");
                    notifications.warn(
                        "Batch truncated",
                        format!(
                            "Only the first {} jobs are processed",
                            BatchGenerateRequest::MAX_JOBS
                        ),
                    );
                    jobs.truncate(BatchGenerateRequest::MAX_JOBS);
                }

                let request = BatchGenerateRequest {
                    resume_content,
                    jobs,
                    generate_type: kind,
                };
                self.generation.batch_generate(&request).await?
            }
        };

        notifications.success("Generation complete", "");
        Ok(result)
    }

    /// Loads resume text and the targeted job, scraping the posting when a URL is given.
    async fn material(&self, args: &MaterialArgs) -> Result<(String, JobContext), ApiError> {
        let resume_content = read_text(&args.resume).await?;

        let mut job = JobContext::new(
            args.company.clone(),
            args.title.clone(),
            text_arg(&args.description).await?,
        );

        if let Some(url) = &args.job_url {
            let scraped = self.generation.scrape_job(url).await?;
            debug!(source = %scraped.source, "Filling job fields from scraped posting");
            if job.company_name.is_empty() {
                job.company_name = scraped.company_name;
            }
            if job.job_title.is_empty() {
                job.job_title = scraped.job_title;
            }
            if job.job_description.is_empty() {
                job.job_description = scraped.job_description;
            }
        }

        Ok((resume_content, job))
    }
}

async fn job_draft(fields: &JobFields) -> Result<JobDraft, ApiError> {
    let draft = JobDraft::new(
        fields.company.clone(),
        fields.title.clone(),
        text_arg(&fields.description).await?,
    );
    Ok(match &fields.url {
        Some(url) => draft.with_url(url.clone()),
        None => draft,
    })
}
