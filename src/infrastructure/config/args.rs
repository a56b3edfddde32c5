//! Command-line arguments.

use super::app_config::{LogLevel, TokenStoreKind};
use crate::domain::ports::BatchKind;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Global flags plus the command to run.
#[derive(Debug, Parser)]
#[command(
    name = "landit",
    version,
    about = "Cold emails, cover letters and interview prep from your resume",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Backend base address.
    #[arg(long, env = "LANDIT_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Token persistence backend.
    #[arg(long, value_enum, global = true)]
    pub token_store: Option<TokenStoreKind>,

    /// Keep the session in memory only.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Suppress notifications on stderr.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and persist the session token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "LANDIT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account, then sign in with it.
    Register {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Public username.
        #[arg(long)]
        username: String,
        /// Display name.
        #[arg(long)]
        full_name: Option<String>,
        /// At least six characters.
        #[arg(long, env = "LANDIT_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat of the password; defaults to `--password`.
        #[arg(long, hide_env_values = true)]
        confirm_password: Option<String>,
    },
    /// Forget the persisted session.
    Logout,
    /// Show the signed-in account.
    Whoami,
    /// Manage uploaded resumes.
    #[command(subcommand)]
    Resumes(ResumeCommand),
    /// Manage saved job postings.
    #[command(subcommand)]
    Jobs(JobCommand),
    /// Generate and manage cold emails.
    #[command(subcommand)]
    Emails(EmailCommand),
    /// Stateless generation features.
    #[command(subcommand)]
    Generate(GenerateCommand),
}

/// Offset pagination flags for list commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct PageArgs {
    /// Records to skip.
    #[arg(long, default_value_t = 0)]
    pub skip: u32,
    /// Maximum records to return.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

/// `landit resumes` subcommands.
#[derive(Debug, Subcommand)]
pub enum ResumeCommand {
    /// List uploaded resumes.
    List(PageArgs),
    /// Upload a pdf, txt, doc or docx file.
    Upload {
        /// File to upload.
        path: PathBuf,
    },
    /// Show one resume with its extracted text.
    Show {
        /// Resume id.
        id: i64,
    },
    /// Delete a resume.
    Delete {
        /// Resume id.
        id: i64,
    },
}

/// Fields of a job posting.
#[derive(Debug, Clone, Args)]
pub struct JobFields {
    /// Hiring company.
    #[arg(long)]
    pub company: String,
    /// Position title.
    #[arg(long)]
    pub title: String,
    /// Job description text, or `@path` to read it from a file.
    #[arg(long)]
    pub description: String,
    /// Posting URL.
    #[arg(long)]
    pub url: Option<String>,
}

/// `landit jobs` subcommands.
#[derive(Debug, Subcommand)]
pub enum JobCommand {
    /// List saved jobs.
    List(PageArgs),
    /// Save a job posting.
    Add(JobFields),
    /// Show one job.
    Show {
        /// Job id.
        id: i64,
    },
    /// Replace a job's fields.
    Update {
        /// Job id.
        id: i64,
        /// New field values.
        #[command(flatten)]
        fields: JobFields,
    },
    /// Delete a job.
    Delete {
        /// Job id.
        id: i64,
    },
    /// Extract job details from a posting URL.
    Scrape {
        /// Posting URL.
        url: String,
        /// Save the scraped job.
        #[arg(long)]
        save: bool,
    },
}

/// `landit emails` subcommands.
#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Generate and store a cold email.
    Generate {
        /// Resume to write from.
        #[arg(long)]
        resume_id: i64,
        /// Job to target.
        #[arg(long)]
        job_id: i64,
        /// Writing tone.
        #[arg(long, default_value = "professional")]
        tone: String,
        /// short, medium or long.
        #[arg(long, default_value = "medium")]
        length: String,
    },
    /// List generated emails.
    List(PageArgs),
    /// Show one email.
    Show {
        /// Email id.
        id: i64,
    },
    /// Delete an email.
    Delete {
        /// Email id.
        id: i64,
    },
    /// Show usage totals.
    Stats,
}

/// Resume text plus the targeted job, shared by generation commands.
#[derive(Debug, Clone, Args)]
pub struct MaterialArgs {
    /// Resume text file.
    #[arg(long, value_name = "PATH")]
    pub resume: PathBuf,
    /// Job description text, or `@path` to read it from a file.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Hiring company.
    #[arg(long, default_value = "")]
    pub company: String,
    /// Position title.
    #[arg(long, default_value = "")]
    pub title: String,
    /// Fill job fields by scraping this posting first.
    #[arg(long, value_name = "URL")]
    pub job_url: Option<String>,
}

/// `landit generate` subcommands.
#[derive(Debug, Subcommand)]
pub enum GenerateCommand {
    /// Email, cover letter and analysis in one call.
    Quick {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
        /// Email tone.
        #[arg(long, default_value = "professional")]
        email_tone: String,
        /// Email length.
        #[arg(long, default_value = "medium")]
        email_length: String,
        /// Cover letter tone.
        #[arg(long, default_value = "professional")]
        cover_letter_tone: String,
        /// Also render a LaTeX resume.
        #[arg(long)]
        latex: bool,
        /// Also prepare interview questions.
        #[arg(long)]
        interview: bool,
    },
    /// Cold email without saving it.
    Email {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
        /// Writing tone.
        #[arg(long, default_value = "professional")]
        tone: String,
        /// short, medium or long.
        #[arg(long, default_value = "medium")]
        length: String,
    },
    /// Cover letter.
    CoverLetter {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
        /// Writing tone.
        #[arg(long, default_value = "professional")]
        tone: String,
        /// Mention salary expectations.
        #[arg(long)]
        include_salary: bool,
        /// Point the letter must cover; repeatable.
        #[arg(long = "point")]
        points: Vec<String>,
    },
    /// Resume review against the job.
    Analyze {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
    },
    /// Applicant tracking system score.
    Ats {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
    },
    /// LaTeX rendering of the resume.
    Latex {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
        /// Template style.
        #[arg(long, default_value = "modern")]
        template: String,
        /// Skill to emphasise; repeatable.
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    /// Likely interview questions with suggested answers.
    Interview {
        /// Resume and job.
        #[command(flatten)]
        material: MaterialArgs,
        /// Question category; repeatable.
        #[arg(long = "question-type")]
        question_types: Vec<String>,
    },
    /// Upload a resume file (pdf, txt, doc, docx) and analyse it.
    UploadAnalyze {
        /// Resume file.
        path: PathBuf,
        /// Job description text, or `@path` to read it from a file.
        #[arg(long, default_value = "")]
        description: String,
        /// Hiring company.
        #[arg(long, default_value = "")]
        company: String,
        /// Position title.
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Generate for several jobs listed in a JSON file.
    Batch {
        /// Resume text file.
        #[arg(long, value_name = "PATH")]
        resume: PathBuf,
        /// JSON array of `{company_name, job_title, job_description}`.
        #[arg(long, value_name = "PATH")]
        jobs: PathBuf,
        /// What to produce per job.
        #[arg(long, value_enum, default_value_t = BatchKind::Email)]
        kind: BatchKind,
    },
}

impl Command {
    /// Returns whether the command needs a signed-in session.
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login { .. } | Self::Register { .. } | Self::Logout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        let args = CliArgs::parse_from([
            "landit", "login", "--email", "a@b.c", "--password", "secret1",
        ]);

        assert!(matches!(args.command, Command::Login { ref email, .. } if email == "a@b.c"));
        assert!(!args.command.requires_auth());
    }

    #[test]
    fn test_parse_nested_job_update() {
        let args = CliArgs::parse_from([
            "landit",
            "jobs",
            "update",
            "4",
            "--company",
            "Acme",
            "--title",
            "Engineer",
            "--description",
            "Build",
        ]);

        let Command::Jobs(JobCommand::Update { id, fields }) = args.command else {
            panic!("expected jobs update");
        };
        assert_eq!(id, 4);
        assert_eq!(fields.company, "Acme");
    }

    #[test]
    fn test_protected_commands() {
        let args = CliArgs::parse_from(["landit", "resumes", "list", "--limit", "3"]);
        assert!(args.command.requires_auth());
    }
}
