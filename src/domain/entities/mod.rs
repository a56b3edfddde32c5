//! Domain entity definitions.

mod credentials;
mod email;
mod job;
mod resume;
mod token;
mod user;

pub use credentials::{Credentials, NewAccount};
pub use email::{EmailId, EmailRequest, GeneratedEmail, UsageStats};
pub use job::{Job, JobDraft, JobId, ScrapedJob};
pub use resume::{ALLOWED_RESUME_EXTENSIONS, Resume, ResumeId, is_supported_resume};
pub use token::AuthToken;
pub use user::{User, UserId};
