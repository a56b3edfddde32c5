mod auth_port;
mod generation_port;
mod token_storage_port;
mod workspace_port;

pub use auth_port::AuthPort;
pub use generation_port::{
    BatchGenerateRequest, BatchKind, CoverLetterRequest, GenerationOptions, GenerationPort,
    InterviewPrepRequest, JobContext, LatexResumeRequest, QuickGenerateRequest,
    ResumeAnalysisRequest,
};
pub use token_storage_port::TokenStoragePort;
pub use workspace_port::{Page, WorkspacePort};
