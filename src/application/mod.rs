//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Long-lived application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{AuthOutcome, AuthenticatedSession, LoginFailure};
pub use services::{NotificationManager, PasswordPolicy, SessionState, SessionStore};
pub use use_cases::{LoginUseCase, RestoreSessionUseCase};
