//! Long-lived application services.

/// Queued user notifications.
pub mod notification_manager;
/// Registration password checks.
pub mod password_policy;
/// Session state and its operations.
pub mod session_store;

pub use notification_manager::NotificationManager;
pub use password_policy::{PasswordPolicy, PasswordProblem, PasswordStrength};
pub use session_store::{SessionState, SessionStore};
