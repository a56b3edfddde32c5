//! Authentication DTOs.

use crate::domain::entities::{AuthToken, User};
use crate::domain::errors::ApiError;

/// Token together with the identity it was validated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    /// Persisted bearer token.
    pub token: AuthToken,
    /// Identity returned for the token.
    pub user: User,
}

impl AuthenticatedSession {
    /// Creates new authenticated session.
    #[must_use]
    pub const fn new(token: AuthToken, user: User) -> Self {
        Self { token, user }
    }
}

/// Result of a session operation, with errors already turned into messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable failure message.
    pub error: Option<String>,
}

impl AuthOutcome {
    /// Creates successful outcome.
    #[must_use]
    pub const fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// Creates failed outcome.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

/// Failed login attempt.
///
/// `session_discarded` is set once the backend had issued a new token, in
/// which case the persisted token was deleted and any previous identity is
/// stale. A failure before that point leaves the existing session untouched.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct LoginFailure {
    /// Underlying gateway or storage error.
    pub error: ApiError,
    /// Whether the persisted token was discarded.
    pub session_discarded: bool,
}

impl LoginFailure {
    /// Failure that left the persisted token as it was.
    #[must_use]
    pub const fn kept(error: ApiError) -> Self {
        Self {
            error,
            session_discarded: false,
        }
    }

    /// Failure after which the persisted token was deleted.
    #[must_use]
    pub const fn discarded(error: ApiError) -> Self {
        Self {
            error,
            session_discarded: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_shapes() {
        assert_eq!(AuthOutcome::succeeded().error, None);

        let failed = AuthOutcome::failed("Login failed");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Login failed"));
    }
}
