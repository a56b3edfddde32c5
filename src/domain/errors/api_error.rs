//! Backend API error types.

use thiserror::Error;

use super::StorageError;

/// Errors surfaced by calls through the API gateway.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 from the backend; the session is gone.
    #[error("unauthorized: {}", .detail.as_deref().unwrap_or("credential missing, invalid or expired"))]
    Unauthorized {
        /// Server-provided reason.
        detail: Option<String>,
    },

    /// Any other non-success status.
    #[error("request rejected with status {status}{}", .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// FastAPI `detail`, when present.
        detail: Option<String>,
    },

    /// The request never produced a response.
    #[error("network error: {message}")]
    Network {
        /// Transport error text.
        message: String,
    },

    /// The configured transport timeout elapsed.
    #[error("request timed out")]
    Timeout,

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {message}")]
    Decode {
        /// Decoder error text.
        message: String,
    },

    /// Rejected locally before any request was sent.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// Reading or writing the persisted token failed.
    #[error("token storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Creates unauthorized error.
    #[must_use]
    pub const fn unauthorized(detail: Option<String>) -> Self {
        Self::Unauthorized { detail }
    }

    /// Creates rejected error.
    #[must_use]
    pub const fn rejected(status: u16, detail: Option<String>) -> Self {
        Self::Rejected { status, detail }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Server-provided message, if the backend sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { detail } | Self::Rejected { detail, .. } => detail.as_deref(),
            Self::InvalidInput { reason } => Some(reason),
            _ => None,
        }
    }

    /// Human-readable message: the server detail or `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail()
            .filter(|detail| !detail.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }

    /// HTTP status, when the failure came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether the backend rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout)
    }
}
