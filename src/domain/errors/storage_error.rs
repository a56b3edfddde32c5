//! Token storage error types.

use thiserror::Error;

/// Persisted token storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend could not be opened.
    #[error("failed to access token storage: {0}")]
    AccessFailed(String),

    /// Reading the token failed.
    #[error("failed to retrieve token: {0}")]
    RetrievalFailed(String),

    /// Writing the token failed.
    #[error("failed to store token: {0}")]
    StorageFailed(String),

    /// Removing the token failed.
    #[error("failed to delete token: {0}")]
    DeletionFailed(String),

    /// The selected backend does not exist on this system.
    #[error("token storage not available: {0}")]
    NotAvailable(String),
}
