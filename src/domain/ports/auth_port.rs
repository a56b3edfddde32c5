//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, Credentials, NewAccount, User};
use crate::domain::errors::ApiError;

/// Port for backend authentication operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError>;

    /// Fetches the identity bound to the currently persisted token.
    async fn current_user(&self) -> Result<User, ApiError>;

    /// Creates a new account.
    async fn register(&self, account: &NewAccount) -> Result<User, ApiError>;
}
