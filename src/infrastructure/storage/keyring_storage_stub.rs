//! Stub keyring storage for builds without the `keyring` feature.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

const UNAVAILABLE: &str = "built without keyring support; use token_store = \"file\"";

/// Keyring storage that always reports itself unavailable.
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    /// Creates the unavailable stub.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        Err(StorageError::NotAvailable(UNAVAILABLE.to_string()))
    }

    async fn store_token(&self, _token: &AuthToken) -> Result<(), StorageError> {
        Err(StorageError::NotAvailable(UNAVAILABLE.to_string()))
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
