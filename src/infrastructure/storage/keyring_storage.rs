//! Keyring-based token storage.
//!
//! The token lives under service `landit`, user `token`. Keyring calls block
//! (Secret Service talks D-Bus), so each one runs on the blocking pool.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;

const KEYRING_SERVICE: &str = "landit";
const KEYRING_USER: &str = "token";
const NO_KEYRING_HINT: &str = "set token_store = \"file\" to keep the session on disk";

/// System keyring token storage adapter.
pub struct KeyringTokenStorage {
    service: &'static str,
}

impl KeyringTokenStorage {
    /// Creates storage for the `landit` keyring entry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            service: KEYRING_SERVICE,
        }
    }

    async fn with_entry<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, StorageError> + Send + 'static,
    {
        let service = self.service;
        tokio::task::spawn_blocking(move || {
            let entry = Entry::new(service, KEYRING_USER)
                .map_err(|e| unavailable_or(e, StorageError::AccessFailed))?;
            op(entry)
        })
        .await
        .map_err(|e| StorageError::AccessFailed(format!("keyring task failed: {e}")))?
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Missing keyring backends become `NotAvailable` with a hint; everything
/// else goes through `other`.
fn unavailable_or(e: keyring::Error, other: fn(String) -> StorageError) -> StorageError {
    match e {
        keyring::Error::NoStorageAccess(_) | keyring::Error::PlatformFailure(_) => {
            StorageError::NotAvailable(format!("{e}; {NO_KEYRING_HINT}"))
        }
        e => other(e.to_string()),
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        debug!(service = self.service, "Reading token from keyring");

        self.with_entry(|entry| match entry.get_password() {
            Ok(secret) => Ok(AuthToken::new(secret)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => {
                warn!(error = %e, "Keyring read failed");
                Err(unavailable_or(e, StorageError::RetrievalFailed))
            }
        })
        .await
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(service = self.service, token = %token, "Writing token to keyring");

        let secret = token.as_str().to_string();
        self.with_entry(move |entry| {
            entry.set_password(&secret).map_err(|e| {
                warn!(error = %e, "Keyring write failed");
                unavailable_or(e, StorageError::StorageFailed)
            })
        })
        .await
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        debug!(service = self.service, "Removing token from keyring");

        self.with_entry(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Keyring delete failed");
                Err(unavailable_or(e, StorageError::DeletionFailed))
            }
        })
        .await
    }
}
