//! Startup session restoration.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::AuthenticatedSession;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Validates a persisted token against the backend.
pub struct RestoreSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
}

impl RestoreSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(
        auth_port: Arc<dyn AuthPort>,
        storage_port: Arc<dyn TokenStoragePort>,
    ) -> Self {
        Self {
            auth_port,
            storage_port,
        }
    }

    /// Returns the restored session, or `None` when there is nothing valid
    /// to restore. A token the backend no longer accepts is deleted.
    pub async fn execute(&self) -> Option<AuthenticatedSession> {
        debug!("Checking storage for persisted token");
        let token = match self.storage_port.get_token().await {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No persisted token found");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read token storage");
                return None;
            }
        };

        match self.auth_port.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id(), "Restored session from persisted token");
                Some(AuthenticatedSession::new(token, user))
            }
            Err(e) => {
                warn!(error = %e, "Persisted token rejected, discarding");
                if let Err(e) = self.storage_port.delete_token().await {
                    error!(error = %e, "Failed to delete stale token");
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::domain::ports::mocks::ScriptedAuthPort;
    use crate::infrastructure::storage::MemoryTokenStorage;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn test_valid_token_restored() {
        let storage = Arc::new(MemoryTokenStorage::with_token(AuthToken::new_unchecked("T")));
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));

        let session = RestoreSessionUseCase::new(auth_port, storage.clone())
            .execute()
            .await
            .unwrap();

        assert_eq!(session.token.as_str(), "T");
        assert!(storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_stale_token_discarded() {
        let storage = Arc::new(MemoryTokenStorage::with_token(AuthToken::new_unchecked("T")));
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));
        auth_port.set_accept_identity(false);

        let session = RestoreSessionUseCase::new(auth_port, storage.clone())
            .execute()
            .await;

        assert!(session.is_none());
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_no_token_skips_backend() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));

        let session = RestoreSessionUseCase::new(auth_port.clone(), storage)
            .execute()
            .await;

        assert!(session.is_none());
        assert_eq!(auth_port.identity_calls.load(Ordering::SeqCst), 0);
    }
}
