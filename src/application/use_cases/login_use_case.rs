//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::application::dto::{AuthenticatedSession, LoginFailure};
use crate::domain::entities::{AuthToken, Credentials, NewAccount, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, TokenStoragePort};

/// Handles the authenticate, persist, then identify workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    storage_port: Arc<dyn TokenStoragePort>,
}

impl LoginUseCase {
    /// Creates new login use case.
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

    /// Logs in with the given credentials.
    ///
    /// The token is persisted before the identity fetch so the fetch carries
    /// it. A rejected or unreachable authentication leaves storage alone; a
    /// failure after the new token was issued leaves no token persisted.
    ///
    /// # Errors
    /// Returns error if authentication, persistence or the identity fetch fails.
    pub async fn execute(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthenticatedSession, LoginFailure> {
        debug!(email = %credentials.email(), "Attempting login");

        let token = self.auth_port.authenticate(credentials).await.map_err(|e| {
            warn!(error = %e, "Authentication failed");
            LoginFailure::kept(e)
        })?;

        match self.persist_and_identify(token).await {
            Ok(session) => {
                info!(
                    user_id = %session.user.id(),
                    username = %session.user.username(),
                    "Successfully authenticated"
                );
                Ok(session)
            }
            Err(e) => {
                warn!(error = %e, "Login failed after token was issued");
                self.delete_token().await;
                Err(LoginFailure::discarded(e))
            }
        }
    }

    async fn persist_and_identify(
        &self,
        token: AuthToken,
    ) -> Result<AuthenticatedSession, ApiError> {
        self.storage_port.store_token(&token).await?;
        debug!("Token persisted, fetching identity");

        let user = self.auth_port.current_user().await?;

        Ok(AuthenticatedSession::new(token, user))
    }

    /// Creates an account without logging in.
    ///
    /// # Errors
    /// Returns error if the backend rejects the registration.
    pub async fn register(&self, account: &NewAccount) -> Result<User, ApiError> {
        debug!(email = %account.email(), username = %account.username(), "Registering account");

        let user = self.auth_port.register(account).await.map_err(|e| {
            warn!(error = %e, "Registration rejected");
            e
        })?;

        info!(user_id = %user.id(), "Account registered");
        Ok(user)
    }

    async fn delete_token(&self) {
        if let Err(e) = self.storage_port.delete_token().await {
            error!(error = %e, "Failed to delete token from storage");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{FailingTokenStorage, MOCK_TOKEN, MockAuthPort, ScriptedAuthPort};
    use crate::infrastructure::storage::MemoryTokenStorage;
    use std::sync::atomic::Ordering;

    fn credentials() -> Credentials {
        Credentials::new("ada@example.com", "hunter22")
    }

    #[tokio::test]
    async fn test_successful_login() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));

        let use_case = LoginUseCase::new(auth_port.clone(), storage.clone());
        let session = use_case.execute(&credentials()).await.unwrap();

        assert_eq!(session.token.as_str(), MOCK_TOKEN);
        assert_eq!(session.user.username(), "ada");
        assert_eq!(
            storage.get_token().await.unwrap().unwrap().as_str(),
            MOCK_TOKEN
        );
    }

    #[tokio::test]
    async fn test_identity_fetch_sees_persisted_token() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));

        LoginUseCase::new(auth_port.clone(), storage)
            .execute(&credentials())
            .await
            .unwrap();

        assert_eq!(
            *auth_port.seen_tokens.lock(),
            vec![Some(MOCK_TOKEN.to_string())]
        );
    }

    #[tokio::test]
    async fn test_rejected_credentials_keep_previous_token() {
        let storage = Arc::new(MemoryTokenStorage::with_token(AuthToken::new_unchecked(
            "previous",
        )));
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));
        auth_port.set_accept_login(false);

        let failure = LoginUseCase::new(auth_port.clone(), storage.clone())
            .execute(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(failure.error, ApiError::Unauthorized { .. }));
        assert!(!failure.session_discarded);
        assert_eq!(auth_port.identity_calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            storage.get_token().await.unwrap().unwrap().as_str(),
            "previous"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_keeps_previous_token() {
        let storage = Arc::new(MemoryTokenStorage::with_token(AuthToken::new_unchecked(
            "previous",
        )));
        let mut auth_port = MockAuthPort::new();
        auth_port
            .expect_authenticate()
            .times(1)
            .returning(|_| Err(ApiError::network("connection refused")));
        auth_port.expect_current_user().times(0);

        let failure = LoginUseCase::new(Arc::new(auth_port), storage.clone())
            .execute(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(failure.error, ApiError::Network { .. }));
        assert!(!failure.session_discarded);
        assert!(storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_identity_failure_removes_token() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));
        auth_port.set_accept_identity(false);

        let failure = LoginUseCase::new(auth_port, storage.clone())
            .execute(&credentials())
            .await
            .unwrap_err();

        assert!(failure.session_discarded);
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_skips_identity_fetch() {
        let storage = Arc::new(FailingTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));

        let failure = LoginUseCase::new(auth_port.clone(), storage)
            .execute(&credentials())
            .await
            .unwrap_err();

        assert!(matches!(failure.error, ApiError::Storage(_)));
        assert!(failure.session_discarded);
        assert_eq!(auth_port.identity_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_login_succeeds_once_storage_recovers() {
        let storage = Arc::new(FailingTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));
        let use_case = LoginUseCase::new(auth_port.clone(), storage.clone());

        assert!(use_case.execute(&credentials()).await.is_err());

        storage.set_fail_store(false);
        let session = use_case.execute(&credentials()).await.unwrap();

        assert_eq!(session.token.as_str(), MOCK_TOKEN);
        assert_eq!(auth_port.authenticate_calls.load(Ordering::SeqCst), 2);
        assert!(storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_register_does_not_touch_storage() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));

        let account = NewAccount::new("ada@example.com", "ada", None, "hunter22");
        let user = LoginUseCase::new(auth_port.clone(), storage.clone())
            .register(&account)
            .await
            .unwrap();

        assert_eq!(user.email(), "ada@example.com");
        assert_eq!(auth_port.authenticate_calls.load(Ordering::SeqCst), 0);
        assert!(!storage.has_token().await.unwrap());
    }
}
