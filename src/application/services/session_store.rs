//! Single authority for who is logged in.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::application::dto::{AuthOutcome, AuthenticatedSession};
use crate::application::use_cases::{LoginUseCase, RestoreSessionUseCase};
use crate::domain::entities::{AuthToken, Credentials, NewAccount, User};
use crate::domain::ports::{AuthPort, TokenStoragePort};

const LOGIN_FALLBACK: &str = "Login failed";
const REGISTER_FALLBACK: &str = "Registration failed";

/// Observable session fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Token of the signed-in session.
    pub token: Option<AuthToken>,
    /// Identity bound to the token.
    pub user: Option<User>,
    /// Whether a validated session is held.
    pub is_authenticated: bool,
    /// A login or registration is in flight.
    pub is_loading: bool,
    /// Message of the last failed operation.
    pub error: Option<String>,
}

impl SessionState {
    fn begin_request(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    fn commit(&mut self, session: AuthenticatedSession) {
        self.token = Some(session.token);
        self.user = Some(session.user);
        self.is_authenticated = true;
        self.is_loading = false;
    }

    fn clear_identity(&mut self) {
        self.token = None;
        self.user = None;
        self.is_authenticated = false;
    }
}

/// Session container; `login`, `register`, `logout` and `check_auth` are the
/// only operations that mutate it.
///
/// The state lock is never held across an await. Concurrent logins are not
/// serialized, the last one to finish decides the final state.
pub struct SessionStore {
    state: RwLock<SessionState>,
    login_use_case: LoginUseCase,
    restore_use_case: RestoreSessionUseCase,
    storage_port: Arc<dyn TokenStoragePort>,
    checked: AtomicBool,
}

impl SessionStore {
    /// Creates an empty, unchecked store.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>, storage_port: Arc<dyn TokenStoragePort>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            login_use_case: LoginUseCase::new(auth_port.clone(), storage_port.clone()),
            restore_use_case: RestoreSessionUseCase::new(auth_port, storage_port.clone()),
            storage_port,
            checked: AtomicBool::new(false),
        }
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Whether a validated session is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.read().is_authenticated
    }

    /// Signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    /// Logs in. A failure before the backend issued a new token keeps the
    /// existing session; a later failure discards it.
    pub async fn login(&self, credentials: Credentials) -> AuthOutcome {
        self.state.write().begin_request();

        match self.login_use_case.execute(&credentials).await {
            Ok(session) => {
                self.state.write().commit(session);
                AuthOutcome::succeeded()
            }
            Err(failure) => {
                let message = failure.error.user_message(LOGIN_FALLBACK);
                let mut state = self.state.write();
                if failure.session_discarded {
                    state.clear_identity();
                }
                state.is_loading = false;
                state.error = Some(message.clone());
                AuthOutcome::failed(message)
            }
        }
    }

    /// Registers, then logs in with the same email and password.
    pub async fn register(&self, account: NewAccount) -> AuthOutcome {
        self.state.write().begin_request();

        if let Err(e) = self.login_use_case.register(&account).await {
            let message = e.user_message(REGISTER_FALLBACK);
            let mut state = self.state.write();
            state.is_loading = false;
            state.error = Some(message.clone());
            return AuthOutcome::failed(message);
        }

        debug!("Registration accepted, chaining login");
        self.login(account.credentials()).await
    }

    /// Forgets the session locally. Never fails and makes no network call.
    pub async fn logout(&self) {
        if let Err(e) = self.storage_port.delete_token().await {
            warn!(error = %e, "Failed to delete persisted token on logout");
        }
        self.state.write().clear_identity();
        info!("Logged out");
    }

    /// Validates the persisted token once per store. Later calls return the
    /// current authentication flag without touching the backend.
    pub async fn check_auth(&self) -> bool {
        if self.checked.swap(true, Ordering::SeqCst) {
            debug!("Session already checked");
            return self.is_authenticated();
        }

        match self.restore_use_case.execute().await {
            Some(session) => {
                self.state.write().commit(session);
                true
            }
            None => {
                self.state.write().clear_identity();
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserId;
    use crate::domain::errors::ApiError;
    use crate::domain::ports::mocks::{
        FailingTokenStorage, MOCK_TOKEN, MockAuthPort, ScriptedAuthPort,
    };
    use crate::infrastructure::storage::MemoryTokenStorage;

    fn scripted(storage: Option<AuthToken>) -> (SessionStore, Arc<ScriptedAuthPort>, Arc<MemoryTokenStorage>) {
        let storage = Arc::new(match storage {
            Some(token) => MemoryTokenStorage::with_token(token),
            None => MemoryTokenStorage::new(),
        });
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));
        let store = SessionStore::new(auth_port.clone(), storage.clone());
        (store, auth_port, storage)
    }

    fn credentials() -> Credentials {
        Credentials::new("ada@example.com", "hunter22")
    }

    fn account() -> NewAccount {
        NewAccount::new("ada@example.com", "ada", Some("Ada Lovelace".to_string()), "hunter22")
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (store, _, storage) = scripted(None);
        assert!(store.login(credentials()).await.success);

        for _ in 0..3 {
            store.logout().await;
            let state = store.snapshot();
            assert_eq!(state.token, None);
            assert_eq!(state.user, None);
            assert!(!state.is_authenticated);
            assert!(!storage.has_token().await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_login_success_commits_session() {
        let (store, auth_port, storage) = scripted(None);

        let outcome = store.login(credentials()).await;

        assert_eq!(outcome, AuthOutcome::succeeded());
        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.token.as_ref().map(AuthToken::as_str), Some(MOCK_TOKEN));
        assert_eq!(state.user.as_ref(), Some(auth_port.user()));
        assert_eq!(
            storage.get_token().await.unwrap().unwrap().as_str(),
            MOCK_TOKEN
        );
    }

    #[tokio::test]
    async fn test_login_failure_leaves_clean_state() {
        let (store, auth_port, storage) = scripted(None);
        auth_port.set_accept_login(false);

        let outcome = store.login(credentials()).await;

        assert!(!outcome.success);
        assert_eq!(outcome.error.as_deref(), Some("Incorrect email or password"));
        let state = store.snapshot();
        assert!(!state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.user, None);
        assert_eq!(state.error.as_deref(), Some("Incorrect email or password"));
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_error() {
        let (store, auth_port, _) = scripted(None);
        auth_port.set_accept_login(false);
        store.login(credentials()).await;
        assert!(store.snapshot().error.is_some());

        auth_port.set_accept_login(true);
        store.login(credentials()).await;

        assert_eq!(store.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_identity_failure_after_login_discards_token() {
        let (store, auth_port, storage) = scripted(None);
        auth_port.set_accept_identity(false);

        let outcome = store.login(credentials()).await;

        assert!(!outcome.success);
        assert_eq!(store.snapshot().token, None);
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_storage_failure_uses_fallback_message() {
        let storage = Arc::new(FailingTokenStorage::new());
        let auth_port = Arc::new(ScriptedAuthPort::new(storage.clone()));
        let store = SessionStore::new(auth_port, storage);

        let outcome = store.login(credentials()).await;

        assert_eq!(outcome, AuthOutcome::failed(LOGIN_FALLBACK));
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_chains_login() {
        let (store, auth_port, storage) = scripted(None);

        let outcome = store.register(account()).await;

        assert!(outcome.success);
        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert_eq!(state.user.as_ref(), Some(auth_port.user()));
        assert_eq!(
            storage.get_token().await.unwrap().unwrap().as_str(),
            MOCK_TOKEN
        );
    }

    #[tokio::test]
    async fn test_register_failure_never_logs_in() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let mut auth_port = MockAuthPort::new();
        auth_port
            .expect_register()
            .times(1)
            .returning(|_| Err(ApiError::rejected(400, Some("Email already registered".to_string()))));
        auth_port.expect_authenticate().times(0);
        auth_port.expect_current_user().times(0);

        let store = SessionStore::new(Arc::new(auth_port), storage.clone());
        let outcome = store.register(account()).await;

        assert_eq!(outcome, AuthOutcome::failed("Email already registered"));
        let state = store.snapshot();
        assert!(!state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.user, None);
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_backend_keeps_existing_session() {
        let storage = Arc::new(MemoryTokenStorage::with_token(AuthToken::new_unchecked("T")));
        let user = User::new(UserId(1), "ada@example.com", "ada", None);
        let mut auth_port = MockAuthPort::new();
        auth_port
            .expect_current_user()
            .times(1)
            .returning(move || Ok(user.clone()));
        auth_port
            .expect_authenticate()
            .times(1)
            .returning(|_| Err(ApiError::Timeout));

        let store = SessionStore::new(Arc::new(auth_port), storage.clone());
        assert!(store.check_auth().await);

        let outcome = store.login(credentials()).await;

        assert_eq!(outcome, AuthOutcome::failed(LOGIN_FALLBACK));
        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert!(state.user.is_some());
        assert_eq!(state.token.as_ref().map(AuthToken::as_str), Some("T"));
        assert_eq!(state.error.as_deref(), Some(LOGIN_FALLBACK));
        assert_eq!(storage.get_token().await.unwrap().unwrap().as_str(), "T");
    }

    #[tokio::test]
    async fn test_scripted_register_rejection() {
        let (store, auth_port, storage) = scripted(None);
        auth_port.set_accept_register(false);

        let outcome = store.register(account()).await;

        assert_eq!(outcome, AuthOutcome::failed("Email already registered"));
        assert_eq!(auth_port.authenticate_calls.load(Ordering::SeqCst), 0);
        assert!(!store.is_authenticated());
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_register_failure_without_detail() {
        let storage = Arc::new(MemoryTokenStorage::new());
        let mut auth_port = MockAuthPort::new();
        auth_port
            .expect_register()
            .returning(|_| Err(ApiError::network("connection refused")));

        let store = SessionStore::new(Arc::new(auth_port), storage);

        assert_eq!(
            store.register(account()).await,
            AuthOutcome::failed(REGISTER_FALLBACK)
        );
    }

    #[tokio::test]
    async fn test_check_auth_restores_valid_token() {
        let (store, _, storage) = scripted(Some(AuthToken::new_unchecked("T")));

        assert!(store.check_auth().await);

        let state = store.snapshot();
        assert!(state.is_authenticated);
        assert!(state.user.is_some());
        assert_eq!(state.token.as_ref().map(AuthToken::as_str), Some("T"));
        assert!(storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_check_auth_discards_stale_token() {
        let (store, auth_port, storage) = scripted(Some(AuthToken::new_unchecked("T")));
        auth_port.set_accept_identity(false);

        assert!(!store.check_auth().await);

        let state = store.snapshot();
        assert!(!state.is_authenticated);
        assert_eq!(state.token, None);
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_check_auth_runs_once() {
        let (store, auth_port, _) = scripted(Some(AuthToken::new_unchecked("T")));

        store.check_auth().await;
        store.check_auth().await;

        assert_eq!(
            auth_port
                .identity_calls
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );
    }
}
