//! Authentication endpoints.

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use super::ApiClient;
use super::dto::TokenResponse;
use crate::domain::entities::{AuthToken, Credentials, NewAccount, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;

#[async_trait]
impl AuthPort for ApiClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        debug!(email = %credentials.email(), "Requesting access token");

        let request = self.request(Method::POST, "/api/auth/login").form(&[
            ("username", credentials.email()),
            ("password", credentials.password()),
        ]);

        let body: TokenResponse = self.send_json(request).await?;

        if let Some(kind) = body.token_type.as_deref().filter(|k| !k.eq_ignore_ascii_case("bearer")) {
            debug!(token_type = %kind, "Unexpected token type, using it as bearer anyway");
        }

        AuthToken::new(body.access_token).ok_or_else(|| ApiError::decode("empty access token"))
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.send_json(self.request(Method::GET, "/api/auth/me"))
            .await
    }

    async fn register(&self, account: &NewAccount) -> Result<User, ApiError> {
        debug!(email = %account.email(), username = %account.username(), "Registering account");

        self.send_json(self.request(Method::POST, "/api/auth/register").json(account))
            .await
    }
}
