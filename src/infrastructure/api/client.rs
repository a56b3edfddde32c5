//! HTTP gateway to the LanditAI backend.
//!
//! Every request leaves through [`ApiClient::send`], which attaches the
//! persisted bearer token and inspects the response. An unauthorized
//! response deletes the persisted token and publishes
//! [`SessionEvent::Invalidated`] no matter which endpoint produced it.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, header};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use super::dto::ErrorResponse;
use crate::domain::errors::ApiError;
use crate::domain::ports::TokenStoragePort;
use crate::domain::{SessionEvent, SessionEventSender};

const USER_AGENT: &str = concat!("landit/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Backend API client shared by every port implementation.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: Arc<dyn TokenStoragePort>,
    events: SessionEventSender,
}

impl ApiClient {
    /// Creates client with the default transport timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        storage: Arc<dyn TokenStoragePort>,
        events: SessionEventSender,
    ) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT, storage, events)
    }

    /// Creates client with a custom transport timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
        storage: Arc<dyn TokenStoragePort>,
        events: SessionEventSender,
    ) -> Result<Self, ApiError> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
            events,
        })
    }

    /// Backend address without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends a request through both gateway stages.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = self.attach_credentials(request).await;

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach backend");
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_connect() {
                ApiError::network("failed to connect to backend")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        self.inspect_response(response).await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;

        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse backend response");
            ApiError::decode(e.to_string())
        })
    }

    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    async fn attach_credentials(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get_token().await {
            Ok(Some(token)) => request.header(header::AUTHORIZATION, token.bearer()),
            Ok(None) => request,
            Err(e) => {
                warn!(error = %e, "Token storage unreadable, sending without credentials");
                request
            }
        }
    }

    async fn inspect_response(&self, response: Response) -> Result<Response, ApiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let detail = match response.json::<ErrorResponse>().await {
            Ok(body) => body.message(),
            Err(_) => None,
        };

        if status == StatusCode::UNAUTHORIZED {
            warn!(path = %url, "Backend rejected credentials, invalidating session");
            self.invalidate_session(status).await;
            return Err(ApiError::unauthorized(detail));
        }

        debug!(path = %url, status = status.as_u16(), detail = ?detail, "Request rejected");
        Err(ApiError::rejected(status.as_u16(), detail))
    }

    async fn invalidate_session(&self, status: StatusCode) {
        if let Err(e) = self.storage.delete_token().await {
            error!(error = %e, "Failed to delete persisted token");
        }

        if self
            .events
            .send(SessionEvent::Invalidated {
                status: status.as_u16(),
            })
            .is_err()
        {
            debug!("No session subscriber listening");
        }
    }
}
