//! Wire bodies of the auth endpoints.

use serde::Deserialize;
use serde_json::Value;

/// Body of a successful `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Bearer token.
    pub access_token: String,
    /// Always `bearer` in practice.
    #[serde(default)]
    pub token_type: Option<String>,
}

/// FastAPI error body; `detail` is a string or a list of validation errors.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// String message or validation error list.
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorResponse {
    /// Human-readable message extracted from `detail`.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(message) => Some(message.clone()),
            Value::Array(items) => items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .map(str::to_string),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
