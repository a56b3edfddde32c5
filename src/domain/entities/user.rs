//! Authenticated identity record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::utc_timestamp;

/// Backend user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl UserId {
    /// Returns the raw id.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Identity returned by `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    username: String,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default, with = "utc_timestamp::option")]
    created_at: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Creates an active user without a creation time.
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        email: impl Into<String>,
        username: impl Into<String>,
        full_name: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            username: username.into(),
            full_name,
            is_active: true,
            created_at: None,
        }
    }

    /// User id.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Full name, if set.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Whether the account is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Account creation time.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Full name when set, otherwise the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.username)
    }
}
