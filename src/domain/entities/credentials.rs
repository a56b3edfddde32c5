//! Login and registration inputs.

use std::fmt;

use serde::{Serialize, Serializer};
use zeroize::Zeroizing;

fn serialize_secret<S: Serializer>(value: &Zeroizing<String>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(value.as_str())
}

/// Email and password pair sent to the login endpoint.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials, trimming the email.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plain password, zeroized on drop.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration payload for `POST /api/auth/register`.
#[derive(Clone, Serialize)]
pub struct NewAccount {
    email: String,
    username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    full_name: Option<String>,
    #[serde(serialize_with = "serialize_secret")]
    password: Zeroizing<String>,
}

impl NewAccount {
    /// Creates a registration payload. A blank full name is dropped.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        full_name: Option<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into().trim().to_string(),
            username: username.into().trim().to_string(),
            full_name: full_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Chosen username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Optional display name.
    #[must_use]
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Credentials for the login chained after registration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.as_str())
    }
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("password", &"<redacted>")
            .finish()
    }
}
