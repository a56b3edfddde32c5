//! Registration password checks.

use std::fmt;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Reason a registration password is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordProblem {
    /// Password and confirmation differ.
    #[error("Passwords do not match")]
    Mismatch,
    /// Fewer than [`MIN_PASSWORD_LEN`] characters.
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    TooShort,
}

/// Strength score from 0 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PasswordStrength(u8);

impl PasswordStrength {
    /// Number of strength checks passed.
    #[must_use]
    pub const fn score(self) -> u8 {
        self.0
    }

    /// Label shown next to the score.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.0 {
            0 | 1 => "Weak",
            2 => "Fair",
            3 => "Good",
            4 => "Strong",
            _ => "Very Strong",
        }
    }
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Password rules for the registration form.
pub struct PasswordPolicy;

impl PasswordPolicy {
    /// Checks a password and its confirmation before registering.
    ///
    /// # Errors
    /// Returns the first problem found; a mismatch is reported before length.
    pub fn validate(password: &str, confirmation: &str) -> Result<(), PasswordProblem> {
        if password != confirmation {
            return Err(PasswordProblem::Mismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(PasswordProblem::TooShort);
        }
        Ok(())
    }

    /// Scores length, uppercase, digit and symbol use.
    #[must_use]
    pub fn strength(password: &str) -> PasswordStrength {
        let len = password.chars().count();
        let checks = [
            len >= MIN_PASSWORD_LEN,
            len >= 8,
            password.chars().any(char::is_uppercase),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| !c.is_alphanumeric()),
        ];

        #[allow(clippy::cast_possible_truncation)]
        PasswordStrength(checks.iter().filter(|passed| **passed).count() as u8)
    }
}
