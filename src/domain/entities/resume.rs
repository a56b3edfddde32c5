//! Uploaded resume record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::utc_timestamp;

/// Backend resume identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeId(pub i64);

impl std::fmt::Display for ResumeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resume as stored by the backend after text extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    /// Resume id.
    pub id: ResumeId,
    /// Owning user.
    pub user_id: i64,
    /// Name of the uploaded file.
    pub filename: String,
    /// Extracted plain text.
    pub content: String,
    /// Structured fields, JSON encoded.
    #[serde(default)]
    pub parsed_data: Option<String>,
    /// Upload time.
    #[serde(with = "utc_timestamp")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(with = "utc_timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// File extensions the backend accepts for resumes.
pub const ALLOWED_RESUME_EXTENSIONS: [&str; 4] = ["pdf", "txt", "doc", "docx"];

/// Returns whether a file name carries an accepted resume extension.
#[must_use]
pub fn is_supported_resume(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_RESUME_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("cv.pdf", true ; "pdf")]
    #[test_case("CV.DOCX", true ; "uppercase_docx")]
    #[test_case("notes.txt", true ; "txt")]
    #[test_case("photo.png", false ; "png")]
    #[test_case("resume", false ; "no_extension")]
    fn test_supported_extensions(name: &str, expected: bool) {
        assert_eq!(is_supported_resume(name), expected);
    }
}
