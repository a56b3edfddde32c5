//! File-backed token storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

use super::write_atomic;

const SESSION_FILE_NAME: &str = "session.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

/// Stores the token as a single `token` key in `session.toml`.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage in the platform data directory.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined.
    pub fn new() -> Result<Self, StorageError> {
        let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME).ok_or_else(|| {
            StorageError::NotAvailable("failed to determine data directory".to_string())
        })?;

        Ok(Self::with_path(dirs.data_dir().join(SESSION_FILE_NAME)))
    }

    /// Creates storage at an explicit path.
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the session file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file");
                return Ok(None);
            }
            Err(e) => return Err(StorageError::RetrievalFailed(e.to_string())),
        };

        match toml::from_str::<SessionFile>(&content) {
            Ok(file) => Ok(file.token.and_then(AuthToken::new)),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Malformed session file, ignoring");
                Ok(None)
            }
        }
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), token = %token, "Storing token in session file");

        let content = toml::to_string(&SessionFile {
            token: Some(token.as_str().to_string()),
        })
        .map_err(|e| StorageError::StorageFailed(e.to_string()))?;

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomic(&path, &content))
            .await
            .map_err(|e| StorageError::StorageFailed(e.to_string()))?
            .map_err(|e| StorageError::StorageFailed(e.to_string()))
    }

    async fn delete_token(&self) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), "Deleting session file");

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeletionFailed(e.to_string())),
        }
    }
}
