//! Loading of `config.toml`.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

use super::app_config::AppConfig;
use super::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};
use crate::infrastructure::storage::write_atomic;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Failure to locate, read or create the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory.
    #[error("failed to determine config directory")]
    ConfigDirNotFound,
    /// Reading or writing the file failed.
    #[error("config file {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// Defaults could not be serialized.
    #[error("failed to serialize default config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from an existing file.
    Loaded(PathBuf),
    /// The file was missing; defaults were written to it.
    Created(PathBuf),
    /// The file could not be parsed and defaults are in effect.
    Ignored {
        /// The malformed file, left untouched.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },
}

impl ConfigSource {
    /// File the configuration refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Loaded(path) | Self::Created(path) | Self::Ignored { path, .. } => path,
        }
    }

    /// User-facing warning for a file that was ignored.
    #[must_use]
    pub fn warning(&self) -> Option<String> {
        match self {
            Self::Ignored { path, reason } => Some(format!(
                "ignoring malformed config {}: {reason}",
                path.display()
            )),
            Self::Loaded(_) | Self::Created(_) => None,
        }
    }
}

/// Configuration together with its origin.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Effective configuration, before CLI flags are applied.
    pub config: AppConfig,
    /// Where it came from.
    pub source: ConfigSource,
}

/// Locates and loads `config.toml` in the platform configuration directory.
pub struct StorageManager {
    config_dir: PathBuf,
}

impl StorageManager {
    /// Uses the platform configuration directory.
    ///
    /// # Errors
    /// Returns error if the configuration directory cannot be determined.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Uses an explicit configuration directory.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: dir.into(),
        }
    }

    /// Default `config.toml` location.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE_NAME)
    }

    /// Loads `path_override` or the default file.
    ///
    /// A missing file is created with defaults. A malformed file is left in
    /// place and reported through [`ConfigSource::Ignored`].
    ///
    /// # Errors
    /// Returns error if the file cannot be read, or the defaults cannot be written.
    pub fn load(&self, path_override: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let path = path_override.map_or_else(|| self.config_path(), Path::to_path_buf);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Self::create_default(path);
            }
            Err(source) => return Err(ConfigError::Io { path, source }),
        };

        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => {
                debug!(path = %path.display(), "Configuration loaded");
                Ok(LoadedConfig {
                    config,
                    source: ConfigSource::Loaded(path),
                })
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e.message(), "Ignoring malformed config file");
                Ok(LoadedConfig {
                    config: AppConfig::default(),
                    source: ConfigSource::Ignored {
                        reason: e.message().to_string(),
                        path,
                    },
                })
            }
        }
    }

    fn create_default(path: PathBuf) -> Result<LoadedConfig, ConfigError> {
        let config = AppConfig::default();
        let content = toml::to_string_pretty(&config)?;

        if let Err(source) = write_atomic(&path, &content) {
            return Err(ConfigError::Io { path, source });
        }
        debug!(path = %path.display(), "Wrote default configuration");

        Ok(LoadedConfig {
            config,
            source: ConfigSource::Created(path),
        })
    }
}
