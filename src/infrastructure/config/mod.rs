//! Application configuration.

/// `config.toml` schema and CLI merge.
pub mod app_config;
/// Command-line arguments.
pub mod args;
/// Config file loading.
pub mod storage;

pub use app_config::{AppConfig, DEFAULT_API_URL, LogLevel, NotificationsConfig, TokenStoreKind};
pub use args::{CliArgs, Command};
pub use storage::{ConfigError, ConfigSource, LoadedConfig, StorageManager};

pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "landit";
pub(crate) const APP_NAME: &str = "landit";
