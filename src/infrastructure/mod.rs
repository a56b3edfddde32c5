//! Infrastructure layer with external service adapters.

/// LanditAI backend client.
pub mod api;
/// Application configuration.
pub mod config;
/// Token storage adapters.
pub mod storage;

pub use api::ApiClient;
pub use config::{
    AppConfig, CliArgs, Command, ConfigSource, LogLevel, StorageManager, TokenStoreKind,
};
pub use storage::{FileTokenStorage, KeyringTokenStorage, MemoryTokenStorage, token_storage};
