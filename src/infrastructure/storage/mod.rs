//! Token storage adapters.

mod atomic_file;
mod file_storage;
#[cfg(feature = "keyring")]
mod keyring_storage;
#[cfg(not(feature = "keyring"))]
mod keyring_storage_stub;
mod memory_storage;

pub(crate) use atomic_file::write_atomic;
pub use file_storage::FileTokenStorage;
#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringTokenStorage;
#[cfg(not(feature = "keyring"))]
pub use keyring_storage_stub::KeyringTokenStorage;
pub use memory_storage::MemoryTokenStorage;

use std::sync::Arc;

use crate::domain::errors::StorageError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::TokenStoreKind;

/// Builds the token storage backend selected in configuration.
///
/// # Errors
/// Returns error if the file backend cannot locate a data directory.
pub fn token_storage(kind: TokenStoreKind) -> Result<Arc<dyn TokenStoragePort>, StorageError> {
    Ok(match kind {
        TokenStoreKind::Keyring => Arc::new(KeyringTokenStorage::new()),
        TokenStoreKind::File => Arc::new(FileTokenStorage::new()?),
        TokenStoreKind::Memory => Arc::new(MemoryTokenStorage::new()),
    })
}
