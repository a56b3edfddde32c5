//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Transient user-facing notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;
/// Session lifecycle events.
pub mod session_event;

pub use entities::{AuthToken, Credentials, NewAccount, User};
pub use errors::{ApiError, StorageError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{AuthPort, GenerationPort, TokenStoragePort, WorkspacePort};
pub use session_event::{SessionEvent, SessionEventReceiver, SessionEventSender, session_channel};
