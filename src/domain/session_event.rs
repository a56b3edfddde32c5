//! Session lifecycle events published by the API gateway.

use tokio::sync::mpsc;

/// Raised when the backend stops honouring the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A response came back unauthorized; the persisted token is already gone.
    Invalidated {
        /// Status that triggered the invalidation.
        status: u16,
    },
}

/// Gateway side of the session event channel.
pub type SessionEventSender = mpsc::UnboundedSender<SessionEvent>;
/// Subscriber side of the session event channel.
pub type SessionEventReceiver = mpsc::UnboundedReceiver<SessionEvent>;

/// Creates the channel between the gateway and its single subscriber.
#[must_use]
pub fn session_channel() -> (SessionEventSender, SessionEventReceiver) {
    mpsc::unbounded_channel()
}
