//! User-facing notification messages.

use std::time::{Duration, Instant};

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information.
    Info,
    /// Completed operation.
    Success,
    /// Something the user should look at.
    Warn,
    /// Failed operation.
    Error,
}

impl NotificationLevel {
    /// Short tag printed before the title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "ok",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Transient message shown after an operation completes.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Severity.
    pub level: NotificationLevel,
    /// Headline.
    pub title: String,
    /// Detail text, possibly empty.
    pub message: String,
    /// When the notification was raised.
    pub created_at: Instant,
    /// When it was first shown; expiry counts from here.
    pub displayed_at: Option<Instant>,
    /// How long it stays visible once shown.
    pub duration: Duration,
}

impl Notification {
    /// Creates a notification with the default five second duration.
    #[must_use]
    pub fn new(
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
            created_at: Instant::now(),
            displayed_at: None,
            duration: Duration::from_secs(5),
        }
    }

    /// Overrides the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Whether it has been shown for longer than its duration.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.displayed_at
            .is_some_and(|start| start.elapsed() > self.duration)
    }

    /// Starts the expiry clock; later calls keep the first time.
    pub fn mark_displayed(&mut self) {
        if self.displayed_at.is_none() {
            self.displayed_at = Some(Instant::now());
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "[{}] {}", self.level.label(), self.title)
        } else {
            write!(f, "[{}] {}: {}", self.level.label(), self.title, self.message)
        }
    }
}
