//! Notification queue.

use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// FIFO queue of notifications waiting to be shown.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl NotificationManager {
    /// Creates an empty queue whose notifications last `default_duration`.
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
        }
    }

    /// Queues a notification.
    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        let notification =
            Notification::new(level, title, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    /// Queues an info notification.
    pub fn info(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Info, title, message);
    }

    /// Queues a success notification.
    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    /// Queues a warning.
    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, title, message);
    }

    /// Queues an error.
    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    /// Shows the front notification and drops it once expired.
    pub fn tick(&mut self) {
        if let Some(front) = self.queue.front_mut() {
            front.mark_displayed();
            if front.is_expired() {
                self.queue.pop_front();
                if let Some(next) = self.queue.front_mut() {
                    next.mark_displayed();
                }
            }
        }
    }

    /// Removes the current notification before it expires.
    pub fn dismiss(&mut self) -> Option<Notification> {
        let dismissed = self.queue.pop_front();
        if let Some(next) = self.queue.front_mut() {
            next.mark_displayed();
        }
        dismissed
    }

    /// Takes every queued notification in arrival order.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    /// Notification currently shown.
    #[must_use]
    pub fn current_notification(&self) -> Option<&Notification> {
        self.queue.front()
    }

    /// Whether anything is queued.
    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_notification_flow() {
        let mut manager = NotificationManager::default();

        manager.error("Login failed", "Incorrect email or password");
        assert!(manager.current_notification().is_some());

        manager.tick();
        assert!(manager.current_notification().is_some());
    }

    #[test]
    fn test_queueing() {
        let mut manager = NotificationManager::default();
        manager.info("1", "First");
        manager.success("2", "Second");

        assert_eq!(manager.current_notification().unwrap().title, "1");

        manager.tick();

        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());

        manager.tick();

        let second = manager.current_notification().unwrap();
        assert_eq!(second.title, "2");
        assert_eq!(second.level, NotificationLevel::Success);
        assert!(second.displayed_at.unwrap().elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_dismiss_advances_queue() {
        let mut manager = NotificationManager::default();
        manager.warn("Session expired", "Please log in again");
        manager.info("Next", "");

        let dismissed = manager.dismiss().unwrap();

        assert_eq!(dismissed.title, "Session expired");
        assert!(manager.current_notification().unwrap().displayed_at.is_some());
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut manager = NotificationManager::new(Duration::from_secs(1));
        manager.info("a", "");
        manager.error("b", "");

        let drained = manager.drain();

        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].duration, Duration::from_secs(1));
        assert!(!manager.has_notifications());
    }
}
