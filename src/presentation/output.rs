//! Terminal output: results on stdout, notifications on stderr.

use std::io::{self, Write};

use serde_json::Value;

use crate::domain::Notification;

/// Prints a command result as pretty JSON.
///
/// # Errors
/// Returns error if stdout cannot be written.
pub fn print_json(value: &Value) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")
}

/// Prints notifications in arrival order.
pub fn print_notifications(notifications: &[Notification]) {
    let mut stderr = io::stderr().lock();
    for notification in notifications {
        // stderr closed, nothing left to report to
        let _ = writeln!(stderr, "{notification}");
    }
}
