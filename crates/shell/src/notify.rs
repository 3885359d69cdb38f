//! Notification sinks attached to a session.
//!
//! Delivery failures never reach the code that raised the notification;
//! the session logs them and moves on.

use lectern_registry::{Level, ShellError};

/// In-application notification surface, usually a statusbar or overlay.
pub trait NotificationSink {
	fn deliver(&mut self, level: Level, message: &str) -> Result<(), ShellError>;
}

/// Desktop-level notification service outside the application window.
pub trait DesktopNotifier {
	fn send(&mut self, summary: &str, body: &str) -> Result<(), ShellError>;
}
