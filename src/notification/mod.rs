//! Notification module
//!
//! Non-fatal messages raised by the search bar (for example, a near-me query
//! that had to run without a location). The host decides how to show them.

mod state;

pub use state::{Notification, NotificationLevel, NotificationQueue, Notifier};
