//! Notifications
//!
//! Best-effort messages sent after an order commits. Failures never affect the order.

use std::time::Duration;

mod mailer;
mod owner;

/// Upper bound on a single notification call, connect to last byte.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

pub use mailer::*;
pub use owner::*;
