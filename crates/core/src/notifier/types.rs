//! Types for the notification system.

use thiserror::Error;

/// Errors that can occur during notification delivery.
///
/// `MissingWebhook` fails every attempt deterministically and is kept
/// separate from `Transport` so an operator can tell "misconfigured" from
/// "transient outage" in logs and health reporting.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification webhook URL not configured")]
    MissingWebhook,

    #[error("Notification delivery failed: {0}")]
    Transport(String),

    #[error("Notification delivery timed out")]
    Timeout,

    #[error("Notification endpoint returned HTTP {0}")]
    Status(u16),
}

impl NotifyError {
    /// Whether the failure is a configuration problem rather than a
    /// transient delivery problem.
    pub fn is_configuration(&self) -> bool {
        matches!(self, NotifyError::MissingWebhook)
    }
}
