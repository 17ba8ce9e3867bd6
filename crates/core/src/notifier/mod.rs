//! Notification delivery abstraction.
//!
//! A `Notifier` delivers one formatted message per newly found result to an
//! external channel. Delivery is not idempotent for the receiver: a repeated
//! call is a visible duplicate, which is why the cycle runner notifies at
//! most once per successfully claimed item.

mod discord;
mod types;

pub use discord::DiscordNotifier;
pub use types::*;

use async_trait::async_trait;

use crate::provider::CandidateResult;

/// Trait for notification channels.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message for a newly found result.
    ///
    /// One outbound attempt per call; no internal retry. Retry happens at
    /// the cycle level through the store's claim/release protocol.
    async fn notify(&self, keyword: &str, result: &CandidateResult) -> Result<(), NotifyError>;
}
