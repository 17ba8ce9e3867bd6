//! The watch cycle - fetch, deduplicate, notify.
//!
//! A cycle is one pass over all registered keywords. Per keyword the runner
//! fetches candidates, claims each unseen fingerprint in the store, and
//! delivers a notification; a failed delivery releases the claim so the item
//! is retried on the next cycle. The scheduler drives cycles on a fixed
//! interval and serializes them against on-demand triggers.

mod runner;
mod scheduler;
mod types;

pub use runner::CycleRunner;
pub use scheduler::{CycleScheduler, SchedulerStatus};
pub use types::{CycleError, CycleReport, FailureKind, KeywordFailure, LastRun};
