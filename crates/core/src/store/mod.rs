//! Watch store - keywords and the per-keyword dedup history.
//!
//! The store owns all persisted state: registered keywords and, per keyword,
//! the set of result fingerprints that have already been delivered. The
//! `UNIQUE(kw_term, fingerprint)` constraint is the sole mechanism that
//! prevents duplicate notifications.

mod sqlite;
mod types;

pub use sqlite::SqliteWatchStore;
pub use types::*;

use crate::provider::CandidateResult;

/// Trait for watcher persistence.
pub trait WatchStore: Send + Sync {
    /// Register a keyword. Trims the term; registering an existing term is a
    /// no-op that returns the stored row.
    fn add_keyword(&self, term: &str) -> Result<Keyword, StoreError>;

    /// Remove a keyword and cascade-delete all its seen-result rows, so a
    /// re-added keyword starts with a clean dedup history.
    fn remove_keyword(&self, term: &str) -> Result<(), StoreError>;

    /// List registered keywords in ascending lexicographic term order.
    fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError>;

    /// Atomically claim a (keyword, fingerprint) pair.
    ///
    /// Inserts a seen-result row capturing the candidate's fields and the
    /// current UTC time. If the pair already exists nothing changes and
    /// `AlreadySeen` is returned; a claim conflict is an expected outcome,
    /// not an error.
    fn claim(
        &self,
        term: &str,
        fingerprint: &str,
        candidate: &CandidateResult,
    ) -> Result<ClaimOutcome, StoreError>;

    /// Undo a claim so the item is retried on a future cycle. No-op when the
    /// pair does not exist; safe to call twice.
    fn release(&self, term: &str, fingerprint: &str) -> Result<(), StoreError>;

    /// Recently seen results, newest first, optionally scoped to one keyword.
    fn recent(&self, term: Option<&str>, limit: u32) -> Result<Vec<SeenResult>, StoreError>;

    /// Store statistics for status reporting.
    fn stats(&self) -> Result<StoreStats, StoreError>;
}
