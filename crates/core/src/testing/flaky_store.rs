//! Failure-injecting store wrapper for testing.

use std::sync::Mutex;

use crate::provider::CandidateResult;
use crate::store::{
    ClaimOutcome, Keyword, SeenResult, SqliteWatchStore, StoreError, StoreStats, WatchStore,
};

/// A `WatchStore` wrapper that delegates to an in-memory `SqliteWatchStore`
/// but can be told to fail claims or releases, simulating the database
/// becoming unreachable mid-cycle.
pub struct FlakyStore {
    inner: SqliteWatchStore,
    fail_claims: Mutex<bool>,
    fail_releases: Mutex<bool>,
}

impl std::fmt::Debug for FlakyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlakyStore").finish_non_exhaustive()
    }
}

impl FlakyStore {
    /// Create a flaky store over a fresh in-memory database, with no
    /// failures configured.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            inner: SqliteWatchStore::in_memory()?,
            fail_claims: Mutex::new(false),
            fail_releases: Mutex::new(false),
        })
    }

    /// Fail every claim until `recover` is called.
    pub fn fail_claims(&self) {
        *self.fail_claims.lock().unwrap() = true;
    }

    /// Fail every release until `recover` is called.
    pub fn fail_releases(&self) {
        *self.fail_releases.lock().unwrap() = true;
    }

    /// Stop injecting failures.
    pub fn recover(&self) {
        *self.fail_claims.lock().unwrap() = false;
        *self.fail_releases.lock().unwrap() = false;
    }

    fn unreachable_error(op: &str) -> StoreError {
        StoreError::Database(format!("simulated {} failure", op))
    }
}

impl WatchStore for FlakyStore {
    fn add_keyword(&self, term: &str) -> Result<Keyword, StoreError> {
        self.inner.add_keyword(term)
    }

    fn remove_keyword(&self, term: &str) -> Result<(), StoreError> {
        self.inner.remove_keyword(term)
    }

    fn list_keywords(&self) -> Result<Vec<Keyword>, StoreError> {
        self.inner.list_keywords()
    }

    fn claim(
        &self,
        term: &str,
        fingerprint: &str,
        candidate: &CandidateResult,
    ) -> Result<ClaimOutcome, StoreError> {
        if *self.fail_claims.lock().unwrap() {
            return Err(Self::unreachable_error("claim"));
        }
        self.inner.claim(term, fingerprint, candidate)
    }

    fn release(&self, term: &str, fingerprint: &str) -> Result<(), StoreError> {
        if *self.fail_releases.lock().unwrap() {
            return Err(Self::unreachable_error("release"));
        }
        self.inner.release(term, fingerprint)
    }

    fn recent(&self, term: Option<&str>, limit: u32) -> Result<Vec<SeenResult>, StoreError> {
        self.inner.recent(term, limit)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        self.inner.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[test]
    fn test_delegates_when_healthy() {
        let store = FlakyStore::in_memory().unwrap();
        store.add_keyword("kw").unwrap();

        let outcome = store
            .claim("kw", "fp-1", &fixtures::candidate("P1"))
            .unwrap();
        assert_eq!(outcome, ClaimOutcome::Claimed);
        assert_eq!(store.stats().unwrap().seen_results, 1);

        store.release("kw", "fp-1").unwrap();
        assert_eq!(store.stats().unwrap().seen_results, 0);
    }

    #[test]
    fn test_claim_failure_injection_and_recovery() {
        let store = FlakyStore::in_memory().unwrap();
        store.add_keyword("kw").unwrap();
        store.fail_claims();

        assert!(store
            .claim("kw", "fp-1", &fixtures::candidate("P1"))
            .is_err());
        // Nothing reached the underlying database.
        assert_eq!(store.stats().unwrap().seen_results, 0);

        store.recover();
        assert!(store
            .claim("kw", "fp-1", &fixtures::candidate("P1"))
            .is_ok());
    }

    #[test]
    fn test_release_failure_leaves_row_in_place() {
        let store = FlakyStore::in_memory().unwrap();
        store.add_keyword("kw").unwrap();
        store
            .claim("kw", "fp-1", &fixtures::candidate("P1"))
            .unwrap();

        store.fail_releases();
        assert!(store.release("kw", "fp-1").is_err());
        assert_eq!(store.stats().unwrap().seen_results, 1);
    }
}
