//! Mock search provider for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use crate::provider::{CandidateResult, ProviderError, SearchProvider};

/// Mock implementation of the SearchProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable candidates per keyword
/// - Simulate per-keyword failures
/// - Record search calls for assertions
///
/// Configuration methods are synchronous so tests can set up state without
/// awaiting; interior state lives behind std mutexes.
pub struct MockProvider {
    /// Candidates to return, keyed by keyword.
    results: Mutex<HashMap<String, Vec<CandidateResult>>>,
    /// Keywords whose searches fail.
    failing: Mutex<HashSet<String>>,
    /// Recorded (keyword, limit) search calls.
    searches: Mutex<Vec<(String, u32)>>,
    /// Simulated latency per search.
    delay: Mutex<Option<Duration>>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider").finish_non_exhaustive()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider with no configured results.
    pub fn new() -> Self {
        Self {
            results: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashSet::new()),
            searches: Mutex::new(Vec::new()),
            delay: Mutex::new(None),
        }
    }

    /// Set the candidates returned for a keyword.
    pub fn set_results(&self, keyword: &str, candidates: Vec<CandidateResult>) {
        self.results
            .lock()
            .unwrap()
            .insert(keyword.to_string(), candidates);
    }

    /// Make searches for a keyword fail with a transport error.
    pub fn fail_keyword(&self, keyword: &str) {
        self.failing.lock().unwrap().insert(keyword.to_string());
    }

    /// Clear a previously configured failure.
    pub fn recover_keyword(&self, keyword: &str) {
        self.failing.lock().unwrap().remove(keyword);
    }

    /// Add simulated latency to every search.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Recorded search calls as (keyword, limit) pairs.
    pub fn recorded_searches(&self) -> Vec<(String, u32)> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    async fn search(
        &self,
        keyword: &str,
        limit: u32,
    ) -> Result<Vec<CandidateResult>, ProviderError> {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.searches
            .lock()
            .unwrap()
            .push((keyword.to_string(), limit));

        if self.failing.lock().unwrap().contains(keyword) {
            return Err(ProviderError::Transport(format!(
                "simulated failure for '{}'",
                keyword
            )));
        }

        let results = self.results.lock().unwrap();
        Ok(results
            .get(keyword)
            .map(|candidates| candidates.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }
}
