//! Testing utilities and mock implementations for cycle tests.
//!
//! This module provides mock implementations of the external service traits
//! plus a failure-injecting store wrapper, allowing full cycle testing
//! without a search API or a webhook endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use scholar_watcher_core::testing::{MockNotifier, MockProvider};
//!
//! let provider = MockProvider::new();
//! let notifier = MockNotifier::new();
//!
//! // Configure mock responses
//! provider.set_results("transformers", vec![/* candidates */]);
//! notifier.fail_next();
//!
//! // Wire into a CycleRunner...
//! ```

mod flaky_store;
mod mock_notifier;
mod mock_provider;

pub use flaky_store::FlakyStore;
pub use mock_notifier::{Delivery, MockNotifier};
pub use mock_provider::MockProvider;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::provider::CandidateResult;

    /// Create a test candidate with reasonable defaults.
    pub fn candidate(title: &str) -> CandidateResult {
        CandidateResult {
            title: title.to_string(),
            url: format!(
                "https://example.org/{}",
                title.to_lowercase().replace(' ', "-")
            ),
            authors: "A. Author, B. Author".to_string(),
            year: "2024".to_string(),
        }
    }

    /// Create a test candidate with an explicit year.
    pub fn candidate_from(title: &str, year: &str) -> CandidateResult {
        let mut c = candidate(title);
        c.year = year.to_string();
        c
    }
}
