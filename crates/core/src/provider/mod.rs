//! Publication search abstraction.
//!
//! This module provides a `SearchProvider` trait for fetching candidate
//! publications for a keyword from an external search backend (SerpAPI's
//! Google Scholar engine is the shipped implementation).

mod serpapi;
mod types;

pub use serpapi::SerpApiProvider;
pub use types::*;

use async_trait::async_trait;

/// Trait for publication search backends.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Fetch up to `limit` candidate results for a keyword.
    ///
    /// Results come back in the provider's own order (newest first for
    /// backends that support date sorting). Any failure is keyword-scoped:
    /// the caller skips the keyword and moves on.
    async fn search(&self, keyword: &str, limit: u32) -> Result<Vec<CandidateResult>, ProviderError>;
}
