//! Types for the publication search system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One publication returned by the search provider for a keyword.
///
/// Ephemeral: consumed to produce a fingerprint and, if new, a stored
/// seen-result row. Missing fields are empty strings, never rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CandidateResult {
    /// Publication title.
    pub title: String,
    /// Canonical URL (publisher or scholar landing page).
    pub url: String,
    /// Author list flattened to a single comma-separated string.
    pub authors: String,
    /// Publication year as reported by the provider.
    pub year: String,
}

impl CandidateResult {
    pub fn new(title: &str, url: &str, authors: &str, year: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            authors: authors.to_string(),
            year: year.to_string(),
        }
    }
}

/// Errors that can occur during a provider fetch.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider API key not configured")]
    MissingApiKey,

    #[error("Provider request failed: {0}")]
    Transport(String),

    #[error("Provider request timed out")]
    Timeout,

    #[error("Provider API error: {0}")]
    Api(String),

    #[error("Failed to decode provider response: {0}")]
    Decode(String),
}
