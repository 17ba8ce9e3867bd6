//! Types for the watch store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A registered search keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    /// The search term (unique, case-sensitive).
    pub term: String,
    /// When the keyword was registered.
    pub created_at: DateTime<Utc>,
}

/// A publication already delivered for one keyword.
///
/// Rows are created by a successful claim, never updated, and deleted only
/// when their owning keyword is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeenResult {
    /// Owning keyword term.
    pub kw_term: String,
    /// Content fingerprint (lowercase hex).
    pub fingerprint: String,
    /// Publication title.
    pub title: String,
    /// Canonical URL.
    pub url: String,
    /// Flattened author list.
    pub authors: String,
    /// Publication year.
    pub year: String,
    /// When the result was first claimed (UTC).
    pub first_seen: DateTime<Utc>,
}

/// Outcome of a claim attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// The pair was new; a row was inserted.
    Claimed,
    /// The pair already existed; nothing changed.
    AlreadySeen,
}

/// Store statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of registered keywords.
    pub keywords: u64,
    /// Number of seen-result rows across all keywords.
    pub seen_results: u64,
}

/// Errors for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Keyword not found: {0}")]
    NotFound(String),

    #[error("Invalid keyword term: {0}")]
    InvalidTerm(String),
}
