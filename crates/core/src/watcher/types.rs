//! Types for the watch cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::StoreError;

/// Outcome of one full cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleReport {
    /// Newly delivered items across all keywords.
    pub new_items: u32,
    /// Keywords that completed their scan (with or without a recorded
    /// keyword-scoped failure).
    pub keywords_scanned: u32,
    /// Keyword-scoped failures that did not abort the cycle.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keyword_failures: Vec<KeywordFailure>,
    /// How long the cycle took in milliseconds.
    pub duration_ms: u64,
}

/// A recoverable failure recorded while processing one keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordFailure {
    /// The keyword being processed.
    pub term: String,
    /// Which stage failed.
    pub kind: FailureKind,
    /// Human-readable cause.
    pub error: String,
}

/// The stage at which a keyword-scoped failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The provider fetch failed; the keyword was skipped entirely.
    Provider,
    /// A notification failed after a successful claim; the claim was
    /// released and the keyword's remaining candidates were skipped.
    Notify,
}

/// Errors that abort a cycle.
///
/// Only store unavailability is fatal: continuing without a reachable store
/// risks notifying without recording or recording without notifying.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Summary of the most recently finished cycle, kept by the scheduler for
/// status reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastRun {
    /// When the cycle finished (UTC).
    pub finished_at: DateTime<Utc>,
    /// Newly delivered items, when the cycle completed.
    pub new_items: u32,
    /// Keywords scanned, when the cycle completed.
    pub keywords_scanned: u32,
    /// Error message, when the cycle aborted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&FailureKind::Provider).unwrap(),
            "\"provider\""
        );
        assert_eq!(
            serde_json::to_string(&FailureKind::Notify).unwrap(),
            "\"notify\""
        );
    }

    #[test]
    fn test_cycle_report_skips_empty_failures() {
        let report = CycleReport {
            new_items: 3,
            keywords_scanned: 2,
            keyword_failures: vec![],
            duration_ms: 42,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("keyword_failures"));
    }
}
