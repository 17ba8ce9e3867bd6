//! Cycle runner implementation.
//!
//! Keywords are processed one at a time, candidates within a keyword one at
//! a time. The claim-then-notify-or-release sequence is the correctness
//! mechanism: a durable "seen" row exists only once its notification has
//! actually been delivered.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::WatcherConfig;
use crate::fingerprint::fingerprint;
use crate::metrics;
use crate::notifier::{Notifier, NotifyError};
use crate::provider::SearchProvider;
use crate::store::{ClaimOutcome, StoreError, WatchStore};

use super::types::{CycleError, CycleReport, FailureKind, KeywordFailure};

/// Outcome of scanning one keyword.
struct KeywordScan {
    new_items: u32,
    failure: Option<KeywordFailure>,
}

/// The cycle runner - one sequential pass over all registered keywords.
pub struct CycleRunner {
    config: WatcherConfig,
    store: Arc<dyn WatchStore>,
    provider: Arc<dyn SearchProvider>,
    notifier: Arc<dyn Notifier>,
}

impl CycleRunner {
    /// Create a new cycle runner.
    pub fn new(
        config: WatcherConfig,
        store: Arc<dyn WatchStore>,
        provider: Arc<dyn SearchProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            store,
            provider,
            notifier,
        }
    }

    /// Run one full cycle over a snapshot of the keyword list.
    ///
    /// Keyword-scoped failures (provider fetch, notification delivery) are
    /// recorded in the report and do not abort the cycle. Store errors do:
    /// without a reachable store the claim/release protocol cannot hold.
    pub async fn run_cycle(&self) -> Result<CycleReport, CycleError> {
        let started = Instant::now();

        // Snapshot once; keywords added or removed mid-cycle do not affect
        // this cycle's scope.
        let keywords = match self.store.list_keywords() {
            Ok(keywords) => keywords,
            Err(e) => {
                metrics::CYCLES_TOTAL.with_label_values(&["failed"]).inc();
                return Err(CycleError::Store(e));
            }
        };

        debug!(keywords = keywords.len(), "Starting watch cycle");
        let mut report = CycleReport::default();

        for (idx, keyword) in keywords.iter().enumerate() {
            // Pacing between keywords, courtesy toward the provider.
            if idx > 0 && self.config.keyword_pace_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.keyword_pace_ms)).await;
            }

            match self.process_keyword(&keyword.term).await {
                Ok(scan) => {
                    report.new_items += scan.new_items;
                    report.keywords_scanned += 1;
                    if let Some(failure) = scan.failure {
                        warn!(
                            term = %failure.term,
                            kind = ?failure.kind,
                            error = %failure.error,
                            "Keyword failed, continuing cycle"
                        );
                        report.keyword_failures.push(failure);
                    }
                }
                Err(e) => {
                    // Store unreachable: abort rather than risk inconsistent
                    // claim/notify state for the remaining keywords.
                    metrics::CYCLES_TOTAL.with_label_values(&["failed"]).inc();
                    return Err(CycleError::Store(e));
                }
            }
        }

        report.duration_ms = started.elapsed().as_millis() as u64;
        metrics::CYCLES_TOTAL.with_label_values(&["ok"]).inc();
        metrics::CYCLE_DURATION
            .with_label_values(&["ok"])
            .observe(started.elapsed().as_secs_f64());

        if report.new_items > 0 {
            info!(
                new_items = report.new_items,
                keywords = report.keywords_scanned,
                "Watch cycle found new papers"
            );
        } else {
            debug!(keywords = report.keywords_scanned, "Watch cycle found nothing new");
        }

        Ok(report)
    }

    /// Scan one keyword: fetch candidates, claim and notify each new one.
    ///
    /// Returns Err only for store failures; provider and notify failures are
    /// folded into the scan result.
    async fn process_keyword(&self, term: &str) -> Result<KeywordScan, StoreError> {
        let candidates = match self
            .provider
            .search(term, self.config.per_keyword_limit)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                metrics::PROVIDER_FAILURES_TOTAL.inc();
                return Ok(KeywordScan {
                    new_items: 0,
                    failure: Some(KeywordFailure {
                        term: term.to_string(),
                        kind: FailureKind::Provider,
                        error: e.to_string(),
                    }),
                });
            }
        };

        let mut new_items = 0;
        for candidate in &candidates {
            let fp = fingerprint(
                &candidate.title,
                &candidate.authors,
                &candidate.year,
                &candidate.url,
            );

            match self.store.claim(term, &fp, candidate)? {
                ClaimOutcome::AlreadySeen => continue,
                ClaimOutcome::Claimed => {
                    if let Err(notify_err) = self.notifier.notify(term, candidate).await {
                        // Release the claim before recording the failure so
                        // the item is retried next cycle instead of being
                        // marked delivered-but-never-notified.
                        self.store.release(term, &fp)?;
                        metrics::NOTIFY_FAILURES_TOTAL
                            .with_label_values(&[notify_cause(&notify_err)])
                            .inc();
                        return Ok(KeywordScan {
                            new_items,
                            failure: Some(KeywordFailure {
                                term: term.to_string(),
                                kind: FailureKind::Notify,
                                error: notify_err.to_string(),
                            }),
                        });
                    }
                    new_items += 1;
                    metrics::NEW_ITEMS_TOTAL.inc();
                }
            }
        }

        Ok(KeywordScan {
            new_items,
            failure: None,
        })
    }
}

fn notify_cause(error: &NotifyError) -> &'static str {
    match error {
        NotifyError::MissingWebhook => "missing_webhook",
        NotifyError::Transport(_) => "transport",
        NotifyError::Timeout => "timeout",
        NotifyError::Status(_) => "status",
    }
}
