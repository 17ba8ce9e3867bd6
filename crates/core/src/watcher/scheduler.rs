//! Cycle scheduler - interval timer plus on-demand triggers.
//!
//! Owns the run-lock that serializes scheduled and manual cycles: at most
//! one cycle executes at a time, and a manual trigger arriving while a
//! scheduled cycle is in flight awaits it rather than running concurrently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, Mutex, RwLock};
use tracing::{error, info, warn};

use super::runner::CycleRunner;
use super::types::{CycleError, CycleReport, LastRun};

/// Current status of the scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerStatus {
    /// Whether the interval loop is running.
    pub running: bool,
    /// Minutes between scheduled cycles (0 = on-demand only).
    pub schedule_minutes: u32,
    /// Whether a cycle is executing right now.
    pub cycle_in_flight: bool,
    /// The most recently finished cycle, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<LastRun>,
}

/// Drives the cycle runner on a fixed interval and exposes an on-demand
/// trigger, both serialized on a single run-lock.
pub struct CycleScheduler {
    runner: Arc<CycleRunner>,
    schedule_minutes: u32,

    // Runtime state
    running: Arc<AtomicBool>,
    run_lock: Arc<Mutex<()>>,
    last_run: Arc<RwLock<Option<LastRun>>>,
    shutdown_tx: broadcast::Sender<()>,
}

impl CycleScheduler {
    /// Create a new scheduler. `schedule_minutes == 0` disables the interval
    /// timer; cycles then run only through `trigger_now`.
    pub fn new(runner: Arc<CycleRunner>, schedule_minutes: u32) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            runner,
            schedule_minutes,
            running: Arc::new(AtomicBool::new(false)),
            run_lock: Arc::new(Mutex::new(())),
            last_run: Arc::new(RwLock::new(None)),
            shutdown_tx,
        }
    }

    /// Start the scheduler (spawns the interval loop).
    ///
    /// Runs one cycle immediately, then one per interval.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Scheduler already running");
            return;
        }

        info!(
            schedule_minutes = self.schedule_minutes,
            "Starting cycle scheduler"
        );

        let runner = Arc::clone(&self.runner);
        let run_lock = Arc::clone(&self.run_lock);
        let last_run = Arc::clone(&self.last_run);
        let running = Arc::clone(&self.running);
        let schedule_minutes = self.schedule_minutes;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!("Cycle loop started");

            // Run once at startup.
            Self::run_locked(&runner, &run_lock, &last_run).await;

            if schedule_minutes == 0 {
                info!("Interval timer disabled, cycles run on demand only");
                return;
            }

            let period = Duration::from_secs(schedule_minutes as u64 * 60);
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Cycle loop received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(period) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        Self::run_locked(&runner, &run_lock, &last_run).await;
                    }
                }
            }
            info!("Cycle loop stopped");
        });
    }

    /// Stop the scheduler. An in-flight cycle runs to completion; there is
    /// no mid-cycle cancellation.
    pub fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Scheduler not running");
            return;
        }

        info!("Stopping cycle scheduler");
        let _ = self.shutdown_tx.send(());
    }

    /// Run one cycle now, on demand.
    ///
    /// Awaits the run-lock, so a trigger arriving during a scheduled cycle
    /// waits for it instead of racing it.
    pub async fn trigger_now(&self) -> Result<CycleReport, CycleError> {
        let _guard = self.run_lock.lock().await;
        let result = self.runner.run_cycle().await;
        *self.last_run.write().await = Some(Self::summarize(&result));
        if let Err(ref e) = result {
            error!("On-demand cycle failed: {}", e);
        }
        result
    }

    /// Get current scheduler status.
    pub async fn status(&self) -> SchedulerStatus {
        let cycle_in_flight = self.run_lock.try_lock().is_err();
        SchedulerStatus {
            running: self.running.load(Ordering::Relaxed),
            schedule_minutes: self.schedule_minutes,
            cycle_in_flight,
            last_run: self.last_run.read().await.clone(),
        }
    }

    /// Run one cycle under the run-lock, recording the outcome. Used by the
    /// interval loop, which logs failures rather than propagating them.
    async fn run_locked(
        runner: &Arc<CycleRunner>,
        run_lock: &Arc<Mutex<()>>,
        last_run: &Arc<RwLock<Option<LastRun>>>,
    ) {
        let _guard = run_lock.lock().await;
        let result = runner.run_cycle().await;
        if let Err(ref e) = result {
            error!("Scheduled cycle failed: {}", e);
        }
        *last_run.write().await = Some(Self::summarize(&result));
    }

    fn summarize(result: &Result<CycleReport, CycleError>) -> LastRun {
        match result {
            Ok(report) => LastRun {
                finished_at: Utc::now(),
                new_items: report.new_items,
                keywords_scanned: report.keywords_scanned,
                error: None,
            },
            Err(e) => LastRun {
                finished_at: Utc::now(),
                new_items: 0,
                keywords_scanned: 0,
                error: Some(e.to_string()),
            },
        }
    }
}
