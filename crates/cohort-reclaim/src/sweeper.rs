//! Periodic cron sweeper
//!
//! Tokio task invoking the engine's `process()` at a fixed period,
//! independent of any request/response cycle. Faulted runs are logged and
//! left to the next tick; the queue keeps the unprocessed remainder.

use crate::engine::ReclaimEngine;
use crate::strategy::SweepReport;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

/// Sweeper configuration
#[derive(Debug, Clone, Copy)]
pub struct SweeperConfig {
    /// Time between sweep runs
    pub period: Duration,
}

impl SweeperConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With sweep period
    #[inline]
    #[must_use]
    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(60),
        }
    }
}

/// Handle for stopping a running sweeper
#[derive(Debug, Clone)]
pub struct SweeperHandle {
    shutdown: Arc<AtomicBool>,
}

impl SweeperHandle {
    /// Request the sweeper to stop after its current run
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Check whether stop was requested
    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }
}

/// Periodic driver for a cron-configured engine
#[derive(Debug)]
pub struct CronSweeper {
    engine: Arc<ReclaimEngine>,
    config: SweeperConfig,
    shutdown: Arc<AtomicBool>,
}

impl CronSweeper {
    /// Create sweeper over an engine
    #[must_use]
    pub fn new(engine: Arc<ReclaimEngine>, config: SweeperConfig) -> Self {
        Self {
            engine,
            config,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for stopping the sweeper from outside the task
    #[must_use]
    pub fn handle(&self) -> SweeperHandle {
        SweeperHandle {
            shutdown: Arc::clone(&self.shutdown),
        }
    }

    /// Run until stopped
    ///
    /// Each tick invokes the engine once. A processing fault is logged and
    /// retried by the queue's own semantics on the next tick.
    pub async fn run(self) {
        let mut ticker = interval(self.config.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }

            match self.engine.process() {
                Ok(report) => log_run(&report),
                Err(err) => {
                    warn!(error = %err, "sweep run failed, remainder stays queued");
                }
            }
        }

        debug!("cron sweeper stopped");
    }
}

fn log_run(report: &SweepReport) {
    if report.handled() > 0 || report.remaining > 0 {
        debug!(
            deleted = report.deleted,
            skipped = report.skipped,
            remaining = report.remaining,
            "sweep run"
        );
    }
}
