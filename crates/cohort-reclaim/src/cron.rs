//! Cron reclamation strategy
//!
//! Budgeted drain for a recurring background sweep: each `process()` call
//! handles candidates until the count or wall-time budget is spent,
//! deferring the remainder to the next scheduled run. Candidates are
//! committed one at a time, so an interrupted run loses no progress and
//! a faulted candidate stays queued for the next run.

use crate::content::ContentStore;
use crate::error::ReclaimError;
use crate::queue::OrphanQueue;
use crate::strategy::{reclaim_candidate, ReclaimStrategy, SweepReport};
use cohort_index::AudienceIndex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default per-run candidate budget
pub(crate) const DEFAULT_ITEM_BUDGET: usize = 100;

/// Default per-run wall-time budget
pub(crate) const DEFAULT_TIME_BUDGET: Duration = Duration::from_millis(500);

/// Budgeted drain driven by a periodic scheduler
#[derive(Debug)]
pub struct CronStrategy {
    index: Arc<AudienceIndex>,
    queue: Arc<OrphanQueue>,
    store: Arc<dyn ContentStore>,
    item_budget: usize,
    time_budget: Duration,
}

impl CronStrategy {
    /// Create cron strategy with default budgets
    #[inline]
    #[must_use]
    pub fn new(
        index: Arc<AudienceIndex>,
        queue: Arc<OrphanQueue>,
        store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            index,
            queue,
            store,
            item_budget: DEFAULT_ITEM_BUDGET,
            time_budget: DEFAULT_TIME_BUDGET,
        }
    }

    /// With per-run candidate budget (clamped to at least 1)
    #[inline]
    #[must_use]
    pub fn with_item_budget(mut self, budget: usize) -> Self {
        self.item_budget = budget.max(1);
        self
    }

    /// With per-run wall-time budget
    #[inline]
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }
}

impl ReclaimStrategy for CronStrategy {
    fn process(&self) -> Result<SweepReport, ReclaimError> {
        let started = Instant::now();
        let mut report = SweepReport::default();

        while report.handled() < self.item_budget && started.elapsed() < self.time_budget {
            let Some(content) = self.queue.claim(1).first().copied() else {
                break;
            };

            match reclaim_candidate(&self.index, self.store.as_ref(), content) {
                Ok(deleted) => {
                    self.queue.commit(1);
                    if deleted {
                        report.deleted += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                Err(fault) => {
                    report.remaining = self.queue.len();
                    return Err(ReclaimError::Processing { fault, report });
                }
            }
        }

        report.remaining = self.queue.len();
        debug!(
            handled = report.handled(),
            remaining = report.remaining,
            "cron sweep run complete"
        );
        Ok(report)
    }

    fn name(&self) -> &'static str {
        "cron"
    }
}
