//! Simple reclamation strategy
//!
//! Synchronous, in the calling thread: drains the whole queue, committing
//! each candidate as it completes. Designed for low volume. A failure
//! mid-sweep leaves completed deletions applied; the failed candidate
//! stays queued, so retrying the sweep is idempotent.

use crate::content::ContentStore;
use crate::error::ReclaimError;
use crate::queue::OrphanQueue;
use crate::strategy::{reclaim_candidate, ReclaimStrategy, SweepReport};
use cohort_index::AudienceIndex;
use std::sync::Arc;
use tracing::debug;

/// Immediate synchronous sweep
#[derive(Debug)]
pub struct SimpleStrategy {
    index: Arc<AudienceIndex>,
    queue: Arc<OrphanQueue>,
    store: Arc<dyn ContentStore>,
}

impl SimpleStrategy {
    /// Create simple strategy
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
        }
    }
}

impl ReclaimStrategy for SimpleStrategy {
    fn process(&self) -> Result<SweepReport, ReclaimError> {
        let mut report = SweepReport::default();

        loop {
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
        debug!(deleted = report.deleted, skipped = report.skipped, "simple sweep complete");
        Ok(report)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}
