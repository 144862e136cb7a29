//! Batch reclamation strategy
//!
//! One fixed-size chunk per `process()` call, for user-facing bulk group
//! deletion: the external batch/progress collaborator keeps calling until
//! the report says the queue is drained, displaying progress between
//! calls. The queue cursor only advances when a whole chunk succeeds, so
//! a chunk hit by a fault is retried in full on the next tick.

use crate::content::ContentStore;
use crate::error::ReclaimError;
use crate::queue::OrphanQueue;
use crate::strategy::{reclaim_candidate, ReclaimStrategy, SweepReport};
use cohort_index::AudienceIndex;
use std::sync::Arc;
use tracing::debug;

/// Default candidates per chunk
pub(crate) const DEFAULT_CHUNK_SIZE: usize = 50;

/// Chunked sweep across multiple scheduler ticks
#[derive(Debug)]
pub struct BatchStrategy {
    index: Arc<AudienceIndex>,
    queue: Arc<OrphanQueue>,
    store: Arc<dyn ContentStore>,
    chunk_size: usize,
}

impl BatchStrategy {
    /// Create batch strategy with the default chunk size
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
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// With chunk size (clamped to at least 1)
    #[inline]
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Candidates processed per invocation
    #[inline]
    #[must_use]
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl ReclaimStrategy for BatchStrategy {
    fn process(&self) -> Result<SweepReport, ReclaimError> {
        let chunk = self.queue.claim(self.chunk_size);
        let mut report = SweepReport::default();

        for content in &chunk {
            match reclaim_candidate(&self.index, self.store.as_ref(), *content) {
                Ok(true) => report.deleted += 1,
                Ok(false) => report.skipped += 1,
                Err(fault) => {
                    // Chunk not committed: the whole chunk is re-claimed
                    // next tick. Deletions already applied are skipped on
                    // retry because their index entries are gone.
                    report.remaining = self.queue.len();
                    return Err(ReclaimError::Processing { fault, report });
                }
            }
        }

        self.queue.commit(chunk.len());
        report.remaining = self.queue.len();
        debug!(
            chunk = chunk.len(),
            deleted = report.deleted,
            remaining = report.remaining,
            "batch chunk complete"
        );
        Ok(report)
    }

    fn name(&self) -> &'static str {
        "batch"
    }
}
