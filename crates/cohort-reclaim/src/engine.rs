//! Reclamation engine
//!
//! Orchestrator between the audience index and the configured strategy.
//! The entity-lifecycle collaborator calls [`ReclaimEngine::on_group_deleted`]
//! exactly once per group deletion, after the group's own removal is
//! durable; the engine partitions affected content, queues the orphan
//! candidates, and leaves processing cadence entirely to the strategy.

use crate::content::ContentStore;
use crate::error::ReclaimError;
use crate::queue::OrphanQueue;
use crate::strategy::{ReclaimConfig, ReclaimStrategy, StrategyRegistry, SweepReport};
use cohort_index::{AudienceIndex, GroupRemoval};
use cohort_types::GroupId;
use std::sync::Arc;
use tracing::info;

/// Orphan reclamation orchestrator
///
/// Depends only on the strategy's `process()` contract; strategy selection
/// happens in [`ReclaimEngine::from_config`], not here.
#[derive(Debug)]
pub struct ReclaimEngine {
    index: Arc<AudienceIndex>,
    queue: Arc<OrphanQueue>,
    strategy: Box<dyn ReclaimStrategy>,
}

impl ReclaimEngine {
    /// Create engine over an already-built strategy
    #[must_use]
    pub fn new(
        index: Arc<AudienceIndex>,
        queue: Arc<OrphanQueue>,
        strategy: Box<dyn ReclaimStrategy>,
    ) -> Self {
        Self {
            index,
            queue,
            strategy,
        }
    }

    /// Create engine with the strategy selected by configuration
    ///
    /// # Errors
    /// Returns [`ReclaimError::UnknownStrategy`] when the configured key
    /// is not registered.
    pub fn from_config(
        config: &ReclaimConfig,
        index: Arc<AudienceIndex>,
        queue: Arc<OrphanQueue>,
        store: Arc<dyn ContentStore>,
    ) -> Result<Self, ReclaimError> {
        let strategy = StrategyRegistry::with_defaults().build(
            config,
            Arc::clone(&index),
            Arc::clone(&queue),
            store,
        )?;
        Ok(Self::new(index, queue, strategy))
    }

    /// Handle a group deletion
    ///
    /// Partitions content that referenced the group: orphaned items are
    /// queued for the strategy, detached items already had their stale
    /// reference dropped by the index and need no further work.
    pub fn on_group_deleted(&self, group: GroupId) -> GroupRemoval {
        let removal = self.index.on_group_deleted(group);
        self.queue.enqueue_all(removal.orphaned.iter().copied());

        info!(
            %group,
            orphaned = removal.orphaned.len(),
            detached = removal.detached.len(),
            strategy = self.strategy.name(),
            "group deletion queued for reclamation"
        );

        removal
    }

    /// Run the configured strategy once
    ///
    /// # Errors
    /// Propagates [`ReclaimError::Processing`] from the strategy; the
    /// engine itself never retries (that is the strategy's cadence).
    pub fn process(&self) -> Result<SweepReport, ReclaimError> {
        self.strategy.process()
    }

    /// Number of candidates awaiting processing
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Name of the configured strategy
    #[inline]
    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }
}
