//! Reclamation strategy trait, configuration and registry
//!
//! Strategies share the single `process()` capability; which one runs is a
//! configuration decision made at construction time through the
//! name-keyed [`StrategyRegistry`], never runtime type inspection.

use crate::batch::BatchStrategy;
use crate::content::ContentStore;
use crate::cron::CronStrategy;
use crate::error::{ProcessingFault, ReclaimError};
use crate::queue::OrphanQueue;
use crate::simple::SimpleStrategy;
use cohort_index::AudienceIndex;
use cohort_types::ContentId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of one `process()` invocation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Orphans deleted through the content store
    pub deleted: usize,

    /// Candidates skipped (re-attached to a group, or already gone)
    pub skipped: usize,

    /// Candidates still queued after this invocation
    pub remaining: usize,
}

impl SweepReport {
    /// Total candidates handled this invocation
    #[inline]
    #[must_use]
    pub fn handled(&self) -> usize {
        self.deleted + self.skipped
    }

    /// Check whether the queue was drained
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

/// Pluggable policy for processing orphan candidates
pub trait ReclaimStrategy: Send + Sync + std::fmt::Debug {
    /// Process queued orphan candidates according to this strategy's cadence
    ///
    /// # Errors
    /// Returns [`ReclaimError::Processing`] on unrecoverable storage
    /// failure; completed work before the fault stays applied and the
    /// report on the error records it.
    fn process(&self) -> Result<SweepReport, ReclaimError>;

    /// Strategy name (for logging/serialization)
    fn name(&self) -> &'static str;
}

/// Reclaim one candidate: delete if its audience is empty, skip otherwise
///
/// Candidates whose forward entry is gone were handled by an earlier
/// (possibly retried) chunk; candidates that regained a reference since
/// enqueueing are left alone.
pub(crate) fn reclaim_candidate(
    index: &AudienceIndex,
    store: &dyn ContentStore,
    content: ContentId,
) -> Result<bool, ProcessingFault> {
    match index.groups_of(content) {
        Some(refs) if refs.is_empty() => {
            store.delete(content)?;
            index.remove_content(content);
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Reclamation configuration
///
/// `strategy` is the selection key resolved against a
/// [`StrategyRegistry`]; the remaining fields bound per-invocation work
/// for the deferred strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReclaimConfig {
    /// Strategy selection key ("simple", "batch" or "cron")
    pub strategy: String,

    /// Candidates per batch chunk
    pub chunk_size: usize,

    /// Max candidates per cron run
    pub cron_item_budget: usize,

    /// Max wall time per cron run, in milliseconds
    pub cron_time_budget_ms: u64,
}

impl ReclaimConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With strategy selection key
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    /// With batch chunk size
    #[inline]
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// With cron per-run item budget
    #[inline]
    #[must_use]
    pub fn with_cron_item_budget(mut self, budget: usize) -> Self {
        self.cron_item_budget = budget;
        self
    }

    /// With cron per-run time budget
    #[inline]
    #[must_use]
    pub fn with_cron_time_budget(mut self, budget: Duration) -> Self {
        self.cron_time_budget_ms = u64::try_from(budget.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Cron time budget as a duration
    #[inline]
    #[must_use]
    pub fn cron_time_budget(&self) -> Duration {
        Duration::from_millis(self.cron_time_budget_ms)
    }
}

impl Default for ReclaimConfig {
    fn default() -> Self {
        Self {
            strategy: "simple".to_string(),
            chunk_size: 50,
            cron_item_budget: 100,
            cron_time_budget_ms: 500,
        }
    }
}

/// Registry of available reclamation strategy names
#[derive(Debug, Default, Clone)]
pub struct StrategyRegistry {
    strategies: HashSet<String>,
}

impl StrategyRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashSet::new(),
        }
    }

    /// Create registry with built-in strategies
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("simple");
        registry.register("batch");
        registry.register("cron");
        registry
    }

    /// Register a strategy name
    pub fn register(&mut self, name: &str) {
        self.strategies.insert(name.to_string());
    }

    /// Check if strategy exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains(name)
    }

    /// List all registered strategy names
    #[inline]
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.strategies.iter().map(String::as_str).collect()
    }

    /// Get number of registered strategies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Build the strategy selected by the configuration key
    ///
    /// # Errors
    /// Returns [`ReclaimError::UnknownStrategy`] when the key is not
    /// registered or has no built-in implementation.
    pub fn build(
        &self,
        config: &ReclaimConfig,
        index: Arc<AudienceIndex>,
        queue: Arc<OrphanQueue>,
        store: Arc<dyn ContentStore>,
    ) -> Result<Box<dyn ReclaimStrategy>, ReclaimError> {
        if !self.contains(&config.strategy) {
            return Err(ReclaimError::UnknownStrategy {
                name: config.strategy.clone(),
            });
        }

        match config.strategy.as_str() {
            "simple" => Ok(Box::new(SimpleStrategy::new(index, queue, store))),
            "batch" => Ok(Box::new(
                BatchStrategy::new(index, queue, store).with_chunk_size(config.chunk_size),
            )),
            "cron" => Ok(Box::new(
                CronStrategy::new(index, queue, store)
                    .with_item_budget(config.cron_item_budget)
                    .with_time_budget(config.cron_time_budget()),
            )),
            _ => Err(ReclaimError::UnknownStrategy {
                name: config.strategy.clone(),
            }),
        }
    }
}
