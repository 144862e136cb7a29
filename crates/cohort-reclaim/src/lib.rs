//! Cohort orphan reclamation
//!
//! When a group is deleted, content that referenced only that group becomes
//! orphaned and must be removed; content that also references other groups
//! merely loses the stale reference. This crate owns that sweep:
//!
//! - [`OrphanQueue`]: durable FIFO of deletion candidates with
//!   claim/commit chunk semantics
//! - [`ContentStore`]: the seam to the external content-lifecycle
//!   collaborator that actually deletes content
//! - [`ReclaimStrategy`]: the single `process()` capability, implemented
//!   by [`SimpleStrategy`] (synchronous full drain), [`BatchStrategy`]
//!   (one bounded chunk per call) and [`CronStrategy`] (budgeted drain per
//!   scheduled run)
//! - [`StrategyRegistry`] / [`ReclaimConfig`]: name-keyed strategy
//!   selection at construction time
//! - [`ReclaimEngine`]: the orchestrator the entity-lifecycle collaborator
//!   notifies on group deletion
//! - [`CronSweeper`]: tokio-driven periodic invocation of `process()`

mod batch;
mod content;
mod cron;
mod engine;
mod error;
mod queue;
mod simple;
mod strategy;
mod sweeper;

pub use batch::BatchStrategy;
pub use content::ContentStore;
pub use cron::CronStrategy;
pub use engine::ReclaimEngine;
pub use error::{ProcessingFault, ReclaimError};
pub use queue::OrphanQueue;
pub use simple::SimpleStrategy;
pub use strategy::{ReclaimConfig, ReclaimStrategy, StrategyRegistry, SweepReport};
pub use sweeper::{CronSweeper, SweeperConfig, SweeperHandle};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
