//! Content store seam
//!
//! The reclamation strategies never own content lifetime; deletion goes
//! through this trait, implemented by the external content-lifecycle
//! collaborator.

use crate::error::ProcessingFault;
use cohort_types::ContentId;

/// External content storage the reclamation sweep deletes through
///
/// Implementations must make `delete` idempotent: deleting content that is
/// already gone is a success, so a retried chunk never fails on its own
/// earlier progress.
pub trait ContentStore: Send + Sync + std::fmt::Debug {
    /// Delete one content item
    ///
    /// # Errors
    /// Returns [`ProcessingFault`] on unrecoverable storage failure; the
    /// owning strategy surfaces it and retries at its natural cadence.
    fn delete(&self, content: ContentId) -> Result<(), ProcessingFault>;
}
