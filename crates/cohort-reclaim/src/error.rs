//! Error types for orphan reclamation
//!
//! Infrastructure faults ([`ReclaimError::Processing`]) are retried at the
//! owning strategy's natural cadence (next batch tick, next cron run),
//! never by the engine. The partial [`SweepReport`] rides along on the
//! error so progress stays observable.

use crate::strategy::SweepReport;
use cohort_types::ContentId;

/// Unrecoverable storage failure while deleting one content item
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("content store failure on {content}: {reason}")]
pub struct ProcessingFault {
    /// The content item the store failed on
    pub content: ContentId,

    /// Store-reported reason
    pub reason: String,
}

impl ProcessingFault {
    /// Create fault for a content item
    #[inline]
    #[must_use]
    pub fn new(content: ContentId, reason: impl Into<String>) -> Self {
        Self {
            content,
            reason: reason.into(),
        }
    }
}

/// Orphan reclamation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReclaimError {
    /// A sweep hit a storage fault
    ///
    /// Completed work before the fault stays applied; the failed candidate
    /// remains queued and is retried on the strategy's next invocation.
    #[error("sweep aborted after {} deletions: {fault}", report.deleted)]
    Processing {
        /// The underlying storage fault
        fault: ProcessingFault,
        /// Work completed before the fault
        report: SweepReport,
    },

    /// Configured strategy name is not registered
    #[error("unknown reclamation strategy '{name}'")]
    UnknownStrategy {
        /// The unresolved configuration key
        name: String,
    },
}

impl ReclaimError {
    /// Check if the owning strategy's next invocation will retry the work
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Processing { .. })
    }

    /// Partial progress report, when the error carries one
    #[inline]
    #[must_use]
    pub fn report(&self) -> Option<&SweepReport> {
        match self {
            Self::Processing { report, .. } => Some(report),
            Self::UnknownStrategy { .. } => None,
        }
    }
}
