//! Membership action trait and core types

use cohort_membership::MembershipError;
use cohort_types::{GroupId, UserId};

/// Result of a successfully executed action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action mutated the store
    Applied,

    /// The store was already in the target state
    Noop,
}

impl ActionOutcome {
    /// Check whether the action changed anything
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Membership action error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The targeted membership does not exist
    ///
    /// Role mutations require an existing target; only deletion treats
    /// absence as a no-op success.
    #[error("no membership to act on for user {user} in group {group}")]
    MembershipNotFound {
        /// Targeted user
        user: UserId,
        /// Targeted group
        group: GroupId,
    },

    /// The store rejected the operation
    #[error(transparent)]
    Store(#[from] MembershipError),
}

/// A membership action invocable by an external action-execution subsystem
///
/// Implementations apply exactly one store operation per `execute` call and
/// must either fully apply or not mutate at all. Actions are independently
/// invocable and safe to retry where the semantics are naturally
/// idempotent.
pub trait MembershipAction: Send + Sync + std::fmt::Debug {
    /// Apply the action to the membership identified by (user, group)
    ///
    /// # Errors
    /// Returns [`ActionError`] on validation failure; no partial mutation
    /// is left behind.
    fn execute(&self, user: UserId, group: GroupId) -> Result<ActionOutcome, ActionError>;

    /// Action name (for logging/serialization)
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_changed() {
        assert!(ActionOutcome::Applied.changed());
        assert!(!ActionOutcome::Noop.changed());
    }

    #[test]
    fn store_error_is_transparent() {
        let err = ActionError::Store(MembershipError::NotFound {
            user: UserId::new(),
            group: GroupId::new(),
        });
        assert!(err.to_string().contains("no membership"));
    }
}
