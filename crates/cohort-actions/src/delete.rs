//! Membership delete action
//!
//! Postcondition: after `execute`, the user is no longer a member of the
//! group in any of {active, blocked, pending}. Deleting an absent
//! membership is a no-op success, so bulk retries never error.

use crate::action::{ActionError, ActionOutcome, MembershipAction};
use cohort_membership::MembershipStore;
use cohort_types::{GroupId, UserId};
use std::sync::Arc;
use tracing::debug;

/// Deletes the targeted membership record
#[derive(Debug, Clone)]
pub struct DeleteMembership {
    store: Arc<MembershipStore>,
}

impl DeleteMembership {
    /// Create delete action over a store
    #[inline]
    #[must_use]
    pub fn new(store: Arc<MembershipStore>) -> Self {
        Self { store }
    }
}

impl MembershipAction for DeleteMembership {
    fn execute(&self, user: UserId, group: GroupId) -> Result<ActionOutcome, ActionError> {
        if self.store.delete(user, group) {
            debug!(%user, %group, "delete action removed membership");
            Ok(ActionOutcome::Applied)
        } else {
            Ok(ActionOutcome::Noop)
        }
    }

    fn name(&self) -> &'static str {
        "membership_delete"
    }
}
