//! Role mutation actions
//!
//! Add/remove a single role on a membership. Both are idempotent; both
//! require the target membership to exist.

use crate::action::{ActionError, ActionOutcome, MembershipAction};
use cohort_membership::{MembershipError, MembershipStore};
use cohort_types::{GroupId, RoleName, UserId};
use std::sync::Arc;
use tracing::debug;

/// Grants a single role to the targeted membership
#[derive(Debug, Clone)]
pub struct AddRole {
    store: Arc<MembershipStore>,
    role: RoleName,
}

impl AddRole {
    /// Create add-role action for a configured role name
    #[inline]
    #[must_use]
    pub fn new(store: Arc<MembershipStore>, role: RoleName) -> Self {
        Self { store, role }
    }

    /// The configured role
    #[inline]
    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }
}

impl MembershipAction for AddRole {
    fn execute(&self, user: UserId, group: GroupId) -> Result<ActionOutcome, ActionError> {
        match self.store.add_role(user, group, self.role.clone()) {
            Ok(true) => {
                debug!(%user, %group, role = %self.role, "role granted");
                Ok(ActionOutcome::Applied)
            }
            Ok(false) => Ok(ActionOutcome::Noop),
            Err(MembershipError::NotFound { user, group }) => {
                Err(ActionError::MembershipNotFound { user, group })
            }
            Err(other) => Err(other.into()),
        }
    }

    fn name(&self) -> &'static str {
        "membership_add_role"
    }
}

/// Revokes a single role from the targeted membership
#[derive(Debug, Clone)]
pub struct RemoveRole {
    store: Arc<MembershipStore>,
    role: RoleName,
}

impl RemoveRole {
    /// Create remove-role action for a configured role name
    #[inline]
    #[must_use]
    pub fn new(store: Arc<MembershipStore>, role: RoleName) -> Self {
        Self { store, role }
    }

    /// The configured role
    #[inline]
    #[must_use]
    pub fn role(&self) -> &RoleName {
        &self.role
    }
}

impl MembershipAction for RemoveRole {
    fn execute(&self, user: UserId, group: GroupId) -> Result<ActionOutcome, ActionError> {
        match self.store.remove_role(user, group, &self.role) {
            Ok(true) => {
                debug!(%user, %group, role = %self.role, "role revoked");
                Ok(ActionOutcome::Applied)
            }
            Ok(false) => Ok(ActionOutcome::Noop),
            Err(MembershipError::NotFound { user, group }) => {
                Err(ActionError::MembershipNotFound { user, group })
            }
            Err(other) => Err(other.into()),
        }
    }

    fn name(&self) -> &'static str {
        "membership_remove_role"
    }
}
