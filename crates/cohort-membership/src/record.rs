//! Membership record
//!
//! One record per (user, group) pair: state, insertion-ordered role set,
//! created/changed stamps.

use crate::state::MembershipState;
use chrono::{DateTime, Utc};
use cohort_types::{GroupId, RoleName, UserId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Relation between one user and one group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    /// The group
    pub group: GroupId,

    /// The user
    pub user: UserId,

    /// Lifecycle state
    pub state: MembershipState,

    /// Roles granted to the user in this group (insertion-ordered)
    pub roles: IndexSet<RoleName>,

    /// Creation stamp
    pub created: DateTime<Utc>,

    /// Last-mutation stamp
    pub changed: DateTime<Utc>,
}

impl Membership {
    /// Create a membership in the given initial state
    #[must_use]
    pub fn new(user: UserId, group: GroupId, state: MembershipState) -> Self {
        let now = Utc::now();
        Self {
            group,
            user,
            state,
            roles: IndexSet::new(),
            created: now,
            changed: now,
        }
    }

    /// Check whether the membership carries a role
    #[inline]
    #[must_use]
    pub fn has_role(&self, role: &RoleName) -> bool {
        self.roles.contains(role)
    }

    /// Check whether the state is one of `states`
    #[inline]
    #[must_use]
    pub fn in_state(&self, states: &[MembershipState]) -> bool {
        states.contains(&self.state)
    }
}
