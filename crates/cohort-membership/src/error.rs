//! Error types for the membership store
//!
//! Validation errors ([`MembershipError::Conflict`],
//! [`MembershipError::IllegalTransition`]) indicate caller logic errors and
//! must never be retried automatically.

use crate::state::MembershipState;
use cohort_types::{GroupId, RoleName, UserId};

/// Membership store error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MembershipError {
    /// A membership for this (user, group) pair already exists
    #[error("membership already exists for user {user} in group {group}")]
    Conflict {
        /// The user of the existing record
        user: UserId,
        /// The group of the existing record
        group: GroupId,
    },

    /// Requested state transition is not reachable
    #[error("illegal membership transition: {from} -> {to}")]
    IllegalTransition {
        /// Current state
        from: MembershipState,
        /// Requested state
        to: MembershipState,
    },

    /// No membership exists for this (user, group) pair
    #[error("no membership for user {user} in group {group}")]
    NotFound {
        /// Targeted user
        user: UserId,
        /// Targeted group
        group: GroupId,
    },

    /// The group is not registered in the catalog
    #[error("group {group} is not registered")]
    UnknownGroup {
        /// The unregistered group
        group: GroupId,
    },

    /// The role is not defined in the group's role set
    #[error("role '{role}' is not defined for group {group}")]
    UnknownRole {
        /// The undefined role
        role: RoleName,
        /// The owning group
        group: GroupId,
    },
}

impl MembershipError {
    /// Check if error indicates a caller logic error (never retried)
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Conflict { .. } | Self::IllegalTransition { .. } | Self::UnknownRole { .. }
        )
    }
}
