//! Membership state machine
//!
//! States and transitions:
//!
//! - `Active -> Blocked` (admin block)
//! - `Blocked -> Active` (unblock)
//! - `Pending -> Active` (approval)
//!
//! Deletion is not a transition: any state may be deleted, and deletion
//! removes the record. There is no path back to `Pending`.

use crate::error::MembershipError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a membership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    /// Full member
    Active,

    /// Requested access, awaiting approval
    Pending,

    /// Blocked by a group administrator
    Blocked,
}

impl MembershipState {
    /// All states, in declaration order
    pub const ALL: [MembershipState; 3] = [
        MembershipState::Active,
        MembershipState::Pending,
        MembershipState::Blocked,
    ];

    /// State name as used in persisted records
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for MembershipState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// States a membership may move to from `from`
///
/// Self-transitions are excluded here; [`validate_transition`] accepts them
/// as no-ops.
#[must_use]
pub fn allowed_transitions(from: MembershipState) -> &'static [MembershipState] {
    use MembershipState::{Active, Blocked, Pending};
    match from {
        Active => &[Blocked],
        Pending => &[Active],
        Blocked => &[Active],
    }
}

/// Validates a state transition.
///
/// Self-transitions are legal no-ops. Everything else must appear in
/// [`allowed_transitions`].
///
/// # Errors
/// Returns [`MembershipError::IllegalTransition`] when the target state is
/// not reachable.
pub fn validate_transition(
    from: MembershipState,
    to: MembershipState,
) -> Result<(), MembershipError> {
    if from == to || allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        Err(MembershipError::IllegalTransition { from, to })
    }
}
