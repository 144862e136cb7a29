//! Cohort membership actions
//!
//! Thin command objects over the membership store, designed to be triggered
//! in bulk from an external action-execution subsystem which may retry.
//! Each action validates its target and applies exactly one store
//! operation; outcomes distinguish [`ActionOutcome::Applied`] from
//! [`ActionOutcome::Noop`] so idempotent re-delivery stays observable.
//!
//! Dependencies arrive through constructors (an `Arc<MembershipStore>`),
//! never through ambient lookup.

mod action;
mod delete;
mod roles;

pub use action::{ActionError, ActionOutcome, MembershipAction};
pub use delete::DeleteMembership;
pub use roles::{AddRole, RemoveRole};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
