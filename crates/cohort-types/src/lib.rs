//! Cohort core types
//!
//! Foundation crate for the cohort workspace:
//!
//! - [`GroupId`], [`UserId`], [`ContentId`]: stable entity identifiers
//! - [`GroupKind`]: entity-type/bundle tag identifying a family of groups
//! - [`RoleName`], [`Group`]: groups with per-kind role sets
//! - [`GroupCatalog`]: concurrent registry of live groups

mod catalog;
mod group;
mod id;

pub use catalog::GroupCatalog;
pub use group::{Group, GroupKind, RoleName};
pub use id::{ContentId, GroupId, UserId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
