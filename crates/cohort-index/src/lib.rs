//! Cohort audience index
//!
//! Maintains, for each group, the set of content items referencing it via
//! the audience relation, with fast reverse lookup. The index holds links
//! only; it never owns content lifetime.
//!
//! # Core Concepts
//!
//! - [`AudienceIndex`]: forward (content → groups) and reverse
//!   (group → contents) links
//! - [`GroupRemoval`]: the partition produced when a group is deleted:
//!   content that became orphaned versus content that was merely detached

mod index;

pub use index::{AudienceIndex, GroupRemoval, IndexError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
