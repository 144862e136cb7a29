//! Group catalog
//!
//! Concurrent registry of live groups. The catalog is the authority for
//! "does this group exist" and for per-group role sets; it never owns
//! content or membership lifetimes.

use crate::group::{Group, RoleName};
use crate::id::GroupId;
use dashmap::DashMap;
use indexmap::IndexSet;

/// Registry of live groups keyed by [`GroupId`]
///
/// Thread-safe; reads and writes on distinct groups proceed concurrently.
#[derive(Debug, Default)]
pub struct GroupCatalog {
    groups: DashMap<GroupId, Group>,
}

impl GroupCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    /// Register a group, returning its ID
    ///
    /// Re-registering an existing ID replaces the entry.
    pub fn register(&self, group: Group) -> GroupId {
        let id = group.id;
        self.groups.insert(id, group);
        id
    }

    /// Look up a group by ID
    #[must_use]
    pub fn get(&self, id: GroupId) -> Option<Group> {
        self.groups.get(&id).map(|entry| entry.value().clone())
    }

    /// Check whether a group is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Role set of a group, if registered
    #[must_use]
    pub fn roles_of(&self, id: GroupId) -> Option<IndexSet<RoleName>> {
        self.groups.get(&id).map(|entry| entry.value().roles.clone())
    }

    /// Check whether a group defines a role
    #[must_use]
    pub fn defines_role(&self, id: GroupId, role: &RoleName) -> bool {
        self.groups
            .get(&id)
            .is_some_and(|entry| entry.value().has_role(role))
    }

    /// Remove a group from the catalog
    ///
    /// Returns the removed group. Cascades (membership purge, orphan
    /// reclamation) are the caller's responsibility.
    pub fn remove(&self, id: GroupId) -> Option<Group> {
        self.groups.remove(&id).map(|(_, group)| group)
    }

    /// Number of registered groups
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
