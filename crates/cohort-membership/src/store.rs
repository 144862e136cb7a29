//! Membership store
//!
//! Concurrent keyed store over (user, group) pairs. Creation goes through
//! the entry API so the second of two concurrent creates for the same pair
//! fails with [`MembershipError::Conflict`] instead of silently
//! overwriting. Mutations of a single record are serialized by the store's
//! sharded entry locks; operations on distinct records proceed
//! concurrently.

use crate::error::MembershipError;
use crate::record::Membership;
use crate::state::{validate_transition, MembershipState};
use chrono::Utc;
use cohort_types::{GroupCatalog, GroupId, RoleName, UserId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Store key: one record per (user, group) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MemberKey {
    user: UserId,
    group: GroupId,
}

/// Authoritative membership record store
#[derive(Debug)]
pub struct MembershipStore {
    catalog: Arc<GroupCatalog>,
    records: DashMap<MemberKey, Membership>,
}

impl MembershipStore {
    /// Create store backed by a group catalog
    #[must_use]
    pub fn new(catalog: Arc<GroupCatalog>) -> Self {
        Self {
            catalog,
            records: DashMap::new(),
        }
    }

    /// Catalog this store validates groups and roles against
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Arc<GroupCatalog> {
        &self.catalog
    }

    /// Create a membership in the given initial state
    ///
    /// # Errors
    /// - [`MembershipError::UnknownGroup`] if the group is not registered
    /// - [`MembershipError::Conflict`] if a record for the pair exists
    pub fn create(
        &self,
        user: UserId,
        group: GroupId,
        initial_state: MembershipState,
    ) -> Result<Membership, MembershipError> {
        if !self.catalog.contains(group) {
            return Err(MembershipError::UnknownGroup { group });
        }

        match self.records.entry(MemberKey { user, group }) {
            Entry::Occupied(_) => Err(MembershipError::Conflict { user, group }),
            Entry::Vacant(entry) => {
                let membership = Membership::new(user, group, initial_state);
                entry.insert(membership.clone());
                debug!(%user, %group, state = %initial_state, "membership created");
                Ok(membership)
            }
        }
    }

    /// Transition a membership to a new state
    ///
    /// Setting the current state again is a no-op.
    ///
    /// # Errors
    /// - [`MembershipError::NotFound`] if no record exists for the pair
    /// - [`MembershipError::IllegalTransition`] if the state machine
    ///   rejects the transition
    pub fn set_state(
        &self,
        user: UserId,
        group: GroupId,
        new_state: MembershipState,
    ) -> Result<(), MembershipError> {
        let mut record = self
            .records
            .get_mut(&MemberKey { user, group })
            .ok_or(MembershipError::NotFound { user, group })?;

        validate_transition(record.state, new_state)?;
        if record.state == new_state {
            return Ok(());
        }

        debug!(%user, %group, from = %record.state, to = %new_state, "membership state change");
        record.state = new_state;
        record.changed = Utc::now();
        Ok(())
    }

    /// Grant a role to a membership
    ///
    /// Idempotent: granting an already-present role returns `Ok(false)`.
    /// Returns `Ok(true)` when the role set changed.
    ///
    /// # Errors
    /// - [`MembershipError::NotFound`] if no record exists for the pair
    /// - [`MembershipError::UnknownRole`] if the group does not define the
    ///   role
    pub fn add_role(
        &self,
        user: UserId,
        group: GroupId,
        role: RoleName,
    ) -> Result<bool, MembershipError> {
        if !self.catalog.defines_role(group, &role) {
            return Err(MembershipError::UnknownRole { role, group });
        }

        let mut record = self
            .records
            .get_mut(&MemberKey { user, group })
            .ok_or(MembershipError::NotFound { user, group })?;

        if record.roles.insert(role) {
            record.changed = Utc::now();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Revoke a role from a membership
    ///
    /// Idempotent: revoking an absent role returns `Ok(false)`.
    ///
    /// # Errors
    /// Returns [`MembershipError::NotFound`] if no record exists for the
    /// pair.
    pub fn remove_role(
        &self,
        user: UserId,
        group: GroupId,
        role: &RoleName,
    ) -> Result<bool, MembershipError> {
        let mut record = self
            .records
            .get_mut(&MemberKey { user, group })
            .ok_or(MembershipError::NotFound { user, group })?;

        if record.roles.shift_remove(role) {
            record.changed = Utc::now();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Delete a membership record
    ///
    /// Deletion is terminal. Returns whether a record existed; deleting an
    /// absent membership is a no-op.
    pub fn delete(&self, user: UserId, group: GroupId) -> bool {
        let removed = self.records.remove(&MemberKey { user, group }).is_some();
        if removed {
            debug!(%user, %group, "membership deleted");
        }
        removed
    }

    /// Check whether a membership exists in one of the given states
    #[must_use]
    pub fn is_member(&self, group: GroupId, user: UserId, states: &[MembershipState]) -> bool {
        self.records
            .get(&MemberKey { user, group })
            .is_some_and(|record| record.in_state(states))
    }

    /// Look up a membership record
    #[must_use]
    pub fn get(&self, user: UserId, group: GroupId) -> Option<Membership> {
        self.records
            .get(&MemberKey { user, group })
            .map(|record| record.value().clone())
    }

    /// Count memberships of a group in the given states
    #[must_use]
    pub fn member_count(&self, group: GroupId, states: &[MembershipState]) -> usize {
        self.records
            .iter()
            .filter(|entry| entry.key().group == group && entry.value().in_state(states))
            .count()
    }

    /// Remove all records of a deleted group
    ///
    /// Called by the entity-lifecycle collaborator after the group's own
    /// removal is durable. Returns the number of records removed.
    pub fn purge_group(&self, group: GroupId) -> usize {
        let before = self.records.len();
        self.records.retain(|key, _| key.group != group);
        let purged = before - self.records.len();
        if purged > 0 {
            debug!(%group, purged, "group memberships purged");
        }
        purged
    }

    /// Remove all records of a deleted user
    pub fn purge_user(&self, user: UserId) -> usize {
        let before = self.records.len();
        self.records.retain(|key, _| key.user != user);
        let purged = before - self.records.len();
        if purged > 0 {
            debug!(%user, purged, "user memberships purged");
        }
        purged
    }

    /// Total number of membership records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cohort_types::{Group, GroupKind};

    fn store_with_group() -> (MembershipStore, GroupId) {
        let catalog = Arc::new(GroupCatalog::new());
        let group = catalog.register(
            Group::new(GroupKind::new("node", "club"))
                .with_role("administrator")
                .with_role("moderator"),
        );
        (MembershipStore::new(catalog), group)
    }

    #[test]
    fn create_and_query() {
        let (store, group) = store_with_group();
        let user = UserId::new();

        store.create(user, group, MembershipState::Active).unwrap();

        assert!(store.is_member(group, user, &[MembershipState::Active]));
        assert!(!store.is_member(group, user, &[MembershipState::Pending]));
    }

    #[test]
    fn duplicate_create_conflicts() {
        let (store, group) = store_with_group();
        let user = UserId::new();

        store.create(user, group, MembershipState::Active).unwrap();
        let result = store.create(user, group, MembershipState::Pending);

        assert!(matches!(result, Err(MembershipError::Conflict { .. })));
        // Existing record untouched
        assert_eq!(store.get(user, group).unwrap().state, MembershipState::Active);
    }

    #[test]
    fn create_rejects_unregistered_group() {
        let (store, _) = store_with_group();
        let result = store.create(UserId::new(), GroupId::new(), MembershipState::Active);
        assert!(matches!(result, Err(MembershipError::UnknownGroup { .. })));
    }

    #[test]
    fn set_state_follows_machine() {
        let (store, group) = store_with_group();
        let user = UserId::new();
        store.create(user, group, MembershipState::Pending).unwrap();

        store.set_state(user, group, MembershipState::Active).unwrap();
        assert_eq!(store.get(user, group).unwrap().state, MembershipState::Active);

        let result = store.set_state(user, group, MembershipState::Pending);
        assert!(matches!(result, Err(MembershipError::IllegalTransition { .. })));
    }

    #[test]
    fn set_state_missing_membership() {
        let (store, group) = store_with_group();
        let result = store.set_state(UserId::new(), group, MembershipState::Active);
        assert!(matches!(result, Err(MembershipError::NotFound { .. })));
    }

    #[test]
    fn add_role_is_idempotent() {
        let (store, group) = store_with_group();
        let user = UserId::new();
        store.create(user, group, MembershipState::Active).unwrap();

        assert!(store.add_role(user, group, RoleName::new("moderator")).unwrap());
        assert!(!store.add_role(user, group, RoleName::new("moderator")).unwrap());
        assert!(store.get(user, group).unwrap().has_role(&RoleName::new("moderator")));
    }

    #[test]
    fn add_role_rejects_undefined_role() {
        let (store, group) = store_with_group();
        let user = UserId::new();
        store.create(user, group, MembershipState::Active).unwrap();

        let result = store.add_role(user, group, RoleName::new("editor"));
        assert!(matches!(result, Err(MembershipError::UnknownRole { .. })));
    }

    #[test]
    fn remove_role_is_idempotent() {
        let (store, group) = store_with_group();
        let user = UserId::new();
        store.create(user, group, MembershipState::Active).unwrap();
        store.add_role(user, group, RoleName::new("moderator")).unwrap();

        assert!(store.remove_role(user, group, &RoleName::new("moderator")).unwrap());
        assert!(!store.remove_role(user, group, &RoleName::new("moderator")).unwrap());
    }

    #[test]
    fn delete_is_terminal_and_idempotent() {
        let (store, group) = store_with_group();
        let user = UserId::new();
        store.create(user, group, MembershipState::Blocked).unwrap();

        assert!(store.delete(user, group));
        assert!(!store.is_member(
            group,
            user,
            &[
                MembershipState::Active,
                MembershipState::Blocked,
                MembershipState::Pending
            ]
        ));
        // Second delete is a no-op
        assert!(!store.delete(user, group));
    }

    #[test]
    fn purge_group_removes_all_records() {
        let (store, group) = store_with_group();
        let other = store.catalog().register(Group::new(GroupKind::new("node", "team")));

        let user = UserId::new();
        store.create(user, group, MembershipState::Active).unwrap();
        store.create(user, other, MembershipState::Active).unwrap();
        store.create(UserId::new(), group, MembershipState::Pending).unwrap();

        assert_eq!(store.purge_group(group), 2);
        assert!(store.is_member(other, user, &[MembershipState::Active]));
        assert_eq!(store.member_count(group, &MembershipState::ALL), 0);
    }

    #[test]
    fn purge_user_removes_all_records() {
        let (store, group) = store_with_group();
        let other = store.catalog().register(Group::new(GroupKind::new("node", "team")));

        let user = UserId::new();
        let bystander = UserId::new();
        store.create(user, group, MembershipState::Active).unwrap();
        store.create(user, other, MembershipState::Blocked).unwrap();
        store.create(bystander, group, MembershipState::Active).unwrap();

        assert_eq!(store.purge_user(user), 2);
        assert!(store.is_member(group, bystander, &[MembershipState::Active]));
    }

    #[test]
    fn concurrent_creation_yields_one_record() {
        let (store, group) = store_with_group();
        let store = Arc::new(store);
        let user = UserId::new();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                store.create(user, group, MembershipState::Active).is_ok()
            }));
        }

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.len(), 1);
    }
}
