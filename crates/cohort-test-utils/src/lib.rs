//! Testing utilities for the cohort workspace
//!
//! Shared fixtures: the standard membership scenario, an in-memory content
//! store with fault injection, and a wired-up reclamation fixture.

#![allow(missing_docs)]

use cohort_index::AudienceIndex;
use cohort_membership::{MembershipState, MembershipStore};
use cohort_reclaim::{
    ContentStore, OrphanQueue, ProcessingFault, ReclaimConfig, ReclaimEngine,
};
use cohort_types::{ContentId, Group, GroupCatalog, GroupId, GroupKind, RoleName, UserId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// The five membership fixtures exercised by bulk-action tests.
pub const SCENARIO_MEMBERS: [&str; 5] = [
    "member",
    "pending",
    "blocked",
    "group_administrator",
    "group_moderator",
];

pub fn standard_group() -> Group {
    Group::new(GroupKind::new("node", "club"))
        .with_role("administrator")
        .with_role("moderator")
}

pub fn catalog_with_standard_group() -> (Arc<GroupCatalog>, GroupId) {
    let catalog = Arc::new(GroupCatalog::new());
    let group = catalog.register(standard_group());
    (catalog, group)
}

/// Populate a store with the standard five-membership scenario.
///
/// Returns fixture name -> user, covering every state plus both roles.
pub fn membership_scenario(
    store: &MembershipStore,
    group: GroupId,
) -> HashMap<&'static str, UserId> {
    let mut users = HashMap::new();

    for name in SCENARIO_MEMBERS {
        let user = UserId::new();
        let state = match name {
            "pending" => MembershipState::Pending,
            "blocked" => MembershipState::Blocked,
            _ => MembershipState::Active,
        };
        store.create(user, group, state).unwrap();

        match name {
            "group_administrator" => {
                store
                    .add_role(user, group, RoleName::new("administrator"))
                    .unwrap();
            }
            "group_moderator" => {
                store
                    .add_role(user, group, RoleName::new("moderator"))
                    .unwrap();
            }
            _ => {}
        }

        users.insert(name, user);
    }

    users
}

/// In-memory content store recording deletions, with fault injection.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    deleted: Mutex<Vec<ContentId>>,
    fail_on: Mutex<Option<ContentId>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next deletes of `content` fail until disarmed.
    pub fn arm_failure(&self, content: ContentId) {
        *self.fail_on.lock() = Some(content);
    }

    pub fn disarm_failure(&self) {
        *self.fail_on.lock() = None;
    }

    pub fn was_deleted(&self, content: ContentId) -> bool {
        self.deleted.lock().contains(&content)
    }

    pub fn deleted(&self) -> Vec<ContentId> {
        self.deleted.lock().clone()
    }
}

impl ContentStore for MemoryContentStore {
    fn delete(&self, content: ContentId) -> Result<(), ProcessingFault> {
        if *self.fail_on.lock() == Some(content) {
            return Err(ProcessingFault::new(content, "injected storage failure"));
        }
        self.deleted.lock().push(content);
        Ok(())
    }
}

/// Wired-up catalog + index + queue + content store for reclamation tests.
#[derive(Debug, Default)]
pub struct ReclaimFixture {
    pub catalog: Arc<GroupCatalog>,
    pub index: Arc<AudienceIndex>,
    pub queue: Arc<OrphanQueue>,
    pub store: Arc<MemoryContentStore>,
}

impl ReclaimFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&self) -> GroupId {
        self.catalog.register(standard_group())
    }

    pub fn add_content(&self, groups: &[GroupId]) -> ContentId {
        let content = ContentId::new();
        self.index.index_content(content, groups);
        content
    }

    /// Build an engine for the named strategy over this fixture's parts.
    pub fn engine(&self, strategy: &str) -> ReclaimEngine {
        self.engine_with(ReclaimConfig::new().with_strategy(strategy))
    }

    pub fn engine_with(&self, config: ReclaimConfig) -> ReclaimEngine {
        ReclaimEngine::from_config(
            &config,
            Arc::clone(&self.index),
            Arc::clone(&self.queue),
            Arc::clone(&self.store) as Arc<dyn ContentStore>,
        )
        .unwrap()
    }

    /// Delete a group the way the entity-lifecycle collaborator would:
    /// drop it from the catalog, then notify the engine.
    pub fn delete_group(&self, engine: &ReclaimEngine, group: GroupId) {
        self.catalog.remove(group);
        engine.on_group_deleted(group);
    }
}
