//! Membership actions against the standard five-membership scenario.

use cohort_actions::{ActionError, ActionOutcome, AddRole, DeleteMembership, MembershipAction, RemoveRole};
use cohort_membership::{MembershipState, MembershipStore};
use cohort_test_utils::{catalog_with_standard_group, membership_scenario, SCENARIO_MEMBERS};
use cohort_types::{RoleName, UserId};
use std::sync::Arc;

fn scenario() -> (Arc<MembershipStore>, cohort_types::GroupId, std::collections::HashMap<&'static str, UserId>) {
    let (catalog, group) = catalog_with_standard_group();
    let store = Arc::new(MembershipStore::new(catalog));
    let users = membership_scenario(&store, group);
    (store, group, users)
}

#[test]
fn delete_action_removes_every_kind_of_member() {
    for fixture_name in SCENARIO_MEMBERS {
        let (store, group, users) = scenario();
        let action = DeleteMembership::new(Arc::clone(&store));
        let member = users[fixture_name];

        action.execute(member, group).unwrap();

        assert!(
            !store.is_member(
                group,
                member,
                &[
                    MembershipState::Active,
                    MembershipState::Blocked,
                    MembershipState::Pending,
                ],
            ),
            "{fixture_name} should no longer be a member"
        );
    }
}

#[test]
fn delete_action_is_idempotent() {
    let (store, group, users) = scenario();
    let action = DeleteMembership::new(store);
    let member = users["member"];

    assert_eq!(action.execute(member, group).unwrap(), ActionOutcome::Applied);
    assert_eq!(action.execute(member, group).unwrap(), ActionOutcome::Noop);
}

#[test]
fn delete_action_leaves_other_members_alone() {
    let (store, group, users) = scenario();
    let action = DeleteMembership::new(Arc::clone(&store));

    action.execute(users["member"], group).unwrap();

    assert!(store.is_member(group, users["pending"], &[MembershipState::Pending]));
    assert!(store.is_member(group, users["blocked"], &[MembershipState::Blocked]));
    assert!(store.is_member(group, users["group_administrator"], &[MembershipState::Active]));
}

#[test]
fn add_role_action_grants_configured_role() {
    let (store, group, users) = scenario();
    let action = AddRole::new(Arc::clone(&store), RoleName::new("moderator"));
    let member = users["member"];

    assert_eq!(action.execute(member, group).unwrap(), ActionOutcome::Applied);
    assert_eq!(action.execute(member, group).unwrap(), ActionOutcome::Noop);
    assert!(store.get(member, group).unwrap().has_role(&RoleName::new("moderator")));
}

#[test]
fn remove_role_action_revokes_configured_role() {
    let (store, group, users) = scenario();
    let action = RemoveRole::new(Arc::clone(&store), RoleName::new("administrator"));
    let admin = users["group_administrator"];

    assert_eq!(action.execute(admin, group).unwrap(), ActionOutcome::Applied);
    assert!(!store.get(admin, group).unwrap().has_role(&RoleName::new("administrator")));

    // Revoking again changes nothing and still succeeds.
    assert_eq!(action.execute(admin, group).unwrap(), ActionOutcome::Noop);
}

#[test]
fn role_actions_error_on_missing_membership() {
    let (store, group, _) = scenario();
    let action = AddRole::new(store, RoleName::new("moderator"));

    let result = action.execute(UserId::new(), group);
    assert!(matches!(result, Err(ActionError::MembershipNotFound { .. })));
}

#[test]
fn actions_report_their_names() {
    let (store, _, _) = scenario();
    let delete = DeleteMembership::new(Arc::clone(&store));
    let add = AddRole::new(Arc::clone(&store), RoleName::new("moderator"));
    let remove = RemoveRole::new(store, RoleName::new("moderator"));

    assert_eq!(delete.name(), "membership_delete");
    assert_eq!(add.name(), "membership_add_role");
    assert_eq!(remove.name(), "membership_remove_role");
}
