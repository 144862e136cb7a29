use cohort_membership::state::{allowed_transitions, validate_transition};
use cohort_membership::{MembershipError, MembershipState, MembershipStore};
use cohort_types::{Group, GroupCatalog, GroupKind, RoleName, UserId};
use proptest::prelude::*;
use std::sync::Arc;

#[test]
fn test_active_transitions() {
    assert!(validate_transition(MembershipState::Active, MembershipState::Blocked).is_ok());

    // Invalid
    assert!(validate_transition(MembershipState::Active, MembershipState::Pending).is_err());
}

#[test]
fn test_pending_transitions() {
    assert!(validate_transition(MembershipState::Pending, MembershipState::Active).is_ok());

    assert!(validate_transition(MembershipState::Pending, MembershipState::Blocked).is_err());
}

#[test]
fn test_blocked_transitions() {
    assert!(validate_transition(MembershipState::Blocked, MembershipState::Active).is_ok());

    assert!(validate_transition(MembershipState::Blocked, MembershipState::Pending).is_err());
}

fn any_state() -> impl Strategy<Value = MembershipState> {
    prop_oneof![
        Just(MembershipState::Active),
        Just(MembershipState::Pending),
        Just(MembershipState::Blocked),
    ]
}

proptest! {
    #[test]
    fn prop_validate_matches_allowed_table(from in any_state(), to in any_state()) {
        let res = validate_transition(from, to);
        let allowed = allowed_transitions(from);

        if from == to {
            prop_assert!(res.is_ok());
        } else if res.is_ok() {
            prop_assert!(allowed.contains(&to));
        } else {
            prop_assert!(!allowed.contains(&to));
        }
    }

    #[test]
    fn prop_role_mutation_is_idempotent(grant in proptest::bool::ANY, repeats in 1usize..4) {
        let catalog = Arc::new(GroupCatalog::new());
        let group = catalog.register(
            Group::new(GroupKind::new("node", "club")).with_role("moderator"),
        );
        let store = MembershipStore::new(catalog);
        let user = UserId::new();
        store.create(user, group, MembershipState::Active).unwrap();

        let role = RoleName::new("moderator");
        if grant {
            for _ in 0..repeats {
                store.add_role(user, group, role.clone()).unwrap();
            }
            prop_assert!(store.get(user, group).unwrap().has_role(&role));
            prop_assert_eq!(store.get(user, group).unwrap().roles.len(), 1);
        } else {
            for _ in 0..repeats {
                store.remove_role(user, group, &role).unwrap();
            }
            prop_assert!(!store.get(user, group).unwrap().has_role(&role));
        }
    }
}

#[test]
fn illegal_transition_reports_both_states() {
    let err = validate_transition(MembershipState::Active, MembershipState::Pending).unwrap_err();
    match err {
        MembershipError::IllegalTransition { from, to } => {
            assert_eq!(from, MembershipState::Active);
            assert_eq!(to, MembershipState::Pending);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
