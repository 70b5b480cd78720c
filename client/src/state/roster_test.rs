use super::*;

fn user(id: i64, approval: ApprovalState, role: Role) -> User {
    User {
        id,
        email: format!("u{id}@example.edu"),
        name: format!("U{id}"),
        surname: None,
        photo_url: None,
        approval,
        role,
        registered_at: Some("2024-01-01T00:00:00Z".to_owned()),
        last_access: None,
    }
}

fn loaded(users: Vec<User>) -> RosterState {
    let mut state = RosterState::default();
    let ticket = state.begin_load();
    state.complete_load(ticket, Ok(users));
    state
}

#[test]
fn action_paths_and_bodies() {
    assert_eq!(RosterAction::Approve.path(7), "/auth/admin/users/7/approve");
    assert_eq!(RosterAction::Reject.path(7), "/auth/admin/users/7/reject");
    assert_eq!(RosterAction::ChangeRole(Role::Admin).path(7), "/auth/admin/users/7/role");
    assert_eq!(RosterAction::Approve.body(), None);
    assert_eq!(
        RosterAction::ChangeRole(Role::User).body(),
        Some(serde_json::json!({ "rol": "usuario" }))
    );
}

#[test]
fn approving_issues_full_refetch_without_local_patch() {
    let mut state = loaded(vec![
        user(7, ApprovalState::Pending, Role::User),
        user(8, ApprovalState::Approved, Role::Admin),
    ]);
    assert!(state.begin_action(7));
    assert_eq!(state.finish_action(7, Ok(())), RosterFollowUp::Refetch);
    // The list is untouched until the refetch lands.
    assert_eq!(state.users()[0].approval, ApprovalState::Pending);

    let ticket = state.begin_load();
    state.complete_load(
        ticket,
        Ok(vec![
            user(7, ApprovalState::Approved, Role::User),
            user(8, ApprovalState::Approved, Role::Admin),
        ]),
    );
    assert_eq!(state.users()[0].approval, ApprovalState::Approved);
}

#[test]
fn failed_action_surfaces_error_and_skips_refetch() {
    let mut state = loaded(vec![user(7, ApprovalState::Pending, Role::User)]);
    state.begin_action(7);
    assert_eq!(state.finish_action(7, Err("nope".to_owned())), RosterFollowUp::Nothing);
    assert_eq!(state.error(), Some("nope"));
    assert!(!state.is_busy(7));
    state.dismiss_error();
    assert_eq!(state.error(), None);
}

#[test]
fn busy_tracking_is_per_user() {
    let mut state = loaded(vec![
        user(1, ApprovalState::Pending, Role::User),
        user(2, ApprovalState::Pending, Role::User),
    ]);
    assert!(state.begin_action(1));
    assert!(!state.begin_action(1));
    assert!(state.is_busy(1));
    assert!(!state.is_busy(2));
    assert!(state.begin_action(2));
    state.finish_action(1, Ok(()));
    assert!(!state.is_busy(1));
    assert!(state.is_busy(2));
}

#[test]
fn self_row_offers_no_actions() {
    for approval in [ApprovalState::Pending, ApprovalState::Approved, ApprovalState::Rejected] {
        let me = user(3, approval, Role::Admin);
        assert!(available_actions(&me, Some(3)).is_empty(), "{approval:?}");
    }
}

#[test]
fn actions_follow_approval_state() {
    assert_eq!(
        available_actions(&user(1, ApprovalState::Pending, Role::User), Some(9)),
        vec![RosterAction::Approve, RosterAction::Reject]
    );
    assert_eq!(
        available_actions(&user(1, ApprovalState::Approved, Role::User), Some(9)),
        vec![RosterAction::ChangeRole(Role::Admin), RosterAction::Reject]
    );
    assert_eq!(
        available_actions(&user(1, ApprovalState::Approved, Role::Admin), Some(9)),
        vec![RosterAction::ChangeRole(Role::User), RosterAction::Reject]
    );
    assert_eq!(
        available_actions(&user(1, ApprovalState::Rejected, Role::User), Some(9)),
        vec![RosterAction::Approve]
    );
}

#[test]
fn no_action_is_permitted_on_own_account() {
    for action in [RosterAction::Approve, RosterAction::Reject, RosterAction::ChangeRole(Role::User)] {
        assert!(!is_permitted(action, 3, Some(3)), "{action:?}");
        assert!(is_permitted(action, 4, Some(3)), "{action:?}");
        assert!(!is_permitted(action, 4, None), "{action:?}");
    }
}

#[test]
fn stale_load_is_dropped() {
    let mut state = RosterState::default();
    let first = state.begin_load();
    let second = state.begin_load();
    assert!(state.complete_load(second, Ok(vec![user(2, ApprovalState::Approved, Role::User)])));
    assert!(!state.complete_load(first, Ok(vec![user(1, ApprovalState::Approved, Role::User)])));
    assert_eq!(state.users().len(), 1);
    assert_eq!(state.users()[0].id, 2);
}

#[test]
fn grouping_preserves_server_order() {
    let state = loaded(vec![
        user(5, ApprovalState::Approved, Role::User),
        user(1, ApprovalState::Pending, Role::User),
        user(3, ApprovalState::Approved, Role::Admin),
        user(4, ApprovalState::Rejected, Role::User),
    ]);
    let approved: Vec<i64> = state.in_state(ApprovalState::Approved).iter().map(|u| u.id).collect();
    assert_eq!(approved, vec![5, 3]);
    assert_eq!(state.in_state(ApprovalState::Pending).len(), 1);
    assert_eq!(state.in_state(ApprovalState::Rejected).len(), 1);
}

#[test]
fn load_error_is_kept() {
    let mut state = RosterState::default();
    let ticket = state.begin_load();
    state.complete_load(ticket, Err("forbidden".to_owned()));
    assert!(!state.is_loading());
    assert_eq!(state.error(), Some("forbidden"));
}
