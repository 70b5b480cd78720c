//! Admin roster state: the full user list plus per-user action tracking.
//!
//! DESIGN
//! ======
//! Mutations never patch the local list. A successful action answers with
//! `RosterFollowUp::Refetch` and the page reloads the whole roster, so what is
//! shown is always what the backend last returned. In-flight tracking is keyed
//! by user, so one row's pending action never disables another row.

#[cfg(test)]
#[path = "roster_test.rs"]
mod roster_test;

use std::collections::HashSet;

use crate::net::types::{ApprovalState, Role, RoleChangeRequest, User};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterAction {
    Approve,
    Reject,
    ChangeRole(Role),
}

impl RosterAction {
    /// Backend path for applying this action to `user_id`.
    pub fn path(self, user_id: i64) -> String {
        let verb = match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::ChangeRole(_) => "role",
        };
        format!("/auth/admin/users/{user_id}/{verb}")
    }

    /// JSON body, for actions that carry one.
    pub fn body(self) -> Option<serde_json::Value> {
        match self {
            Self::ChangeRole(role) => serde_json::to_value(RoleChangeRequest { role }).ok(),
            Self::Approve | Self::Reject => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::ChangeRole(Role::Admin) => "Make admin",
            Self::ChangeRole(Role::User) => "Make user",
        }
    }
}

/// Actions offered on `row` to the admin `viewer_id`. The viewer's own row
/// offers none, so an admin cannot change their own role or standing.
pub fn available_actions(row: &User, viewer_id: Option<i64>) -> Vec<RosterAction> {
    if viewer_id == Some(row.id) {
        return Vec::new();
    }
    match row.approval {
        ApprovalState::Pending => vec![RosterAction::Approve, RosterAction::Reject],
        ApprovalState::Approved => vec![RosterAction::ChangeRole(row.role.toggled()), RosterAction::Reject],
        ApprovalState::Rejected => vec![RosterAction::Approve],
    }
}

/// Whether `viewer_id` may apply `action` to `target_id` at all. Nothing is
/// ever permitted on the viewer's own account.
pub fn is_permitted(_action: RosterAction, target_id: i64, viewer_id: Option<i64>) -> bool {
    viewer_id.is_some_and(|v| v != target_id)
}

/// What the page should do after an action settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RosterFollowUp {
    Refetch,
    Nothing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Clone, Debug)]
pub struct RosterState {
    users: Vec<User>,
    loading: bool,
    error: Option<String>,
    busy: HashSet<i64>,
    seq: u64,
}

impl Default for RosterState {
    fn default() -> Self {
        Self { users: Vec::new(), loading: true, error: None, busy: HashSet::new(), seq: 0 }
    }
}

impl RosterState {
    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn is_busy(&self, user_id: i64) -> bool {
        self.busy.contains(&user_id)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        LoadTicket(self.seq)
    }

    /// Replace the roster with a fresh server listing; older loads are dropped.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<User>, String>) -> bool {
        if ticket.0 != self.seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(users) => self.users = users,
            Err(message) => self.error = Some(message),
        }
        true
    }

    /// Mark `user_id` busy. Returns `false` if that user already has an
    /// action in flight.
    pub fn begin_action(&mut self, user_id: i64) -> bool {
        self.busy.insert(user_id)
    }

    pub fn finish_action(&mut self, user_id: i64, result: Result<(), String>) -> RosterFollowUp {
        self.busy.remove(&user_id);
        match result {
            Ok(()) => RosterFollowUp::Refetch,
            Err(message) => {
                self.error = Some(message);
                RosterFollowUp::Nothing
            }
        }
    }

    /// Users in `state`, in server order.
    pub fn in_state(&self, state: ApprovalState) -> Vec<User> {
        self.users.iter().filter(|u| u.approval == state).cloned().collect()
    }
}
