//! Access gate: which screen a protected route shows for the current session.
//!
//! The checks form a precedence chain (first match wins), so a rejected user
//! on an admin route sees the rejection, not the permissions notice.
//!
//! DESIGN
//! ======
//! Step two asks whether the session has *identified* its user (a profile
//! resolved for the installed credential). Approval is judged by the steps
//! after it, which is what makes the pending and rejected notices reachable;
//! only an approved user ever reaches `Granted`.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use crate::net::types::{ApprovalState, Role, User};
use crate::state::session::SessionStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateView {
    /// Session state is still being resolved.
    Verifying,
    /// No identified user; offer the identity-provider redirect.
    LoginPrompt,
    AwaitingApproval { name: String, email: String },
    AccessDenied,
    InsufficientPermissions,
    Granted,
}

/// Everything the gate looks at.
#[derive(Clone, Copy, Debug)]
pub struct GateInputs<'a> {
    pub loading: bool,
    pub identified: bool,
    pub user: Option<&'a User>,
    pub require_admin: bool,
}

impl<'a> GateInputs<'a> {
    pub fn from_session(session: &'a SessionStore, require_admin: bool) -> Self {
        Self {
            loading: session.is_loading(),
            identified: session.is_identified(),
            user: session.user(),
            require_admin,
        }
    }
}

/// Decide the view for a route; `require_admin` marks admin-only routes.
pub fn evaluate(session: &SessionStore, require_admin: bool) -> GateView {
    decide(GateInputs::from_session(session, require_admin))
}

pub fn decide(inputs: GateInputs<'_>) -> GateView {
    if inputs.loading {
        return GateView::Verifying;
    }
    let Some(user) = inputs.user.filter(|_| inputs.identified) else {
        return GateView::LoginPrompt;
    };
    match user.approval {
        ApprovalState::Pending => {
            return GateView::AwaitingApproval { name: user.full_name(), email: user.email.clone() };
        }
        ApprovalState::Rejected => return GateView::AccessDenied,
        ApprovalState::Approved => {}
    }
    if inputs.require_admin && user.role != Role::Admin {
        return GateView::InsufficientPermissions;
    }
    GateView::Granted
}
