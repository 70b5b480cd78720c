//! Admin route: user roster grouped by approval state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wrapped in an admin-only `ProtectedRoute`. Every successful action reloads
//! the full roster; nothing is patched locally.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::app_header::AppHeader;
use crate::components::fault_boundary::{RenderFault, require};
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::protected_route::ProtectedRoute;
use crate::net::abort::InFlight;
use crate::net::api::ApiClient;
use crate::net::types::{ApprovalState, Role, User};
use crate::state::roster::{RosterAction, RosterState, available_actions, is_permitted};
#[cfg(feature = "hydrate")]
use crate::state::roster::RosterFollowUp;
use crate::state::session::SessionStore;

/// `2024-03-05T14:07:33.000Z` -> `2024-03-05 14:07`; absent values read as `fallback`.
pub(crate) fn format_timestamp(raw: Option<&str>, fallback: &str) -> String {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return fallback.to_owned();
    };
    let Some((date, time)) = raw.split_once('T') else {
        return raw.to_owned();
    };
    let minutes: String = time.chars().take(5).collect();
    format!("{date} {minutes}")
}

pub(crate) fn section_title(state: ApprovalState) -> &'static str {
    match state {
        ApprovalState::Pending => "Pending approval",
        ApprovalState::Approved => "Approved users",
        ApprovalState::Rejected => "Rejected users",
    }
}

pub(crate) fn state_label(state: ApprovalState) -> &'static str {
    match state {
        ApprovalState::Pending => "pending",
        ApprovalState::Approved => "approved",
        ApprovalState::Rejected => "rejected",
    }
}

/// Handles shared by the roster loader and the action runner.
#[derive(Clone, Copy)]
struct RosterCtx {
    roster: RwSignal<RosterState>,
    session: RwSignal<SessionStore>,
    api: StoredValue<ApiClient>,
    in_flight: StoredValue<InFlight, LocalStorage>,
}

/// Start a roster load, aborting whichever load is still on the wire.
fn load_roster(ctx: RosterCtx) {
    let RosterCtx { roster, session, api, in_flight } = ctx;
    let Some(ticket) = roster.try_update(RosterState::begin_load) else {
        return;
    };
    let Some(handle) = in_flight.try_update_value(InFlight::replace) else {
        return;
    };
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let api = api.get_value();
        let result = match api.list_users(Some(&*handle)).await {
            Ok(users) => Ok(users),
            Err(err) if err.is_cancelled() => return,
            Err(err) => Err(crate::state::session::absorb_failure(session, &err)),
        };
        roster.try_update(|r| r.complete_load(ticket, result));
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (ticket, handle, session, api);
    }
}

fn apply_action(ctx: RosterCtx, user_id: i64, action: RosterAction) {
    let RosterCtx { roster, session, api, .. } = ctx;
    let viewer_id = session.with_untracked(|s| s.user().map(|u| u.id));
    if !is_permitted(action, user_id, viewer_id) {
        return;
    }
    if !roster.try_update(|r| r.begin_action(user_id)).unwrap_or(false) {
        return;
    }
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let result = api
            .get_value()
            .apply_roster_action(user_id, action)
            .await
            .map_err(|err| crate::state::session::absorb_failure(session, &err));
        if result.is_ok() {
            leptos::logging::log!("roster: {} applied to user {user_id}", action.label());
        }
        if roster.try_update(|r| r.finish_action(user_id, result)) == Some(RosterFollowUp::Refetch) {
            load_roster(ctx);
        }
    });
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = api;
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <ProtectedRoute require_admin=true>
            <AdminContent />
        </ProtectedRoute>
    }
}

#[component]
fn AdminContent() -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let api = StoredValue::new(require::<ApiClient>("API client")?);
    let roster = RwSignal::new(RosterState::default());
    let ctx = RosterCtx { roster, session, api, in_flight: StoredValue::new_local(InFlight::default()) };

    let reload = Callback::new(move |()| load_roster(ctx));
    let on_action = Callback::new(move |(user_id, action): (i64, RosterAction)| apply_action(ctx, user_id, action));

    Effect::new(move || reload.run(()));
    on_cleanup(move || {
        ctx.in_flight.try_update_value(InFlight::cancel);
    });

    let viewer_id = Signal::derive(move || session.with(|s| s.user().map(|u| u.id)));
    let first_load = move || roster.with(|r| r.is_loading() && r.users().is_empty());

    Ok(view! {
        <div class="admin-page">
            <AppHeader />
            <main class="admin-page__main">
                <header class="admin-page__header">
                    <A href="/" attr:class="btn admin-page__back">
                        "← Back to reports"
                    </A>
                    <h1 class="admin-page__title">"User management"</h1>
                    <button
                        class="btn admin-page__refresh"
                        on:click=move |_| reload.run(())
                        disabled=move || roster.with(RosterState::is_loading)
                    >
                        "Refresh"
                    </button>
                </header>
                <Show when=move || roster.with(|r| r.error().is_some())>
                    <div class="admin-page__error" role="alert">
                        <span>{move || roster.with(|r| r.error().unwrap_or_default().to_owned())}</span>
                        <button class="btn" on:click=move |_| roster.update(RosterState::dismiss_error)>
                            "Dismiss"
                        </button>
                    </div>
                </Show>
                <Show when=move || !first_load() fallback=|| view! { <LoadingSpinner text="Loading users..." /> }>
                    <RosterSection state=ApprovalState::Pending roster=roster viewer_id=viewer_id on_action=on_action />
                    <RosterSection state=ApprovalState::Approved roster=roster viewer_id=viewer_id on_action=on_action />
                    <Show when=move || roster.with(|r| !r.in_state(ApprovalState::Rejected).is_empty())>
                        <RosterSection
                            state=ApprovalState::Rejected
                            roster=roster
                            viewer_id=viewer_id
                            on_action=on_action
                        />
                    </Show>
                </Show>
            </main>
        </div>
    })
}

#[component]
fn RosterSection(
    state: ApprovalState,
    roster: RwSignal<RosterState>,
    viewer_id: Signal<Option<i64>>,
    on_action: Callback<(i64, RosterAction)>,
) -> impl IntoView {
    let users = Memo::new(move |_| roster.with(|r| r.in_state(state)));

    view! {
        <section class=format!("roster roster--{}", state_label(state))>
            <h2 class="roster__title">
                {section_title(state)}
                <span class="roster__count">{move || users.with(Vec::len)}</span>
            </h2>
            <Show
                when=move || users.with(|u| !u.is_empty())
                fallback=|| view! { <p class="roster__empty">"No users in this group."</p> }
            >
                <table class="roster__table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Status"</th>
                            <th>"Registered"</th>
                            <th>"Last access"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || users.get()
                            key=|user| (user.id, user.role, user.approval)
                            children=move |user| {
                                view! { <RosterRow user=user roster=roster viewer_id=viewer_id on_action=on_action /> }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </section>
    }
}

#[component]
fn RosterRow(
    user: User,
    roster: RwSignal<RosterState>,
    viewer_id: Signal<Option<i64>>,
    on_action: Callback<(i64, RosterAction)>,
) -> impl IntoView {
    let user_id = user.id;
    let is_self = move || viewer_id.get() == Some(user_id);
    let busy = move || roster.with(|r| r.is_busy(user_id));
    let role_class = match user.role {
        Role::Admin => "badge badge--admin",
        Role::User => "badge",
    };
    let state_class = format!("badge badge--{}", state_label(user.approval));
    let registered = format_timestamp(user.registered_at.as_deref(), "Unknown");
    let last_access = format_timestamp(user.last_access.as_deref(), "Never");
    let row = user.clone();

    view! {
        <tr class="roster__row" class:roster__row--self=is_self>
            <td class="roster__name">
                {user.full_name()}
                <Show when=is_self>
                    <span class="roster__you">" (you)"</span>
                </Show>
            </td>
            <td>{user.email.clone()}</td>
            <td>
                <span class=role_class>{user.role.label()}</span>
            </td>
            <td>
                <span class=state_class>{state_label(user.approval)}</span>
            </td>
            <td>{registered}</td>
            <td>{last_access}</td>
            <td class="roster__actions">
                {move || {
                    available_actions(&row, viewer_id.get())
                        .into_iter()
                        .map(|action| {
                            let class = match action {
                                RosterAction::Approve => "btn btn--primary",
                                RosterAction::Reject => "btn btn--danger",
                                RosterAction::ChangeRole(_) => "btn",
                            };
                            view! {
                                <button
                                    class=class
                                    disabled=busy
                                    on:click=move |_| on_action.run((user_id, action))
                                >
                                    {move || if busy() { "Working..." } else { action.label() }}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </td>
        </tr>
    }
}
