//! Top bar shown on every authenticated page.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::fault_boundary::{RenderFault, require};
use crate::net::types::Role;
use crate::state::session::SessionStore;

#[component]
pub fn AppHeader() -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let identity = move || session.with(|s| s.user().map(|u| (u.full_name(), u.email.clone(), u.role)));
    let is_admin = move || identity().is_some_and(|(_, _, role)| role == Role::Admin);

    Ok(view! {
        <header class="app-header toolbar">
            <A href="/" attr:class="app-header__brand">
                "Reports"
            </A>
            <span class="toolbar__divider" aria-hidden="true"></span>
            <nav class="app-header__nav">
                <Show when=is_admin>
                    <A href="/admin" attr:class="btn app-header__admin">
                        "Manage users"
                    </A>
                </Show>
            </nav>
            <span class="toolbar__spacer"></span>
            <span class="app-header__self" title=move || identity().map(|(_, email, _)| email).unwrap_or_default()>
                {move || identity().map(|(name, _, _)| name).unwrap_or_default()}
                <span class="app-header__role">
                    {move || identity().map(|(_, _, role)| role.label()).unwrap_or_default()}
                </span>
            </span>
            <button
                class="btn toolbar__logout"
                title="Sign out"
                on:click=move |_| {
                    leptos::logging::log!("user signed out");
                    session.update(SessionStore::logout);
                }
            >
                "Sign out"
            </button>
        </header>
    })
}
