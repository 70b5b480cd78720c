//! Route wrapper that renders its children only for an approved session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every content route is wrapped in `ProtectedRoute`. The screen shown is
//! `state::access::evaluate` of the shared session, so the gate re-renders as
//! soon as a refresh, login, or logout lands.

use leptos::prelude::*;

use crate::components::fault_boundary::{RenderFault, require};
use crate::components::loading_spinner::{LoadingSpinner, SpinnerSize};
use crate::config;
use crate::net::api::ApiClient;
use crate::state::access::{GateView, evaluate};
use crate::state::session::{ProfileSlot, SessionStore};
#[cfg(feature = "hydrate")]
use crate::state::session::refresh_user;

#[component]
pub fn ProtectedRoute(
    #[prop(optional)] require_admin: bool,
    children: ChildrenFn,
) -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let gate = Memo::new(move |_| session.with(|s| evaluate(s, require_admin)));

    Ok(move || match gate.get() {
        GateView::Verifying => {
            view! { <LoadingSpinner size=SpinnerSize::Large text="Verifying authentication..." /> }.into_any()
        }
        GateView::LoginPrompt => view! { <LoginPrompt /> }.into_any(),
        GateView::AwaitingApproval { name, email } => view! { <AwaitingApproval name=name email=email /> }.into_any(),
        GateView::AccessDenied => view! { <AccessDenied /> }.into_any(),
        GateView::InsufficientPermissions => view! { <InsufficientPermissions /> }.into_any(),
        GateView::Granted => children().into_any(),
    })
}

#[component]
fn GateNotice(icon: &'static str, title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="gate">
            <div class="gate__card">
                <div class="gate__icon" aria-hidden="true">{icon}</div>
                <h2 class="gate__title">{title}</h2>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn LoginPrompt() -> impl IntoView {
    view! {
        <GateNotice icon="🔒" title="Restricted access">
            <p class="gate__text">
                "Sign in with your institutional account to use this application. "
                "An administrator must approve your registration before reports are available."
            </p>
            <button class="btn btn--primary gate__action" on:click=move |_| redirect_to_login()>
                "Sign in with institutional email"
            </button>
        </GateNotice>
    }
}

#[component]
fn AwaitingApproval(name: String, email: String) -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let profile = require::<ProfileSlot>("profile fetch")?;
    let api = StoredValue::new(require::<ApiClient>("API client")?);
    let checking = RwSignal::new(false);

    let on_recheck = move |_| {
        if checking.get_untracked() {
            return;
        }
        checking.set(true);
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            refresh_user(session, profile, &api).await;
            checking.try_set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (profile, api);
        }
    };

    Ok(view! {
        <GateNotice icon="⏳" title="Awaiting approval">
            <p class="gate__text">
                "Your registration was received. An administrator must approve your account "
                "before you can continue. Check again once you receive the approval email."
            </p>
            <div class="gate__identity">
                <p>
                    <strong>"User: "</strong>
                    {name}
                </p>
                <p>
                    <strong>"Email: "</strong>
                    {email}
                </p>
            </div>
            <div class="gate__actions">
                <button class="btn" on:click=on_recheck disabled=move || checking.get()>
                    {move || if checking.get() { "Checking..." } else { "Check status" }}
                </button>
                <button class="btn btn--danger" on:click=move |_| session.update(SessionStore::logout)>
                    "Sign out"
                </button>
            </div>
        </GateNotice>
    })
}

#[component]
fn AccessDenied() -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let contact = config::contact_email();

    Ok(view! {
        <GateNotice icon="✖" title="Access denied">
            <p class="gate__text">
                "An administrator rejected your access request. If you believe this is a mistake, contact "
                <a href=format!("mailto:{contact}")>{contact}</a>
                "."
            </p>
            <button class="btn btn--danger gate__action" on:click=move |_| session.update(SessionStore::logout)>
                "Sign out"
            </button>
        </GateNotice>
    })
}

#[component]
fn InsufficientPermissions() -> impl IntoView {
    view! {
        <GateNotice icon="🔐" title="Insufficient permissions">
            <p class="gate__text">"This section requires administrator permissions."</p>
            <button class="btn gate__action" on:click=move |_| go_back()>
                "Go back"
            </button>
        </GateNotice>
    }
}

fn redirect_to_login() {
    #[cfg(feature = "hydrate")]
    {
        let target = config::login_url();
        leptos::logging::log!("redirecting to identity provider");
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(&target);
        }
    }
}

fn go_back() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.back();
            }
        }
    }
}
