//! Landing route for the identity provider's redirect (`/auth/success?token=`).
//!
//! Installs the credential through the session store, strips it from the
//! address bar, and continues to the catalog once the profile resolves.

#[cfg(test)]
#[path = "auth_success_test.rs"]
mod auth_success_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::fault_boundary::{RenderFault, require};
use crate::components::loading_spinner::{LoadingSpinner, SpinnerSize};
use crate::net::api::ApiClient;
use crate::state::session::{ProfileSlot, SessionStore};
#[cfg(feature = "hydrate")]
use crate::state::session::{RefreshOutcome, login};

pub(crate) const MISSING_TOKEN_MESSAGE: &str = "No authentication token was found.";
pub(crate) const LOGIN_FAILED_MESSAGE: &str = "The sign-in could not be completed.";

/// Trimmed, non-empty token from the query string.
pub(crate) fn extract_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty())
}

#[component]
pub fn AuthSuccessPage() -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let profile = require::<ProfileSlot>("profile fetch")?;
    let api = StoredValue::new(require::<ApiClient>("API client")?);
    let query = use_query_map();
    let error = RwSignal::new(None::<String>);

    Effect::new(move || {
        let Some(token) = extract_token(query.with_untracked(|q| q.get("token"))) else {
            leptos::logging::warn!("auth landing reached without a token");
            error.set(Some(MISSING_TOKEN_MESSAGE.to_owned()));
            return;
        };
        #[cfg(feature = "hydrate")]
        {
            let api = api.get_value();
            leptos::task::spawn_local(async move {
                let outcome = login(session, profile, &api, &token).await;
                if outcome == RefreshOutcome::LoggedOut {
                    error.try_set(Some(LOGIN_FAILED_MESSAGE.to_owned()));
                    return;
                }
                leptos::logging::log!("sign-in completed");
                if let Some(window) = web_sys::window() {
                    let _ = window.location().replace("/");
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, session, profile, api);
        }
    });

    Ok(move || match error.get() {
        Some(message) => view! {
            <div class="gate">
                <div class="gate__card">
                    <div class="gate__icon" aria-hidden="true">"✖"</div>
                    <h2 class="gate__title">"Authentication error"</h2>
                    <p class="gate__text">{message}</p>
                    <a class="btn btn--primary gate__action" href="/">
                        "Back to start"
                    </a>
                </div>
            </div>
        }
        .into_any(),
        None => view! {
            <div class="gate">
                <div class="gate__card">
                    <LoadingSpinner size=SpinnerSize::Large text="Completing sign-in..." />
                    <p class="gate__text">"You will be redirected automatically."</p>
                </div>
            </div>
        }
        .into_any(),
    })
}
