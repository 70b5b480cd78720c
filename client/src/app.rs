//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::fault_boundary::FaultBoundary;
use crate::config;
use crate::net::api::{ApiClient, AuthHeader};
use crate::pages::{admin::AdminPage, auth_success::AuthSuccessPage, reports::ReportsPage};
use crate::state::session::{BrowserStorage, ProfileFetch, SessionStore, restore_session, track_profile_fetch};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script src=config::WIDGET_SCRIPT_URL></script>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the one session store and API client, provides both through context,
/// and restores any persisted credential once the app is live in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthHeader::default();
    let api = ApiClient::from_config(auth.clone());
    let session = RwSignal::new(SessionStore::new(auth, Arc::new(BrowserStorage)));

    let profile = StoredValue::new_local(ProfileFetch::default());

    provide_context(session);
    provide_context(profile);
    provide_context(api.clone());

    // Effects only run after hydration, so server and client both render the
    // verifying state first.
    track_profile_fetch(session, profile);
    Effect::new(move || restore_session(session, profile, api.clone()));

    view! {
        <Stylesheet id="leptos" href="/pkg/reportes.css"/>
        <Title text="Reports"/>

        <FaultBoundary>
            <Router>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=ReportsPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                    <Route path=(StaticSegment("auth"), StaticSegment("success")) view=AuthSuccessPage/>
                </Routes>
            </Router>
        </FaultBoundary>
    }
}
