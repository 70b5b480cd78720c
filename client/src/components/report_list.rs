//! Report catalog view.
//!
//! SYSTEM CONTEXT
//! ==============
//! Fetches the catalog once on mount and again on retry. Each fetch retires the
//! previous one in `CatalogState` and aborts it on the wire via `InFlight`;
//! unmounting does both for whatever is still outstanding.

use leptos::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::components::fault_boundary::{RenderFault, require};
use crate::components::loading_spinner::LoadingSpinner;
use crate::components::report_card::ReportCard;
use crate::net::abort::InFlight;
use crate::net::api::ApiClient;
use crate::net::types::ReportSummary;
use crate::state::catalog::{CatalogPhase, CatalogState};
use crate::state::session::SessionStore;

#[component]
pub fn ReportList(on_select: Callback<ReportSummary>) -> Result<impl IntoView, RenderFault> {
    let session = require::<RwSignal<SessionStore>>("session")?;
    let api = StoredValue::new(require::<ApiClient>("API client")?);
    let catalog = RwSignal::new(CatalogState::default());
    let in_flight = StoredValue::new_local(InFlight::default());

    let load = Callback::new(move |()| {
        let Some(ticket) = catalog.try_update(CatalogState::begin_fetch) else {
            return;
        };
        let Some(handle) = in_flight.try_update_value(InFlight::replace) else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let api = api.get_value();
            let result = match api.list_reports(Some(&*handle)).await {
                Ok(reports) => Ok(reports),
                Err(err) if err.is_cancelled() => return,
                Err(err) => Err(crate::state::session::absorb_failure(session, &err)),
            };
            if let Ok(reports) = &result {
                leptos::logging::log!("catalog loaded: {} reports", reports.len());
            }
            catalog.try_update(|c| c.complete(ticket, result));
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ticket, handle, session, api);
        }
    });

    Effect::new(move || load.run(()));

    on_cleanup(move || {
        catalog.try_update(CatalogState::unmount);
        in_flight.try_update_value(InFlight::cancel);
    });

    Ok(view! {
        <section class="report-list">
            <header class="report-list__header">
                <h1 class="report-list__title">"Reports"</h1>
                <p class="report-list__subtitle">"Select a report to open it."</p>
            </header>
            {move || match catalog.with(|c| c.phase().clone()) {
                CatalogPhase::Loading => view! { <LoadingSpinner text="Loading reports..." /> }.into_any(),
                CatalogPhase::Failed(message) => {
                    view! { <ErrorMessage message=message on_retry=load /> }.into_any()
                }
                CatalogPhase::Empty => {
                    view! {
                        <div class="report-list__empty">
                            <p>"No reports are available yet."</p>
                            <button class="btn" on:click=move |_| load.run(())>
                                "Refresh"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                CatalogPhase::Loaded(reports) => {
                    view! {
                        <div class="report-list__grid">
                            {reports
                                .into_iter()
                                .map(|report| view! { <ReportCard report=report on_select=on_select /> })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    })
}
