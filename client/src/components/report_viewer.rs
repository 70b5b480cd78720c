//! Embedded report viewer.
//!
//! ARCHITECTURE
//! ============
//! `EmbedSession` decides; this component executes. Each `EmbedCommand` maps to
//! one browser-side effect:
//!
//! - `Fetch`: credential request tied to an abort handle.
//! - `ScheduleRetry`: one-second ticks fed back into the session.
//! - `Mount`: release the previous widget, then acquire a new one.
//!
//! The widget container is always rendered so the mount target exists before a
//! credential arrives. Selection changes and unmount release the widget and
//! abort the outstanding request.

use leptos::prelude::*;

use crate::components::error_message::ErrorMessage;
use crate::components::fault_boundary::{RenderFault, require};
use crate::components::loading_spinner::{LoadingSpinner, SpinnerSize};
use crate::net::abort::InFlight;
use crate::net::api::ApiClient;
use crate::net::types::ReportSummary;
use crate::state::embed::{EmbedCommand, EmbedPhase, EmbedSession};
use crate::state::session::SessionStore;
#[cfg(feature = "hydrate")]
use crate::util::embed_widget::{MountedWidget, PowerBiHost};

/// Handles the command executor needs; all `Copy`.
#[derive(Clone, Copy)]
struct Viewer {
    embed: RwSignal<EmbedSession>,
    session: RwSignal<SessionStore>,
    api: StoredValue<ApiClient>,
    in_flight: StoredValue<InFlight, LocalStorage>,
    container: NodeRef<leptos::html::Div>,
    #[cfg(feature = "hydrate")]
    widget: StoredValue<Option<MountedWidget<PowerBiHost>>, LocalStorage>,
}

impl Viewer {
    /// Drop everything tied to the previous selection.
    fn teardown(self) {
        self.in_flight.try_update_value(InFlight::cancel);
        #[cfg(feature = "hydrate")]
        self.widget.try_update_value(|slot| {
            if let Some(mut widget) = slot.take() {
                widget.release();
            }
        });
    }

    #[cfg(feature = "hydrate")]
    fn execute(self, command: EmbedCommand) {
        match command {
            EmbedCommand::Nothing => {}
            EmbedCommand::Fetch { ticket, report_id } => {
                let Some(handle) = self.in_flight.try_update_value(InFlight::replace) else {
                    return;
                };
                let api = self.api.get_value();
                leptos::task::spawn_local(async move {
                    let result = api.embed_credential(report_id, Some(&*handle)).await;
                    if let Err(err @ crate::net::error::ApiError::Unauthorized) = &result {
                        crate::state::session::absorb_failure(self.session, err);
                    }
                    if let Some(next) = self.embed.try_update(|e| e.on_credential(ticket, result)) {
                        self.execute(next);
                    }
                });
            }
            EmbedCommand::ScheduleRetry { ticket, delay_secs } => {
                leptos::logging::warn!("embed credential rate limited; retrying in {delay_secs}s");
                leptos::task::spawn_local(async move {
                    loop {
                        gloo_timers::future::sleep(std::time::Duration::from_secs(1)).await;
                        let Some(next) = self.embed.try_update(|e| e.tick(ticket)) else {
                            return;
                        };
                        if next != EmbedCommand::Nothing {
                            self.execute(next);
                            return;
                        }
                        let waiting = self.embed.with_untracked(|e| {
                            e.is_current(ticket) && matches!(e.phase(), EmbedPhase::RateLimited { .. })
                        });
                        if !waiting {
                            return;
                        }
                    }
                });
            }
            EmbedCommand::Mount { ticket, credential } => {
                use wasm_bindgen::JsCast as _;

                self.teardown();
                let Some(container) = self.container.get_untracked() else {
                    let message = "The report container is not available.".to_owned();
                    self.embed.try_update(|e| e.on_mount_failed(ticket, message));
                    return;
                };
                let target: web_sys::HtmlElement = container.unchecked_into();
                let config = crate::util::embed_widget::EmbedConfig::for_report(&credential);
                match MountedWidget::acquire(PowerBiHost, target, &config) {
                    Ok(widget) => {
                        self.widget.try_update_value(|slot| *slot = Some(widget));
                        self.embed.try_update(|e| e.on_mounted(ticket));
                        leptos::logging::log!("report {} mounted", credential.report_id);
                    }
                    Err(message) => {
                        self.embed.try_update(|e| e.on_mount_failed(ticket, message));
                    }
                }
            }
        }
    }

    #[cfg(not(feature = "hydrate"))]
    fn execute(self, command: EmbedCommand) {
        let _ = (self.session, self.api, self.container, command);
    }
}

#[component]
pub fn ReportViewer(
    #[prop(into)] report: Signal<Option<ReportSummary>>,
    on_back: Callback<()>,
) -> Result<impl IntoView, RenderFault> {
    let container = NodeRef::<leptos::html::Div>::new();
    let viewer = Viewer {
        embed: RwSignal::new(EmbedSession::default()),
        session: require::<RwSignal<SessionStore>>("session")?,
        api: StoredValue::new(require::<ApiClient>("API client")?),
        in_flight: StoredValue::new_local(InFlight::default()),
        container,
        #[cfg(feature = "hydrate")]
        widget: StoredValue::new_local(None),
    };
    let embed = viewer.embed;

    let selected_id = Memo::new(move |_| report.with(|r| r.as_ref().map(|r| r.id)));
    Effect::new(move || {
        let id = selected_id.get();
        viewer.teardown();
        let command = embed.try_update(|e| match id {
            Some(id) => e.select(id),
            None => {
                e.clear();
                EmbedCommand::Nothing
            }
        });
        if let Some(command) = command {
            viewer.execute(command);
        }
    });

    on_cleanup(move || {
        viewer.teardown();
        embed.try_update(EmbedSession::clear);
    });

    let on_retry = Callback::new(move |()| {
        viewer.teardown();
        if let Some(command) = embed.try_update(EmbedSession::retry) {
            viewer.execute(command);
        }
    });

    let title = move || report.with(|r| r.as_ref().map(|r| r.name.clone()).unwrap_or_default());
    let ready = move || embed.with(|e| *e.phase() == EmbedPhase::Ready);

    Ok(view! {
        <section class="report-viewer">
            <header class="report-viewer__header">
                <button class="btn report-viewer__back" on:click=move |_| on_back.run(())>
                    "← Back to reports"
                </button>
                <h1 class="report-viewer__title">{title}</h1>
            </header>
            {move || {
                let status = embed.with(|e| (e.phase().clone(), e.status_message()));
                match status {
                    (EmbedPhase::Idle | EmbedPhase::Ready, _) => ().into_any(),
                    (EmbedPhase::RateLimited { .. }, message) => {
                        view! {
                            <div class="report-viewer__notice report-viewer__notice--warning" role="status">
                                <LoadingSpinner size=SpinnerSize::Small text=message.unwrap_or_default() />
                            </div>
                        }
                            .into_any()
                    }
                    (EmbedPhase::Failed(message), _) => {
                        view! { <ErrorMessage message=message on_retry=on_retry /> }.into_any()
                    }
                    (EmbedPhase::FetchingCredential | EmbedPhase::Embedding, message) => {
                        view! { <LoadingSpinner text=message.unwrap_or_default() /> }.into_any()
                    }
                }
            }}
            <div
                class="report-viewer__frame"
                class:report-viewer__frame--hidden=move || !ready()
                node_ref=container
            ></div>
        </section>
    })
}
