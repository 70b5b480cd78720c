//! Home route: the report catalog, or the viewer for the selected report.

use leptos::prelude::*;

use crate::components::app_header::AppHeader;
use crate::components::protected_route::ProtectedRoute;
use crate::components::report_list::ReportList;
use crate::components::report_viewer::ReportViewer;
use crate::net::types::ReportSummary;

#[component]
pub fn ReportsPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <ReportsContent />
        </ProtectedRoute>
    }
}

#[component]
fn ReportsContent() -> impl IntoView {
    let selected = RwSignal::new(None::<ReportSummary>);
    let on_select = Callback::new(move |report: ReportSummary| {
        leptos::logging::log!("opening report {} ({})", report.id, report.name);
        selected.set(Some(report));
    });
    let on_back = Callback::new(move |()| selected.set(None));

    view! {
        <div class="reports-page">
            <AppHeader />
            <main class="reports-page__main">
                <Show
                    when=move || selected.with(Option::is_some)
                    fallback=move || view! { <ReportList on_select=on_select /> }
                >
                    <ReportViewer report=selected on_back=on_back />
                </Show>
            </main>
        </div>
    }
}
