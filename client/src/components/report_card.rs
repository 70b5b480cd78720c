//! Catalog card for a single report.
//!
//! Shows the thumbnail when one is configured and loads. A report without one
//! gets a lettered placeholder; a thumbnail that fails to load is swapped for
//! an "image not available" notice. Blank descriptions are not rendered.

#[cfg(test)]
#[path = "report_card_test.rs"]
mod report_card_test;

use leptos::prelude::*;

use crate::net::types::ReportSummary;

/// Single glyph shown when a report has no usable thumbnail.
pub(crate) fn placeholder_glyph(name: &str) -> String {
    name.trim()
        .chars()
        .find(|c| c.is_alphanumeric())
        .map_or_else(|| "#".to_owned(), |c| c.to_uppercase().collect())
}

#[component]
pub fn ReportCard(report: ReportSummary, on_select: Callback<ReportSummary>) -> impl IntoView {
    let thumbnail = report.visible_thumbnail().map(str::to_owned);
    let description = report.visible_description().map(str::to_owned);
    let glyph = placeholder_glyph(&report.name);
    let name = report.name.clone();
    let title = report.name.clone();
    let id = report.id;
    let has_thumbnail = thumbnail.is_some();
    let broken = RwSignal::new(false);
    let show_image = move || has_thumbnail && !broken.get();

    view! {
        <button class="report-card" type="button" on:click=move |_| on_select.run(report.clone())>
            <span class="report-card__media">
                <Show
                    when=show_image
                    fallback=move || {
                        if broken.get() {
                            view! { <span class="report-card__unavailable">"📊 Image not available"</span> }.into_any()
                        } else {
                            view! { <span class="report-card__placeholder" aria-hidden="true">{glyph.clone()}</span> }
                                .into_any()
                        }
                    }
                >
                    <img
                        class="report-card__thumbnail"
                        src=thumbnail.clone()
                        alt=format!("Preview of {name}")
                        loading="lazy"
                        on:error=move |_| broken.set(true)
                    />
                </Show>
            </span>
            <span class="report-card__body">
                <span class="report-card__name">{title}</span>
                {description.map(|text| view! { <span class="report-card__description">{text}</span> })}
                <span class="report-card__id">{format!("ID: {id}")}</span>
            </span>
        </button>
    }
}
