//! Root error boundary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps the whole routed tree in `App`. Components that cannot render return
//! `Err(RenderFault)` and land here as a recovery panel instead of taking the
//! page down; the user can clear the faults and re-render, or reload the page.
//!
//! A panic cannot be recovered in place: the WASM instance is gone. The hook
//! installed by `install_panic_panel` swaps the page body for a static panel
//! whose reload action is plain HTML and needs no running module.

#[cfg(test)]
#[path = "fault_boundary_test.rs"]
mod fault_boundary_test;

use leptos::prelude::*;

pub(crate) const FAULT_TITLE: &str = "Something went wrong";
const GENERIC_FAULT: &str = "Something went wrong while rendering this page.";

/// Static recovery markup shown after a panic.
pub(crate) const PANIC_PANEL_HTML: &str = r#"<div class="fault" role="alert"><div class="fault__card"><h2 class="fault__title">Something went wrong</h2><ul class="fault__details"><li>The application stopped unexpectedly.</li></ul><div class="fault__actions"><button class="btn btn--primary" type="button" onclick="window.location.reload()">Reload page</button></div></div></div>"#;

/// A view that could not be built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderFault {
    #[error("{0} is not available on this page")]
    MissingContext(&'static str),
}

/// `use_context`, turning an absent provider into a fault the boundary renders.
///
/// # Errors
///
/// `RenderFault::MissingContext(label)` when no ancestor provides `T`.
pub fn require<T: Clone + 'static>(label: &'static str) -> Result<T, RenderFault> {
    use_context::<T>().ok_or(RenderFault::MissingContext(label))
}

/// Distinct fault messages, in first-seen order.
pub(crate) fn fault_lines<I>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut lines: Vec<String> = Vec::new();
    for message in messages {
        let message = message.trim().to_owned();
        if message.is_empty() || lines.contains(&message) {
            continue;
        }
        lines.push(message);
    }
    if lines.is_empty() {
        lines.push(GENERIC_FAULT.to_owned());
    }
    lines
}

#[component]
pub fn FaultBoundary(children: Children) -> impl IntoView {
    view! {
        <ErrorBoundary fallback=|errors| {
            let lines = fault_lines(errors.get_untracked().into_iter().map(|(_, e)| e.to_string()));
            for line in &lines {
                leptos::logging::error!("render fault: {line}");
            }
            let on_reset = Callback::new(move |()| errors.update(|e| *e = Default::default()));
            view! { <FaultPanel lines=lines on_reset=on_reset /> }
        }>{children()}</ErrorBoundary>
    }
}

/// Recovery panel: the fault list, "try again" and "reload page".
#[component]
pub fn FaultPanel(lines: Vec<String>, on_reset: Callback<()>) -> impl IntoView {
    view! {
        <div class="fault" role="alert">
            <div class="fault__card">
                <h2 class="fault__title">{FAULT_TITLE}</h2>
                <ul class="fault__details">
                    {lines.into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
                </ul>
                <div class="fault__actions">
                    <button class="btn btn--primary" on:click=move |_| on_reset.run(())>
                        "Try again"
                    </button>
                    <button class="btn" on:click=move |_| reload_page()>
                        "Reload page"
                    </button>
                </div>
            </div>
        </div>
    }
}

/// Log panics to the console, then replace the page with `PANIC_PANEL_HTML`.
#[cfg(feature = "hydrate")]
pub fn install_panic_panel() {
    std::panic::set_hook(Box::new(|info| {
        console_error_panic_hook::hook(info);
        let body = web_sys::window().and_then(|w| w.document()).and_then(|d| d.body());
        if let Some(body) = body {
            body.set_inner_html(PANIC_PANEL_HTML);
        }
    }));
}

fn reload_page() {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}
