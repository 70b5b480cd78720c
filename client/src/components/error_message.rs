//! Inline error panel with an optional retry action.

use leptos::prelude::*;

#[component]
pub fn ErrorMessage(#[prop(into)] message: String, #[prop(optional)] on_retry: Option<Callback<()>>) -> impl IntoView {
    view! {
        <div class="error-message" role="alert">
            <div class="error-message__icon" aria-hidden="true">"⚠"</div>
            <h3 class="error-message__title">"Error"</h3>
            <p class="error-message__text">{message}</p>
            {on_retry
                .map(|retry| {
                    view! {
                        <button class="btn btn--primary error-message__retry" on:click=move |_| retry.run(())>
                            "Retry"
                        </button>
                    }
                })}
        </div>
    }
}
