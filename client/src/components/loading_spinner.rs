//! Centered spinner with a caption.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(self) -> &'static str {
        match self {
            Self::Small => "spinner spinner--small",
            Self::Medium => "spinner spinner--medium",
            Self::Large => "spinner spinner--large",
        }
    }
}

#[component]
pub fn LoadingSpinner(
    #[prop(optional)] size: SpinnerSize,
    #[prop(into, default = "Loading...".to_owned())] text: String,
) -> impl IntoView {
    view! {
        <div class="loading" role="status" aria-live="polite">
            <div class=size.class() aria-hidden="true"></div>
            <p class="loading__text">{text}</p>
        </div>
    }
}
