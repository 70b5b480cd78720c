//! Bridge between the report viewer and the third-party visualization widget.
//!
//! ARCHITECTURE
//! ============
//! The widget is imperative: it is mounted into a DOM element and must be
//! reset before that element is reused or discarded. `MountedWidget` turns that
//! into an acquire/release pair. Release runs at most once, on an explicit call
//! or on drop, and skips the reset when the target has already left the document.

#[cfg(test)]
#[path = "embed_widget_test.rs"]
mod embed_widget_test;

use serde::Serialize;

use crate::net::types::EmbedCredential;

/// Widget token type for report-scoped embed tokens.
const TOKEN_TYPE_EMBED: u8 = 1;
/// Widget background mode letting the page show through.
const BACKGROUND_TRANSPARENT: u8 = 1;

/// Configuration object handed to the widget's `embed` call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbedConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: String,
    pub embed_url: String,
    pub access_token: String,
    pub token_type: u8,
    pub settings: EmbedSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmbedSettings {
    pub panes: Panes,
    pub background: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Panes {
    pub filters: PaneState,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaneState {
    pub expanded: bool,
    pub visible: bool,
}

impl EmbedConfig {
    /// Report config: transparent background, filter pane visible but collapsed.
    pub fn for_report(credential: &EmbedCredential) -> Self {
        Self {
            kind: "report",
            id: credential.report_id.clone(),
            embed_url: credential.embed_url.clone(),
            access_token: credential.embed_token.clone(),
            token_type: TOKEN_TYPE_EMBED,
            settings: EmbedSettings {
                panes: Panes { filters: PaneState { expanded: false, visible: true } },
                background: BACKGROUND_TRANSPARENT,
            },
        }
    }
}

/// Something that can host the widget inside a `Target`.
pub trait EmbedHost {
    type Target;

    /// Whether `target` is still part of the live view tree.
    fn is_attached(&self, target: &Self::Target) -> bool;

    /// Mount the widget into `target`.
    ///
    /// # Errors
    ///
    /// Returns a displayable message when the widget refuses the config.
    fn mount(&self, target: &Self::Target, config: &EmbedConfig) -> Result<(), String>;

    /// Detach whatever widget is mounted in `target`.
    fn reset(&self, target: &Self::Target);
}

/// A mounted widget that is released exactly once.
pub struct MountedWidget<H: EmbedHost> {
    host: H,
    target: Option<H::Target>,
}

impl<H: EmbedHost> MountedWidget<H> {
    /// Mount into `target`. On failure the target is reset so no half-built
    /// widget is left behind.
    ///
    /// # Errors
    ///
    /// Returns the host's mount error.
    pub fn acquire(host: H, target: H::Target, config: &EmbedConfig) -> Result<Self, String> {
        if let Err(message) = host.mount(&target, config) {
            if host.is_attached(&target) {
                host.reset(&target);
            }
            return Err(message);
        }
        Ok(Self { host, target: Some(target) })
    }

    pub fn is_released(&self) -> bool {
        self.target.is_none()
    }

    /// Reset the widget. Returns `true` only for the call that actually
    /// performed the reset.
    pub fn release(&mut self) -> bool {
        let Some(target) = self.target.take() else {
            return false;
        };
        if !self.host.is_attached(&target) {
            return false;
        }
        self.host.reset(&target);
        true
    }
}

impl<H: EmbedHost> Drop for MountedWidget<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(feature = "hydrate")]
mod powerbi {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = powerbi, js_name = embed, catch)]
        pub fn embed(element: &web_sys::HtmlElement, config: &JsValue) -> Result<JsValue, JsValue>;

        #[wasm_bindgen(js_namespace = powerbi, js_name = reset, catch)]
        pub fn reset(element: &web_sys::HtmlElement) -> Result<(), JsValue>;
    }
}

/// Host backed by the global `powerbi` service loaded from the page shell.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct PowerBiHost;

#[cfg(feature = "hydrate")]
impl EmbedHost for PowerBiHost {
    type Target = web_sys::HtmlElement;

    fn is_attached(&self, target: &Self::Target) -> bool {
        target.is_connected()
    }

    fn mount(&self, target: &Self::Target, config: &EmbedConfig) -> Result<(), String> {
        let json = serde_json::to_string(config).map_err(|e| e.to_string())?;
        let value = js_sys::JSON::parse(&json).map_err(|e| format!("{e:?}"))?;
        powerbi::embed(target, &value).map(|_| ()).map_err(|e| {
            let message = e.as_string().unwrap_or_else(|| "the report viewer failed to start".to_owned());
            leptos::logging::warn!("widget mount failed: {message}");
            message
        })
    }

    fn reset(&self, target: &Self::Target) {
        if let Err(e) = powerbi::reset(target) {
            leptos::logging::warn!("widget reset failed: {e:?}");
        }
    }
}
