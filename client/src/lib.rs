//! # client
//!
//! Leptos + WASM frontend for the report dashboard: session and access
//! gating, the report catalog, the embedded report viewer, and the admin
//! user roster. The `server` crate renders it and serves the hydrate bundle.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install the panic panel and logging, then hydrate the
/// server-rendered page.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    components::fault_boundary::install_panic_panel();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
