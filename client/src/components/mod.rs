//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render catalog, viewer, and gate surfaces while reading the
//! shared session and API client from Leptos context providers.

pub mod app_header;
pub mod error_message;
pub mod fault_boundary;
pub mod loading_spinner;
pub mod protected_route;
pub mod report_card;
pub mod report_list;
pub mod report_viewer;
