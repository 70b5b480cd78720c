//! Networking modules for the reporting backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `abort` owns per-request cancellation, `error`
//! normalizes failures, and `types` defines the wire schema.

pub mod abort;
pub mod api;
pub mod error;
pub mod types;
