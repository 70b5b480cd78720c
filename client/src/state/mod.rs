//! Application state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each module is a plain-Rust state machine; pages and components hold them in
//! `RwSignal`s and drive them from async tasks. `session` is app-wide and
//! provided through context; the rest are owned by the view that uses them.

pub mod access;
pub mod catalog;
pub mod embed;
pub mod roster;
pub mod session;
