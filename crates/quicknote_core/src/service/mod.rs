//! Startup wiring for hosts.
//!
//! # Responsibility
//! - Construct the note, preference, and session stores once over one
//!   key-value store and hand them out by reference.

pub mod app_state;
