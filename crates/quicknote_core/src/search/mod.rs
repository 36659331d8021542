//! Read-only projections over the note collection.
//!
//! # Invariants
//! - Nothing in this module mutates or persists notes.

pub mod query;
