//! Domain model for notes, session identity, and view preference.
//!
//! # Invariants
//! - Every note is identified by a `NoteId` that is never reused.
//! - Normalization happens at write time; stored values are already clean.

pub mod identity;
pub mod note;
pub mod view_mode;
