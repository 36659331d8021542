//! Repository layer.
//!
//! # Responsibility
//! - Own the authoritative in-memory note collection.
//! - Round-trip it through the key-value store as one JSON document.
//!
//! # Invariants
//! - Every mutation rewrites the full collection; there are no delta writes.
//! - In-memory state changes only after the write succeeds.

pub mod note_repo;
