//! Small single-value stores sharing the key-value backend.
//!
//! # Invariants
//! - Reads never fail; unreadable or malformed values load as the default.
//! - Writes surface backend failures as `KvError`.

pub mod preference_store;
pub mod session_store;
