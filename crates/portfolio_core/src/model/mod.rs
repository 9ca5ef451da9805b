//! Domain model for portfolio project cards.
//!
//! # Responsibility
//! - Define the record shape persisted by the project store.
//! - Define the candidate and patch shapes callers hand to the store.
//!
//! # Invariants
//! - Every stored record is identified by a unique integer `ProjectId`.
//! - Removal is a hard delete; no tombstones are kept.

pub mod project;
