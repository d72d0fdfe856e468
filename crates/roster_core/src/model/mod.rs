//! Person record model.
//!
//! # Responsibility
//! - Define the record shape shared by storage, store and view layers.
//! - Provide the fallback seed sequence for first start.
//!
//! # Invariants
//! - Every record is identified by a positive, session-unique `PersonId`.
//! - Deletion is a hard removal; ids of removed records are not reissued
//!   within the same session.

pub mod person;
pub mod seed;
