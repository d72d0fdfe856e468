//! Persistence boundary: key-value storage and the person adapter on top.
//!
//! # Responsibility
//! - Define storage contracts used by the record store.
//! - Isolate SQLite and JSON details from store/view orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it; the
//!   caller decides how to fall back.

pub mod kv_store;
pub mod person_repo;
