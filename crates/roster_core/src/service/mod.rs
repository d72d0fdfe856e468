//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into record-level operations.
//! - Keep the view/controller decoupled from storage details.

pub mod person_store;
