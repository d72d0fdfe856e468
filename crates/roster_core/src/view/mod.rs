//! View/controller layer.
//!
//! # Responsibility
//! - Render the record sequence as a table, banners, form and prompts.
//! - Turn user events into record store operations.
//!
//! # Invariants
//! - Rendering is a pure function of controller state.
//! - The view never touches storage directly; it goes through the store.

pub mod controller;
pub mod form;
pub mod frame;
pub mod notification;
pub mod table;
