//! Core logic for the roster person table.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::person::{Avatar, Person, PersonDraft, PersonField, PersonId, PersonValidationError};
pub use model::seed::seed_persons;
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use repo::person_repo::{KvPersonRepository, PersonRepository, PERSONS_KEY};
pub use service::person_store::{PersonStore, StartupWarning, StoreError, StoreResult};
pub use view::controller::{Controller, PageState, PendingDeletion, UiEvent, LOADING_DELAY};
pub use view::frame::Frame;
pub use view::notification::{Notification, NotificationKind, NOTIFICATION_TTL};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
