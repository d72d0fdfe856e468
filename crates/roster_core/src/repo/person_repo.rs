//! Person persistence adapter.
//!
//! # Responsibility
//! - Load and save the full person sequence as one JSON value.
//! - Reject persisted values that break record invariants.
//!
//! # Invariants
//! - The whole sequence lives under `PERSONS_KEY`; there is no partial update.
//! - Loaded sequences have unique positive ids and non-empty fields.
//! - Log lines carry counts only, never record contents.

use crate::model::person::{Person, PersonId};
use crate::repo::kv_store::{KeyValueStore, RepoError, RepoResult};
use log::{debug, warn};
use std::collections::HashSet;

/// Fixed storage key of the persisted person sequence.
pub const PERSONS_KEY: &str = "personen";

/// Durable load/save contract for the person sequence.
pub trait PersonRepository {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> RepoResult<Option<Vec<Person>>>;
    /// Replaces the persisted sequence.
    fn save(&self, persons: &[Person]) -> RepoResult<()>;
}

/// `PersonRepository` over any `KeyValueStore`.
pub struct KvPersonRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvPersonRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> PersonRepository for KvPersonRepository<S> {
    fn load(&self) -> RepoResult<Option<Vec<Person>>> {
        let Some(raw) = self.store.get(PERSONS_KEY)? else {
            debug!("event=persons_load module=repo status=absent");
            return Ok(None);
        };

        let persons = decode_persons(&raw).inspect_err(|err| {
            warn!("event=persons_load module=repo status=error error={err}");
        })?;
        debug!(
            "event=persons_load module=repo status=ok count={}",
            persons.len()
        );
        Ok(Some(persons))
    }

    fn save(&self, persons: &[Person]) -> RepoResult<()> {
        let raw = serde_json::to_string(persons).map_err(RepoError::Serialize)?;
        self.store.set(PERSONS_KEY, &raw)?;
        debug!(
            "event=persons_save module=repo status=ok count={} bytes={}",
            persons.len(),
            raw.len()
        );
        Ok(())
    }
}

/// Parses and validates one persisted person sequence.
pub fn decode_persons(raw: &str) -> RepoResult<Vec<Person>> {
    let persons: Vec<Person> = serde_json::from_str(raw)
        .map_err(|err| RepoError::InvalidData(format!("value is not a person list: {err}")))?;

    let mut seen = HashSet::<PersonId>::with_capacity(persons.len());
    for person in &persons {
        person.validate()?;
        if !seen.insert(person.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate person id {}",
                person.id
            )));
        }
    }
    Ok(persons)
}
