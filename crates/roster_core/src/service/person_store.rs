//! In-memory record store with write-through persistence.
//!
//! # Responsibility
//! - Own the session's person sequence (insertion order = display order).
//! - Expose add/update/remove/find operations with validation.
//! - Persist the full sequence after every successful mutation.
//!
//! # Invariants
//! - Ids are unique and never reissued within a session, even after the
//!   highest record is removed.
//! - A mutation is committed to memory only after the repository accepted
//!   it; a failed save leaves the sequence unchanged.
//! - Opening never fails: unreadable or malformed storage falls back to
//!   the seed sequence and reports a `StartupWarning`.

use crate::model::person::{Person, PersonDraft, PersonId, PersonValidationError};
use crate::model::seed::seed_persons;
use crate::repo::kv_store::RepoError;
use crate::repo::person_repo::PersonRepository;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
#[derive(Debug)]
pub enum StoreError {
    /// Required input was empty; nothing changed.
    Validation(PersonValidationError),
    /// No live record carries this id; nothing changed.
    NotFound(PersonId),
    /// The id space is used up; nothing changed.
    IdExhausted,
    /// The repository rejected the write; nothing changed.
    Storage(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::IdExhausted => write!(f, "no person ids left to assign"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) | Self::IdExhausted => None,
        }
    }
}

impl From<PersonValidationError> for StoreError {
    fn from(value: PersonValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Non-blocking problem detected while opening the store.
#[derive(Debug)]
pub enum StartupWarning {
    /// Persisted value did not match the record shape; seed data is used.
    MalformedData(RepoError),
    /// Storage could not be read; seed data is used.
    ReadFailed(RepoError),
    /// Seed data is in memory but could not be written back.
    SeedNotPersisted(RepoError),
}

impl Display for StartupWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedData(err) => {
                write!(f, "stored persons were unreadable, sample data loaded ({err})")
            }
            Self::ReadFailed(err) => {
                write!(f, "storage could not be read, sample data loaded ({err})")
            }
            Self::SeedNotPersisted(err) => {
                write!(f, "sample data could not be saved ({err})")
            }
        }
    }
}

/// Owned person sequence backed by a `PersonRepository`.
pub struct PersonStore<R: PersonRepository> {
    repo: R,
    persons: Vec<Person>,
    last_issued_id: PersonId,
}

impl<R: PersonRepository> PersonStore<R> {
    /// Loads the persisted sequence, or installs and persists seed data.
    pub fn open(repo: R) -> (Self, Option<StartupWarning>) {
        let (persons, warning) = match repo.load() {
            Ok(Some(persons)) => {
                info!(
                    "event=store_open module=store status=ok source=storage count={}",
                    persons.len()
                );
                (persons, None)
            }
            Ok(None) => {
                let seed = seed_persons();
                let warning = repo.save(&seed).err().map(StartupWarning::SeedNotPersisted);
                info!(
                    "event=store_open module=store status=ok source=seed count={}",
                    seed.len()
                );
                (seed, warning)
            }
            Err(err) => {
                let seed = seed_persons();
                let warning = match repo.save(&seed) {
                    Err(save_err) => StartupWarning::SeedNotPersisted(save_err),
                    Ok(()) if is_malformed(&err) => StartupWarning::MalformedData(err),
                    Ok(()) => StartupWarning::ReadFailed(err),
                };
                warn!("event=store_open module=store status=fallback source=seed warning={warning}");
                (seed, Some(warning))
            }
        };

        let last_issued_id = max_id(&persons);
        (
            Self {
                repo,
                persons,
                last_issued_id,
            },
            warning,
        )
    }

    /// Current sequence in display order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Linear scan; first match.
    pub fn find_by_id(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|person| person.id == id)
    }

    /// Validates, assigns the next id, appends and persists.
    pub fn add(&mut self, draft: &PersonDraft) -> StoreResult<Person> {
        let draft = draft.validate()?;
        let id = self
            .last_issued_id
            .max(max_id(&self.persons))
            .checked_add(1)
            .ok_or(StoreError::IdExhausted)?;
        let person = Person::new(id, &draft)?;

        let mut candidate = self.persons.clone();
        candidate.push(person.clone());
        self.commit(candidate)?;
        self.last_issued_id = id;

        info!("event=person_add module=store status=ok id={id} count={}", self.len());
        Ok(person)
    }

    /// Replaces the mutable fields of `id` in place and persists.
    pub fn update(&mut self, id: PersonId, draft: &PersonDraft) -> StoreResult<Person> {
        let draft = draft.validate()?;
        let index = self.position(id)?;

        let mut candidate = self.persons.clone();
        candidate[index].replace_fields(&draft)?;
        let updated = candidate[index].clone();
        self.commit(candidate)?;

        info!("event=person_update module=store status=ok id={id}");
        Ok(updated)
    }

    /// Detaches `id` from the sequence and persists.
    pub fn remove(&mut self, id: PersonId) -> StoreResult<Person> {
        let index = self.position(id)?;

        let mut candidate = self.persons.clone();
        let removed = candidate.remove(index);
        self.commit(candidate)?;

        info!("event=person_remove module=store status=ok id={id} count={}", self.len());
        Ok(removed)
    }

    fn position(&self, id: PersonId) -> StoreResult<usize> {
        self.persons
            .iter()
            .position(|person| person.id == id)
            .ok_or_else(|| {
                warn!("event=person_lookup module=store status=not_found id={id}");
                StoreError::NotFound(id)
            })
    }

    fn commit(&mut self, candidate: Vec<Person>) -> StoreResult<()> {
        if let Err(err) = self.repo.save(&candidate) {
            warn!("event=store_commit module=store status=error error={err}");
            return Err(err.into());
        }
        self.persons = candidate;
        Ok(())
    }
}

fn max_id(persons: &[Person]) -> PersonId {
    persons.iter().map(|person| person.id).max().unwrap_or(0)
}

fn is_malformed(err: &RepoError) -> bool {
    matches!(err, RepoError::InvalidData(_) | RepoError::Validation(_))
}
