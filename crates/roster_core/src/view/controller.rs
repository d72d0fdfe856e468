//! Event-driven controller between user input and the record store.
//!
//! # Responsibility
//! - Translate `UiEvent`s into store operations.
//! - Own page state, the open form, pending deletion and the banner slot.
//! - Produce a fresh `Frame` after every event.
//!
//! # Invariants
//! - Events are handled one at a time on the caller's thread.
//! - Deferred work (loading delay, banner expiry) only happens in `tick`,
//!   and only if its target is still current.
//! - A blank required field never closes the form.
//! - Nothing is removed without a confirmed `PendingDeletion`.

use crate::model::person::{PersonField, PersonId};
use crate::repo::person_repo::PersonRepository;
use crate::service::person_store::{PersonStore, StartupWarning, StoreError};
use crate::view::form::{FormMode, PersonForm};
use crate::view::frame::{Frame, FormView, PageView, BUILD_BUTTON_LABEL, LOADING_BUTTON_LABEL};
use crate::view::notification::{Notification, NotificationCenter, NotificationId, NotificationKind};
use crate::view::table::{person_count_label, render_table};
use log::debug;
use std::time::{Duration, Instant};

/// Simulated delay between the build click and the first table render.
pub const LOADING_DELAY: Duration = Duration::from_millis(800);

pub const MISSING_FIELDS_MESSAGE: &str = "Bitte füllen Sie alle Felder aus!";
pub const NOT_FOUND_MESSAGE: &str = "Diese Person existiert nicht mehr.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Empty,
    Loading { ready_at: Instant },
    Table,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    BuildTable,
    OpenCreateForm,
    OpenEditForm(PersonId),
    EditField(PersonField, String),
    CancelForm,
    SubmitForm,
    RequestDelete(PersonId),
    ConfirmDelete,
    CancelDelete,
    DismissNotification(NotificationId),
}

impl UiEvent {
    /// Content-free event name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BuildTable => "build_table",
            Self::OpenCreateForm => "open_create_form",
            Self::OpenEditForm(_) => "open_edit_form",
            Self::EditField(..) => "edit_field",
            Self::CancelForm => "cancel_form",
            Self::SubmitForm => "submit_form",
            Self::RequestDelete(_) => "request_delete",
            Self::ConfirmDelete => "confirm_delete",
            Self::CancelDelete => "cancel_delete",
            Self::DismissNotification(_) => "dismiss_notification",
        }
    }
}

/// Deletion awaiting explicit confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub person_id: PersonId,
    pub prompt: String,
}

pub struct Controller<R: PersonRepository> {
    store: PersonStore<R>,
    page: PageState,
    notifications: NotificationCenter,
    form: Option<PersonForm>,
    pending_delete: Option<PendingDeletion>,
}

impl<R: PersonRepository> Controller<R> {
    /// Wraps an opened store; a startup warning becomes the first banner.
    pub fn new(store: PersonStore<R>, warning: Option<StartupWarning>, now: Instant) -> Self {
        let mut notifications = NotificationCenter::new();
        if let Some(warning) = warning {
            notifications.show(NotificationKind::Info, warning.to_string(), now);
        }
        Self {
            store,
            page: PageState::Empty,
            notifications,
            form: None,
            pending_delete: None,
        }
    }

    pub fn store(&self) -> &PersonStore<R> {
        &self.store
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notifications.current()
    }

    pub fn pending_deletion(&self) -> Option<&PendingDeletion> {
        self.pending_delete.as_ref()
    }

    pub fn form(&self) -> Option<&PersonForm> {
        self.form.as_ref()
    }

    /// Runs due deferred work and returns the current frame.
    pub fn tick(&mut self, now: Instant) -> Frame {
        self.run_deadlines(now);
        self.frame()
    }

    /// Handles one event at `now` and returns the re-rendered frame.
    pub fn handle(&mut self, event: UiEvent, now: Instant) -> Frame {
        self.run_deadlines(now);
        debug!("event=ui_event module=view name={}", event.name());

        match event {
            UiEvent::BuildTable => {
                if self.page == PageState::Empty {
                    self.page = PageState::Loading {
                        ready_at: now + LOADING_DELAY,
                    };
                }
            }
            UiEvent::OpenCreateForm => {
                if self.page == PageState::Table {
                    self.pending_delete = None;
                    self.form = Some(PersonForm::create());
                }
            }
            UiEvent::OpenEditForm(id) => {
                if self.page == PageState::Table {
                    if let Some(person) = self.store.find_by_id(id) {
                        self.pending_delete = None;
                        self.form = Some(PersonForm::edit(person));
                    }
                }
            }
            UiEvent::EditField(field, value) => {
                if let Some(form) = self.form.as_mut() {
                    form.set_field(field, value);
                }
            }
            UiEvent::CancelForm => self.form = None,
            UiEvent::SubmitForm => self.submit_form(now),
            UiEvent::RequestDelete(id) => {
                if self.page == PageState::Table {
                    if let Some(person) = self.store.find_by_id(id) {
                        self.form = None;
                        self.pending_delete = Some(PendingDeletion {
                            person_id: id,
                            prompt: format!(
                                "Möchten Sie \"{}\" wirklich löschen?",
                                person.full_name()
                            ),
                        });
                    }
                }
            }
            UiEvent::ConfirmDelete => self.confirm_delete(now),
            UiEvent::CancelDelete => self.pending_delete = None,
            UiEvent::DismissNotification(id) => {
                self.notifications.dismiss(id);
            }
        }

        self.frame()
    }

    /// Pure projection of the current state.
    pub fn frame(&self) -> Frame {
        let page = match self.page {
            PageState::Empty => PageView::Empty {
                button_label: BUILD_BUTTON_LABEL,
            },
            PageState::Loading { .. } => PageView::Loading {
                button_label: LOADING_BUTTON_LABEL,
            },
            PageState::Table => PageView::Table {
                count_label: person_count_label(self.store.len()),
                table: render_table(self.store.persons()),
            },
        };
        Frame {
            page,
            notification: self.notifications.current().cloned(),
            form: self.form.as_ref().map(FormView::from),
            confirmation: self
                .pending_delete
                .as_ref()
                .map(|pending| pending.prompt.clone()),
        }
    }

    /// Loading completes before banner expiry; a late tick never shows a
    /// banner past its deadline.
    fn run_deadlines(&mut self, now: Instant) {
        if let PageState::Loading { ready_at } = self.page {
            if now >= ready_at {
                self.page = PageState::Table;
                self.notifications.show(
                    NotificationKind::Success,
                    format!(
                        "Tabelle mit {} Personen erfolgreich geladen!",
                        self.store.len()
                    ),
                    ready_at,
                );
            }
        }
        self.notifications.tick(now);
    }

    fn submit_form(&mut self, now: Instant) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let draft = form.draft().clone();
        let (result, verb) = match form.mode() {
            FormMode::Create => (self.store.add(&draft), "hinzugefügt"),
            FormMode::Edit(id) => (self.store.update(id, &draft), "aktualisiert"),
        };

        match result {
            Ok(person) => {
                self.form = None;
                self.notifications.show(
                    NotificationKind::Success,
                    format!(
                        "Person \"{}\" wurde erfolgreich {verb}!",
                        person.full_name()
                    ),
                    now,
                );
            }
            Err(StoreError::Validation(_)) => {
                self.notifications
                    .show(NotificationKind::Error, MISSING_FIELDS_MESSAGE, now);
            }
            Err(StoreError::NotFound(_)) => {
                self.form = None;
                self.notifications
                    .show(NotificationKind::Info, NOT_FOUND_MESSAGE, now);
            }
            Err(err) => {
                self.notifications.show(
                    NotificationKind::Error,
                    format!("Speichern fehlgeschlagen: {err}"),
                    now,
                );
            }
        }
    }

    fn confirm_delete(&mut self, now: Instant) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        match self.store.remove(pending.person_id) {
            Ok(person) => {
                self.notifications.show(
                    NotificationKind::Success,
                    format!(
                        "Person \"{}\" wurde erfolgreich gelöscht!",
                        person.full_name()
                    ),
                    now,
                );
            }
            Err(StoreError::NotFound(_)) => {
                self.notifications
                    .show(NotificationKind::Info, NOT_FOUND_MESSAGE, now);
            }
            Err(err) => {
                self.notifications.show(
                    NotificationKind::Error,
                    format!("Löschen fehlgeschlagen: {err}"),
                    now,
                );
            }
        }
    }
}
