//! One rendered snapshot of the controller state.

use crate::view::form::{AvatarOption, PersonForm};
use crate::view::notification::Notification;
use crate::view::table::TableView;
use std::fmt::{Display, Formatter};

pub const BUILD_BUTTON_LABEL: &str = "Aufbauen";
pub const LOADING_BUTTON_LABEL: &str = "Lade...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    /// Only the build button is shown.
    Empty { button_label: &'static str },
    /// Build button disabled while the loading delay runs.
    Loading { button_label: &'static str },
    Table { count_label: String, table: TableView },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: &'static str,
    pub submit_label: &'static str,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub avatar_options: Vec<AvatarOption>,
}

impl From<&PersonForm> for FormView {
    fn from(form: &PersonForm) -> Self {
        let draft = form.draft();
        Self {
            title: form.title(),
            submit_label: form.submit_label(),
            first_name: draft.first_name.clone(),
            last_name: draft.last_name.clone(),
            birth_date: draft.birth_date.clone(),
            avatar_options: form.avatar_options(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub page: PageView,
    pub notification: Option<Notification>,
    pub form: Option<FormView>,
    /// Pending delete confirmation prompt.
    pub confirmation: Option<String>,
}

impl Frame {
    pub fn table(&self) -> Option<&TableView> {
        match &self.page {
            PageView::Table { table, .. } => Some(table),
            _ => None,
        }
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(notification) = &self.notification {
            writeln!(f, "{notification}")?;
        }
        match &self.page {
            PageView::Empty { button_label } | PageView::Loading { button_label } => {
                writeln!(f, "[{button_label}]")?;
            }
            PageView::Table { count_label, table } => {
                writeln!(f, "{count_label}")?;
                writeln!(f, "{}", table.to_text())?;
            }
        }
        if let Some(form) = &self.form {
            writeln!(f, "== {} ==", form.title)?;
            writeln!(f, "Vorname: {}", form.first_name)?;
            writeln!(f, "Nachname: {}", form.last_name)?;
            writeln!(f, "Geburtsdatum: {}", form.birth_date)?;
            for option in &form.avatar_options {
                let marker = if option.selected { "(x)" } else { "( )" };
                writeln!(f, "{marker} {}", option.label)?;
            }
            writeln!(f, "[{}]", form.submit_label)?;
        }
        if let Some(prompt) = &self.confirmation {
            writeln!(f, "{prompt}")?;
        }
        Ok(())
    }
}
