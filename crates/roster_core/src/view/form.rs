//! Create/edit form state.
//!
//! The form only captures input; validation and persistence happen when the
//! controller submits its draft to the store.

use crate::model::person::{Avatar, Person, PersonDraft, PersonField, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PersonId),
}

/// One selectable avatar option as shown by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarOption {
    pub avatar: Avatar,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonForm {
    mode: FormMode,
    draft: PersonDraft,
}

impl PersonForm {
    /// Empty form with the default avatar selected.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: PersonDraft::default(),
        }
    }

    /// Form pre-filled from an existing record.
    pub fn edit(person: &Person) -> Self {
        Self {
            mode: FormMode::Edit(person.id),
            draft: person.to_draft(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &PersonDraft {
        &self.draft
    }

    pub fn set_field(&mut self, field: PersonField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonField::FirstName => self.draft.first_name = value,
            PersonField::LastName => self.draft.last_name = value,
            PersonField::BirthDate => self.draft.birth_date = value,
            PersonField::Avatar => self.draft.avatar = Avatar::parse(&value),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Neue Person hinzufügen",
            FormMode::Edit(_) => "Person bearbeiten",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Hinzufügen",
            FormMode::Edit(_) => "Aktualisieren",
        }
    }

    /// Selectable avatars; a custom avatar on the draft is listed last.
    pub fn avatar_options(&self) -> Vec<AvatarOption> {
        let mut options: Vec<AvatarOption> = Avatar::SELECTABLE
            .iter()
            .map(|avatar| AvatarOption {
                avatar: avatar.clone(),
                label: format!("{} {}", avatar.glyph(), avatar.label()),
                selected: *avatar == self.draft.avatar,
            })
            .collect();
        if let Avatar::Custom(text) = &self.draft.avatar {
            options.push(AvatarOption {
                avatar: self.draft.avatar.clone(),
                label: format!("{text} {}", self.draft.avatar.label()),
                selected: true,
            });
        }
        options
    }
}
