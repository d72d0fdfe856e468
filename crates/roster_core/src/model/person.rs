//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical record rendered by the roster table.
//! - Validate form input before it can become (or replace) a record.
//!
//! # Invariants
//! - `id` is positive and never reassigned once issued.
//! - `first_name`, `last_name` and `birth_date` are trimmed and non-empty.
//! - `birth_date` is opaque display text (`DD.MM.YYYY`), never parsed.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable numeric identifier of a person record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = u32;

/// Decorative avatar glyph shown in the first table column.
///
/// Serialized as the glyph itself so the persisted value stays readable.
/// Unknown glyphs survive a load/save cycle as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Avatar {
    /// 👤
    #[default]
    Default,
    /// 👩‍💻
    Woman,
    /// 👨‍💻
    Man,
    /// 👨‍🎓
    Student,
    /// 👩‍🎓
    StudentFemale,
    /// 👨‍🏫
    Teacher,
    /// 👩‍🏫
    TeacherFemale,
    /// Free-text avatar outside the selectable set.
    Custom(String),
}

const GLYPH_DEFAULT: &str = "\u{1F464}";
const GLYPH_WOMAN: &str = "\u{1F469}\u{200D}\u{1F4BB}";
const GLYPH_MAN: &str = "\u{1F468}\u{200D}\u{1F4BB}";
const GLYPH_STUDENT: &str = "\u{1F468}\u{200D}\u{1F393}";
const GLYPH_STUDENT_FEMALE: &str = "\u{1F469}\u{200D}\u{1F393}";
const GLYPH_TEACHER: &str = "\u{1F468}\u{200D}\u{1F3EB}";
const GLYPH_TEACHER_FEMALE: &str = "\u{1F469}\u{200D}\u{1F3EB}";

impl Avatar {
    /// Avatars offered by the form selection, in display order.
    pub const SELECTABLE: [Avatar; 7] = [
        Avatar::Default,
        Avatar::Woman,
        Avatar::Man,
        Avatar::Student,
        Avatar::StudentFemale,
        Avatar::Teacher,
        Avatar::TeacherFemale,
    ];

    pub fn glyph(&self) -> &str {
        match self {
            Self::Default => GLYPH_DEFAULT,
            Self::Woman => GLYPH_WOMAN,
            Self::Man => GLYPH_MAN,
            Self::Student => GLYPH_STUDENT,
            Self::StudentFemale => GLYPH_STUDENT_FEMALE,
            Self::Teacher => GLYPH_TEACHER,
            Self::TeacherFemale => GLYPH_TEACHER_FEMALE,
            Self::Custom(value) => value.as_str(),
        }
    }

    /// Human-readable option label used by the form selection.
    pub fn label(&self) -> &str {
        match self {
            Self::Default => "Standard",
            Self::Woman => "Frau",
            Self::Man => "Mann",
            Self::Student => "Student",
            Self::StudentFemale => "Studentin",
            Self::Teacher => "Lehrer",
            Self::TeacherFemale => "Lehrerin",
            Self::Custom(_) => "Eigenes",
        }
    }

    /// Short ASCII key accepted by command-line input.
    pub fn key(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Woman => "woman",
            Self::Man => "man",
            Self::Student => "student",
            Self::StudentFemale => "student_female",
            Self::Teacher => "teacher",
            Self::TeacherFemale => "teacher_female",
            Self::Custom(_) => "custom",
        }
    }

    /// Exact glyph lookup used when reading persisted records.
    ///
    /// No trimming and no key aliases, so a `Custom` value comes back
    /// byte-for-byte.
    pub fn from_glyph(value: String) -> Self {
        Self::SELECTABLE
            .iter()
            .find(|avatar| avatar.glyph() == value)
            .cloned()
            .unwrap_or(Self::Custom(value))
    }

    /// Resolves typed input: a glyph or a selectable key, whitespace
    /// ignored. Anything else becomes `Custom`.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        Self::SELECTABLE
            .iter()
            .find(|avatar| avatar.glyph() == trimmed || avatar.key() == trimmed)
            .cloned()
            .unwrap_or_else(|| Self::Custom(trimmed.to_string()))
    }

    pub fn is_blank(&self) -> bool {
        self.glyph().trim().is_empty()
    }
}

impl Display for Avatar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

impl From<String> for Avatar {
    fn from(value: String) -> Self {
        Self::from_glyph(value)
    }
}

impl From<Avatar> for String {
    fn from(value: Avatar) -> Self {
        match value {
            Avatar::Custom(text) => text,
            other => other.glyph().to_string(),
        }
    }
}

/// Editable fields of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonField {
    FirstName,
    LastName,
    BirthDate,
    Avatar,
}

impl PersonField {
    /// Wire name of the field in the persisted value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::BirthDate => "birthDate",
            Self::Avatar => "avatar",
        }
    }
}

impl Display for PersonField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for person input and persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonValidationError {
    /// A required field is empty or whitespace-only.
    EmptyField(PersonField),
    /// `0` is never a valid id.
    ZeroId,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "required field `{field}` is empty"),
            Self::ZeroId => write!(f, "person id must be positive"),
        }
    }
}

impl Error for PersonValidationError {}

/// Unvalidated person input, as captured by the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub avatar: Avatar,
}

impl PersonDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: impl Into<String>,
        avatar: Avatar,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date: birth_date.into(),
            avatar,
        }
    }

    /// Returns a trimmed copy, or the first empty required field.
    ///
    /// Fields are checked in form order: first name, last name, birth date,
    /// then avatar.
    pub fn validate(&self) -> Result<PersonDraft, PersonValidationError> {
        let first_name = required(&self.first_name, PersonField::FirstName)?;
        let last_name = required(&self.last_name, PersonField::LastName)?;
        let birth_date = required(&self.birth_date, PersonField::BirthDate)?;
        if self.avatar.is_blank() {
            return Err(PersonValidationError::EmptyField(PersonField::Avatar));
        }

        Ok(PersonDraft {
            first_name,
            last_name,
            birth_date,
            avatar: self.avatar.clone(),
        })
    }
}

fn required(value: &str, field: PersonField) -> Result<String, PersonValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PersonValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Canonical person record.
///
/// Serialized with camelCase keys to match the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    /// Display text, `DD.MM.YYYY`. Never parsed.
    pub birth_date: String,
    pub avatar: Avatar,
}

impl Person {
    /// Creates a record from form input.
    ///
    /// # Errors
    /// - `ZeroId` when `id == 0`.
    /// - `EmptyField` when any required draft field is blank.
    pub fn new(id: PersonId, draft: &PersonDraft) -> Result<Self, PersonValidationError> {
        if id == 0 {
            return Err(PersonValidationError::ZeroId);
        }
        let draft = draft.validate()?;
        Ok(Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            birth_date: draft.birth_date,
            avatar: draft.avatar,
        })
    }

    /// Replaces every mutable field; `id` is left untouched.
    ///
    /// On validation failure the record is not modified.
    pub fn replace_fields(&mut self, draft: &PersonDraft) -> Result<(), PersonValidationError> {
        let draft = draft.validate()?;
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.birth_date = draft.birth_date;
        self.avatar = draft.avatar;
        Ok(())
    }

    /// Checks record invariants; used on read paths.
    pub fn validate(&self) -> Result<(), PersonValidationError> {
        if self.id == 0 {
            return Err(PersonValidationError::ZeroId);
        }
        for (value, field) in [
            (&self.first_name, PersonField::FirstName),
            (&self.last_name, PersonField::LastName),
            (&self.birth_date, PersonField::BirthDate),
        ] {
            if value.trim().is_empty() {
                return Err(PersonValidationError::EmptyField(field));
            }
        }
        if self.avatar.is_blank() {
            return Err(PersonValidationError::EmptyField(PersonField::Avatar));
        }
        Ok(())
    }

    /// `"{first} {last}"`, as used in banners and confirmations.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn to_draft(&self) -> PersonDraft {
        PersonDraft::new(
            self.first_name.clone(),
            self.last_name.clone(),
            self.birth_date.clone(),
            self.avatar.clone(),
        )
    }
}
