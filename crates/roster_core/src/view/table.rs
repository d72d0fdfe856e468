//! Pure table projection of the person sequence.
//!
//! Rendering is a full rebuild from the current sequence; there is no
//! incremental diffing.

use crate::model::person::{Person, PersonId};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

pub const TABLE_HEADERS: [&str; 7] = [
    "Bild",
    "ID",
    "Vorname",
    "Nachname",
    "Geburtsdatum",
    "Bearbeiten",
    "Löschen",
];

const EDIT_ACTION: &str = "✎";
const DELETE_ACTION: &str = "✗";

/// One rendered row; `person_id` is the dispatch target of both actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub person_id: PersonId,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
}

impl TableRow {
    fn cells(&self) -> [String; 7] {
        [
            self.avatar.clone(),
            self.person_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.birth_date.clone(),
            EDIT_ACTION.to_string(),
            DELETE_ACTION.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableView {
    pub rows: Vec<TableRow>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table as box-drawn text.
    pub fn to_text(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_header(TABLE_HEADERS);
        for row in &self.rows {
            table.add_row(row.cells());
        }
        table.to_string()
    }
}

/// Maps the sequence to rows, one per record, in sequence order.
pub fn render_table(persons: &[Person]) -> TableView {
    TableView {
        rows: persons
            .iter()
            .map(|person| TableRow {
                person_id: person.id,
                avatar: person.avatar.glyph().to_string(),
                first_name: person.first_name.clone(),
                last_name: person.last_name.clone(),
                birth_date: person.birth_date.clone(),
            })
            .collect(),
    }
}

pub fn person_count_label(count: usize) -> String {
    format!("Personen: {count} gefunden")
}
