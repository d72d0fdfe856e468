//! Fallback records installed when nothing is persisted yet.

use crate::model::person::{Avatar, Person};

/// Returns the five seed records with ids 1 to 5, in display order.
pub fn seed_persons() -> Vec<Person> {
    [
        (1, "Anna", "Müller", "15.03.1995", Avatar::Woman),
        (2, "Max", "Schmidt", "22.07.1988", Avatar::Man),
        (3, "Lisa", "Weber", "08.11.1992", Avatar::Woman),
        (4, "Tom", "Fischer", "03.05.1990", Avatar::Man),
        (5, "Sarah", "Bauer", "19.09.1987", Avatar::Woman),
    ]
    .into_iter()
    .map(|(id, first_name, last_name, birth_date, avatar)| Person {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: birth_date.to_string(),
        avatar,
    })
    .collect()
}
