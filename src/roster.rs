//! A small pipeline over a JSON roster of characters.
//!
//! The input is a JSON array of rows, each row an array
//! `[name, class, hit_points, max_hit_points, type?]`. [`show_humans`] parses
//! the rows, keeps the humans and formats their names:
//!
//! ```
//! use focal::roster::show_humans;
//!
//! let roster = r#"[
//!     ["jesse warden", "swashbuckler", 18, 21, "human"],
//!     ["brandy fortune", "cleric", 11, 11, "human"],
//!     ["albus dumbledog", "war dog", 7, 9, "dawg"]
//! ]"#;
//!
//! let names: Vec<String> = show_humans(roster)
//!     .unwrap()
//!     .into_iter()
//!     .map(|character| character.name)
//!     .collect();
//! assert_eq!(names, ["Jesse Warden", "Brandy Fortune"]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::optics::{Lens, Optic, Path};
use crate::validation::Validated;

/// What kind of creature a character is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Species {
    /// `human`
    Human,
    /// `dawg`
    Dawg,
    /// Anything else, including `unknown` for rows without a type.
    Other(String),
}

impl Species {
    /// Reads a type column.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text {
            "human" => Self::Human,
            "dawg" => Self::Dawg,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Species {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<Species> for String {
    fn from(species: Species) -> Self {
        species.to_string()
    }
}

impl fmt::Display for Species {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => formatter.write_str("human"),
            Self::Dawg => formatter.write_str("dawg"),
            Self::Other(other) => formatter.write_str(other),
        }
    }
}

/// One roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Display name.
    pub name: String,
    /// Character class.
    pub class: String,
    /// Current hit points.
    pub hit_points: u32,
    /// Maximum hit points.
    pub max_hit_points: u32,
    /// Species, serialized as `type`.
    #[serde(rename = "type")]
    pub species: Species,
}

impl Character {
    /// Lens onto the name.
    pub fn name_lens() -> impl Lens<Self, String> + Clone {
        crate::lens!(Character, name)
    }
}

/// Errors returned while reading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The text is not JSON.
    #[error("roster is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The JSON is not an array of rows.
    #[error("roster must be a JSON array of rows")]
    NotAnArray,
    /// Some rows are malformed; one message per problem.
    #[error("{}", .0.join("; "))]
    InvalidRows(Vec<String>),
}

const UNKNOWN_SPECIES: &str = "unknown";

fn text_column(row: &Value, row_index: usize, column: usize, label: &str) -> Validated<String, String> {
    match Path::root().index(column).view(row) {
        Value::String(text) => Validated::success(text),
        _ => Validated::failure(format!("row {row_index}: {label} must be a string")),
    }
}

fn count_column(row: &Value, row_index: usize, column: usize, label: &str) -> Validated<String, u32> {
    Path::root()
        .index(column)
        .view(row)
        .as_u64()
        .and_then(|count| u32::try_from(count).ok())
        .map_or_else(
            || Validated::failure(format!("row {row_index}: {label} must be a non-negative integer")),
            Validated::success,
        )
}

/// Turns one row into a character, reporting every malformed column.
pub fn row_to_character(row_index: usize, row: &Value) -> Validated<String, Character> {
    let column_count = row.as_array().map_or(0, Vec::len);
    if !(4..=5).contains(&column_count) {
        return Validated::failure(format!("row {row_index}: expected 4 or 5 columns"));
    }

    let species = Path::root()
        .index(4)
        .view_or(Value::from(UNKNOWN_SPECIES), row);
    let species = match species {
        Value::String(text) => Validated::success(Species::from(text)),
        _ => Validated::failure(format!("row {row_index}: type must be a string")),
    };

    text_column(row, row_index, 0, "name")
        .map2(text_column(row, row_index, 1, "class"), |name, class| (name, class))
        .map2(
            count_column(row, row_index, 2, "hit points")
                .map2(count_column(row, row_index, 3, "max hit points"), |hit, max| (hit, max)),
            |(name, class), (hit_points, max_hit_points)| (name, class, hit_points, max_hit_points),
        )
        .map2(species, |(name, class, hit_points, max_hit_points), species| Character {
            name,
            class,
            hit_points,
            max_hit_points,
            species,
        })
}

/// Parses roster text into characters.
///
/// # Errors
///
/// Returns `RosterError::Json` for malformed JSON, `RosterError::NotAnArray`
/// when the top level is not an array, and `RosterError::InvalidRows` with
/// every problem in every row otherwise.
pub fn parse_roster(text: &str) -> Result<Vec<Character>, RosterError> {
    let document: Value = serde_json::from_str(text)?;
    let rows = document.as_array().ok_or(RosterError::NotAnArray)?;
    let characters: Validated<String, Vec<Character>> = rows
        .iter()
        .enumerate()
        .map(|(row_index, row)| row_to_character(row_index, row))
        .collect();
    characters.into_result().map_err(RosterError::InvalidRows)
}

/// Keeps only human characters.
pub fn filter_humans(characters: Vec<Character>) -> Vec<Character> {
    characters
        .into_iter()
        .filter(|character| character.species == Species::Human)
        .collect()
}

/// Rewrites every name in start case.
pub fn format_names(characters: Vec<Character>) -> Vec<Character> {
    let name = Character::name_lens();
    characters
        .into_iter()
        .map(|character| name.modify(character, |text| start_case(&text)))
        .collect()
}

/// Parses, filters and formats a roster.
///
/// # Errors
///
/// See [`parse_roster`].
pub fn show_humans(text: &str) -> Result<Vec<Character>, RosterError> {
    let characters = parse_roster(text)?;
    let total = characters.len();
    let humans = format_names(filter_humans(characters));
    debug!(total, humans = humans.len(), "filtered roster");
    Ok(humans)
}

/// Splits `text` into words and upper-cases the first letter of each.
///
/// Words are separated by anything that is not alphanumeric, by case
/// changes inside a word and by letter/digit changes; the rest of each word
/// is kept as is.
///
/// ```
/// use focal::roster::start_case;
///
/// assert_eq!(start_case("jesse warden"), "Jesse Warden");
/// assert_eq!(start_case("--foo-bar--"), "Foo Bar");
/// assert_eq!(start_case("fooBar"), "Foo Bar");
/// assert_eq!(start_case("__FOO_BAR__"), "FOO BAR");
/// assert_eq!(start_case("abc123def"), "Abc 123 Def");
/// ```
#[must_use]
pub fn start_case(text: &str) -> String {
    words(text)
        .into_iter()
        .map(|word| {
            let mut characters = word.chars();
            characters.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(characters).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for segment in text.split(|character: char| !character.is_alphanumeric()) {
        let characters: Vec<(usize, char)> = segment.char_indices().collect();
        let mut start = 0;
        for window in 1..characters.len() {
            let (_, previous) = characters[window - 1];
            let (offset, current) = characters[window];
            let next_is_lower = characters
                .get(window + 1)
                .is_some_and(|(_, next)| next.is_lowercase());
            let boundary = (previous.is_lowercase() && current.is_uppercase())
                || (previous.is_uppercase() && current.is_uppercase() && next_is_lower)
                || (previous.is_alphabetic() && current.is_numeric())
                || (previous.is_numeric() && current.is_alphabetic());
            if boundary {
                words.push(&segment[start..offset]);
                start = offset;
            }
        }
        if start < segment.len() {
            words.push(&segment[start..]);
        }
    }
    words
}
