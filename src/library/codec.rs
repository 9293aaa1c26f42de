//! Text forms of a media record.
//!
//! Two renderings exist:
//! - The persisted line, one record per line of the data file:
//!   `<ordinal> <author> <title> <year> <1|0>`
//! - The display block, five labelled lines meant for people
//!
//! Author and title are read back as single whitespace-delimited tokens, so
//! values that are empty or contain whitespace cannot be persisted
//! faithfully. Tokens after the fifth are ignored.

use std::fmt;
use std::str::SplitWhitespace;

use thiserror::Error;

use crate::domain::{MediaCategory, MediaRecord, ValidationError};

/// A persisted line that does not decode to a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing {field} field")]
    MissingField { field: &'static str },

    #[error("media type is not an integer: {0:?}")]
    InvalidCategory(String),

    #[error("year is not an integer: {0:?}")]
    InvalidYear(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("status must be 0 or 1, got {0:?}")]
    InvalidStatus(String),
}

/// Render the persisted form of a record, without the line terminator
pub fn persisted_line(record: &MediaRecord) -> String {
    format!(
        "{} {} {} {} {}",
        record.category().ordinal(),
        record.author(),
        record.title(),
        record.year(),
        if record.is_available() { 1 } else { 0 }
    )
}

/// Decode one persisted line
pub fn parse_persisted_line(line: &str) -> Result<MediaRecord, ParseError> {
    let mut tokens = line.split_whitespace();

    let category = next_token(&mut tokens, "media type")?;
    let author = next_token(&mut tokens, "author")?;
    let title = next_token(&mut tokens, "title")?;
    let year = next_token(&mut tokens, "year")?;
    let status = next_token(&mut tokens, "status")?;

    let category = category
        .parse::<i32>()
        .map(MediaCategory::from_ordinal)
        .map_err(|_| ParseError::InvalidCategory(category.to_string()))?;
    let year = year
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidYear(year.to_string()))?;
    let available = match status {
        "1" => true,
        "0" => false,
        other => return Err(ParseError::InvalidStatus(other.to_string())),
    };

    Ok(MediaRecord::new(category, author, title, year, available)?)
}

/// Name of the first text field that would not survive a persisted line
pub fn unstorable_field(record: &MediaRecord) -> Option<&'static str> {
    [("author", record.author()), ("title", record.title())]
        .into_iter()
        .find(|(_, value)| value.is_empty() || value.chars().any(char::is_whitespace))
        .map(|(field, _)| field)
}

/// Render the five-line display block
pub fn display_text(record: &MediaRecord) -> String {
    record.to_string()
}

fn next_token<'a>(
    tokens: &mut SplitWhitespace<'a>,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    tokens.next().ok_or(ParseError::MissingField { field })
}

impl fmt::Display for MediaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Type: {}", self.category())?;
        writeln!(f, "Author: {}", self.author())?;
        writeln!(f, "Title: {}", self.title())?;
        writeln!(f, "Year of publication: {}", self.year())?;
        writeln!(
            f,
            "Status: {}",
            if self.is_available() { "Available" } else { "Borrowed" }
        )
    }
}

impl std::str::FromStr for MediaRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_persisted_line(s)
    }
}
