//! Operator input checks.
//!
//! The catalog core only enforces `year > 0`. Everything typed in by an
//! operator passes through here first so that a new record can always be
//! written to and read back from the data file.

use thiserror::Error;

use crate::domain::{MediaCategory, MediaRecord, ValidationError};

/// Rejected operator input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Invalid media type. Please enter a number between 1 and 6.")]
    InvalidCategory(String),

    #[error("{field} must not be empty.")]
    EmptyField { field: &'static str },

    #[error("{field} must be a single word without spaces.")]
    ContainsWhitespace { field: &'static str },

    #[error("Invalid year. Please enter a year between 1 and {latest}.")]
    InvalidYear { input: String, latest: i32 },

    #[error("Invalid status. Please enter a 1-Available or 0-Borrowed.")]
    InvalidStatus(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Media type number as shown in the menu (1..=6)
pub fn parse_category(input: &str) -> Result<MediaCategory, InputError> {
    input
        .trim()
        .parse::<i32>()
        .ok()
        .and_then(MediaCategory::named)
        .ok_or_else(|| InputError::InvalidCategory(input.trim().to_string()))
}

/// A single whitespace-free word, as the data file requires
pub fn parse_word(field: &'static str, input: &str) -> Result<String, InputError> {
    let word = input.trim();
    if word.is_empty() {
        return Err(InputError::EmptyField { field });
    }
    if word.chars().any(char::is_whitespace) {
        return Err(InputError::ContainsWhitespace { field });
    }
    Ok(word.to_string())
}

/// Publication year in `1..max_year`
pub fn parse_year(input: &str, max_year: i32) -> Result<i32, InputError> {
    let input = input.trim();
    match input.parse::<i32>() {
        Ok(year) => check_year(year, max_year),
        Err(_) => Err(invalid_year(input, max_year)),
    }
}

/// Range check for a year that is already a number
pub fn check_year(year: i32, max_year: i32) -> Result<i32, InputError> {
    if year <= 0 || year >= max_year {
        return Err(invalid_year(&year.to_string(), max_year));
    }
    Ok(year)
}

fn invalid_year(input: &str, max_year: i32) -> InputError {
    InputError::InvalidYear {
        input: input.to_string(),
        latest: max_year.saturating_sub(1),
    }
}

/// `1` for available, `0` for borrowed
pub fn parse_status(input: &str) -> Result<bool, InputError> {
    match input.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        other => Err(InputError::InvalidStatus(other.to_string())),
    }
}

/// Build a record from already-typed values, applying the operator rules
pub fn build_record(
    category: MediaCategory,
    author: &str,
    title: &str,
    year: i32,
    available: bool,
    max_year: i32,
) -> Result<MediaRecord, InputError> {
    let author = parse_word("Author", author)?;
    let title = parse_word("Title", title)?;
    let year = check_year(year, max_year)?;

    Ok(MediaRecord::new(category, author, title, year, available)?)
}
