//! A single physical item in the catalog.
//!
//! Records carry no identity of their own; the store addresses them by
//! position only. The publication year is the one field with an invariant
//! and it is checked on every path that sets it.

use serde::Serialize;
use thiserror::Error;

use super::category::MediaCategory;

/// Field-level invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Year must be a positive number.")]
    NonPositiveYear { year: i32 },
}

/// One catalogued item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaRecord {
    category: MediaCategory,
    author: String,
    title: String,
    year: i32,
    available: bool,
}

impl Default for MediaRecord {
    fn default() -> Self {
        Self {
            category: MediaCategory::Book,
            author: String::new(),
            title: String::new(),
            year: 1,
            available: true,
        }
    }
}

impl MediaRecord {
    /// Create a fully populated record, rejecting a non-positive year
    pub fn new(
        category: MediaCategory,
        author: impl Into<String>,
        title: impl Into<String>,
        year: i32,
        available: bool,
    ) -> Result<Self, ValidationError> {
        check_year(year)?;

        Ok(Self {
            category,
            author: author.into(),
            title: title.into(),
            year,
            available,
        })
    }

    pub fn category(&self) -> MediaCategory {
        self.category
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// `true` when the item is on the shelf, `false` when borrowed
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn set_category(&mut self, category: MediaCategory) {
        self.category = category;
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Set the publication year. On error the previous year is kept.
    pub fn set_year(&mut self, year: i32) -> Result<(), ValidationError> {
        check_year(year)?;
        self.year = year;
        Ok(())
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

fn check_year(year: i32) -> Result<(), ValidationError> {
    if year > 0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositiveYear { year })
    }
}
