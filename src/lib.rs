//! mediacat - Console catalog manager for physical media holdings
//!
//! Records books, magazines, and audio/video media, tracks whether each
//! item is available or borrowed, and keeps the catalog in a flat text file
//! between runs.
//!
//! # Architecture
//!
//! - Records live in an ordered in-memory catalog owned by the front end
//! - The data file holds one whitespace-separated record per line
//! - A load either replaces the whole catalog or leaves it untouched
//!
//! # Modules
//!
//! - `domain`: Data structures (MediaCategory, MediaRecord)
//! - `library`: Catalog store and the line codec
//! - `config`: Data file and input limits
//! - `cli`: Command-line interface and interactive menu
//!
//! # Usage
//!
//! ```bash
//! # Interactive menu
//! mediacat
//!
//! # Scripted use
//! mediacat add --category book --author Orwell --title 1984 --year 1949 --borrowed
//! mediacat list --status available
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod library;

// Re-export main types at crate root for convenience
pub use config::ResolvedConfig;
pub use domain::{MediaCategory, MediaRecord, ValidationError};
pub use library::{CatalogError, CatalogStore, ParseError, StatusFilter};
