//! Catalog storage and the persisted text format.
//!
//! # Data File
//!
//! ```text
//! library_data.txt
//! ├── 1 Orwell 1984 1949 0      # <ordinal> <author> <title> <year> <available>
//! └── 2 Nat Geo 2020 1
//! ```
//!
//! Ordinals: 1=Book, 2=Magazine, 3=Audio CD, 4=CD-ROM, 5=Cassette,
//! 6=Video Cassette.

pub mod catalog;
pub mod codec;

pub use catalog::{CatalogError, CatalogStore, StatusCounts, StatusFilter};
pub use codec::{display_text, parse_persisted_line, persisted_line, ParseError};
