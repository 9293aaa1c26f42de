//! Domain types for the media catalog.
//!
//! This module contains the core data structures:
//! - MediaCategory: The fixed table of item kinds
//! - MediaRecord: One physical item and its field invariants

pub mod category;
pub mod record;

// Re-export commonly used types
pub use category::MediaCategory;
pub use record::{MediaRecord, ValidationError};
