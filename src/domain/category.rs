//! Media category enumeration.
//!
//! Categories are persisted by their 1-based ordinal. Ordinals outside the
//! known table survive a load/save cycle unchanged but display as "Unknown".

use serde::Serialize;

/// Kind of physical item held in the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCategory {
    /// Printed book
    #[default]
    Book,

    /// Magazine issue
    Magazine,

    /// Audio compact disc
    AudioCd,

    /// Data compact disc
    CdRom,

    /// Audio cassette
    Cassette,

    /// VHS or similar video cassette
    VideoCassette,

    /// Ordinal read from a data file with no name mapping
    Unknown(i32),
}

impl MediaCategory {
    /// All named categories in ordinal order
    pub const ALL: [MediaCategory; 6] = [
        MediaCategory::Book,
        MediaCategory::Magazine,
        MediaCategory::AudioCd,
        MediaCategory::CdRom,
        MediaCategory::Cassette,
        MediaCategory::VideoCassette,
    ];

    /// 1-based position in the fixed category table
    pub fn ordinal(self) -> i32 {
        match self {
            MediaCategory::Book => 1,
            MediaCategory::Magazine => 2,
            MediaCategory::AudioCd => 3,
            MediaCategory::CdRom => 4,
            MediaCategory::Cassette => 5,
            MediaCategory::VideoCassette => 6,
            MediaCategory::Unknown(n) => n,
        }
    }

    /// Map any ordinal to a category, keeping unrecognized values
    pub fn from_ordinal(ordinal: i32) -> Self {
        Self::named(ordinal).unwrap_or(MediaCategory::Unknown(ordinal))
    }

    /// Map an ordinal to a named category, or `None` outside 1..=6
    pub fn named(ordinal: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.ordinal() == ordinal)
    }

    /// Human-readable name used in the display form
    pub fn display_name(self) -> &'static str {
        match self {
            MediaCategory::Book => "Book",
            MediaCategory::Magazine => "Magazine",
            MediaCategory::AudioCd => "Audio CD",
            MediaCategory::CdRom => "CD-ROM",
            MediaCategory::Cassette => "Cassette",
            MediaCategory::VideoCassette => "Video Cassette",
            MediaCategory::Unknown(_) => "Unknown",
        }
    }
}

impl std::fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
