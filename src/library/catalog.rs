//! In-memory catalog of media records.
//!
//! Records are kept in insertion order (or file order after a load).
//! Persistence goes through the line codec; a load either installs every
//! record in the source or changes nothing.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use super::codec::{parse_persisted_line, persisted_line, unstorable_field, ParseError};
use crate::domain::MediaRecord;

/// Errors from saving or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to {} {}: {}", .action, .path.display(), .source)]
    File {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed record on line {line}: {source}")]
    Parse { line: usize, source: ParseError },
}

impl CatalogError {
    fn file(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        CatalogError::File {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Which records a listing should include
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Available,
    Borrowed,
}

impl StatusFilter {
    pub fn matches(self, record: &MediaRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Available => record.is_available(),
            StatusFilter::Borrowed => !record.is_available(),
        }
    }
}

/// Availability totals for a catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub available: usize,
    pub borrowed: usize,
}

/// Ordered collection of media records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogStore {
    records: Vec<MediaRecord>,
}

impl CatalogStore {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to the end of the catalog
    pub fn add(&mut self, record: MediaRecord) {
        self.records.push(record);
    }

    /// Iterate over all records in catalog order
    pub fn list_all(&self) -> impl Iterator<Item = &MediaRecord> + '_ {
        self.records.iter()
    }

    /// Iterate over records currently on the shelf
    pub fn list_available(&self) -> impl Iterator<Item = &MediaRecord> + '_ {
        self.list(StatusFilter::Available)
    }

    /// Iterate over records currently lent out
    pub fn list_borrowed(&self) -> impl Iterator<Item = &MediaRecord> + '_ {
        self.list(StatusFilter::Borrowed)
    }

    /// Iterate over records matching a status filter, keeping catalog order
    pub fn list(&self, filter: StatusFilter) -> impl Iterator<Item = &MediaRecord> + '_ {
        self.records.iter().filter(move |r| filter.matches(r))
    }

    /// Discard the current contents and install `records` in their given order
    pub fn replace_all(&mut self, records: Vec<MediaRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[MediaRecord] {
        &self.records
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        let available = self.list_available().count();
        StatusCounts {
            available,
            borrowed: self.records.len() - available,
        }
    }

    /// Write one persisted line per record, in catalog order.
    ///
    /// Every record is checked first; if an author or title is empty or
    /// contains whitespace nothing is written and the error is
    /// `InvalidData`.
    pub fn save_to<W: Write>(&self, mut sink: W) -> Result<(), CatalogError> {
        for (index, record) in self.records.iter().enumerate() {
            if let Some(field) = unstorable_field(record) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("record {}: {} must be a single non-empty word", index + 1, field),
                )
                .into());
            }
        }

        for record in &self.records {
            writeln!(sink, "{}", persisted_line(record))?;
        }
        sink.flush()?;
        Ok(())
    }

    /// Replace the catalog with the records read from `source`.
    ///
    /// Blank lines are skipped. Every other line must decode; the first one
    /// that doesn't aborts the load and the catalog keeps its previous
    /// contents. Returns the number of records loaded.
    pub fn load_from<R: BufRead>(&mut self, source: R) -> Result<usize, CatalogError> {
        let mut records = Vec::new();

        for (index, line) in source.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record = parse_persisted_line(&line).map_err(|source| CatalogError::Parse {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        let count = records.len();
        self.replace_all(records);
        Ok(count)
    }

    /// Save the catalog to a file.
    ///
    /// The contents are written to a sibling temporary file first and then
    /// renamed over `path`, so a failed save never truncates an existing file.
    pub async fn save_to_path(&self, path: &Path) -> Result<(), CatalogError> {
        let mut buffer = Vec::new();
        self.save_to(&mut buffer)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CatalogError::file("create directory", parent, e))?;
        }

        let staging = staging_path(path);
        if let Err(e) = fs::write(&staging, &buffer).await {
            let _ = fs::remove_file(&staging).await;
            return Err(CatalogError::file("write", &staging, e));
        }

        if let Err(e) = fs::rename(&staging, path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(CatalogError::file("replace", path, e));
        }

        debug!(path = %path.display(), records = self.len(), "Saved catalog");
        Ok(())
    }

    /// Load the catalog from a file, leaving it untouched on any error
    pub async fn load_from_path(&mut self, path: &Path) -> Result<usize, CatalogError> {
        let content = fs::read(path)
            .await
            .map_err(|e| CatalogError::file("read", path, e))?;

        let count = self.load_from(content.as_slice())?;

        debug!(path = %path.display(), records = count, "Loaded catalog");
        Ok(count)
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MediaCategory;

    fn record(author: &str, available: bool) -> MediaRecord {
        MediaRecord::new(MediaCategory::Book, author, "Title", 2000, available).unwrap()
    }

    #[test]
    fn test_catalog_add_appends_last() {
        let mut catalog = CatalogStore::new();
        catalog.add(record("a", true));
        catalog.add(record("b", false));

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.list_all().last().unwrap().author(), "b");
    }

    #[test]
    fn test_catalog_allows_duplicates() {
        let mut catalog = CatalogStore::new();
        catalog.add(record("a", true));
        catalog.add(record("a", true));

        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_catalog_filters_by_status() {
        let mut catalog = CatalogStore::new();
        catalog.add(record("a", true));
        catalog.add(record("b", false));
        catalog.add(record("c", true));

        let available: Vec<&str> = catalog.list_available().map(|r| r.author()).collect();
        let borrowed: Vec<&str> = catalog.list_borrowed().map(|r| r.author()).collect();

        assert_eq!(available, vec!["a", "c"]);
        assert_eq!(borrowed, vec!["b"]);
        assert_eq!(catalog.list(StatusFilter::All).count(), 3);
        assert_eq!(
            catalog.counts(),
            StatusCounts {
                available: 2,
                borrowed: 1
            }
        );
    }

    #[test]
    fn test_catalog_replace_all() {
        let mut catalog = CatalogStore::new();
        catalog.add(record("old", true));

        catalog.replace_all(vec![record("x", true), record("y", false)]);

        let authors: Vec<&str> = catalog.list_all().map(|r| r.author()).collect();
        assert_eq!(authors, vec!["x", "y"]);
    }

    #[test]
    fn test_load_skips_blank_lines() {
        let mut catalog = CatalogStore::new();
        let count = catalog
            .load_from("\n1 a b 2000 1\n   \n2 c d 2001 0\n".as_bytes())
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(catalog.records()[1].category(), MediaCategory::Magazine);
    }

    #[test]
    fn test_load_reports_line_number() {
        let mut catalog = CatalogStore::new();
        let err = catalog
            .load_from("1 a b 2000 1\n\n1 a b 2000\n".as_bytes())
            .unwrap_err();

        match err {
            CatalogError::Parse { line, source } => {
                assert_eq!(line, 3);
                assert_eq!(source, ParseError::MissingField { field: "status" });
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_save_rejects_unstorable_record_before_writing() {
        let mut catalog = CatalogStore::new();
        catalog.add(record("a", true));
        catalog.add(MediaRecord::default());

        let mut sink = Vec::new();
        let err = catalog.save_to(&mut sink).unwrap_err();

        match &err {
            CatalogError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            other => panic!("Expected IO error, got {:?}", other),
        }
        assert!(err.to_string().contains("record 2: author must be"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_staging_path_is_sibling() {
        assert_eq!(
            staging_path(Path::new("/data/library_data.txt")),
            PathBuf::from("/data/library_data.txt.tmp")
        );
        assert_eq!(
            staging_path(Path::new("library_data.txt")),
            PathBuf::from("library_data.txt.tmp")
        );
    }
}
