//! Interactive menu over a catalog.
//!
//! The shell owns the in-memory catalog for the whole session. Nothing is
//! read from or written to the data file unless the operator picks the
//! save or load entries.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::input::{parse_category, parse_status, parse_word, parse_year};
use crate::config::ResolvedConfig;
use crate::domain::MediaRecord;
use crate::library::{CatalogStore, StatusFilter};

pub const MENU: &str = "\
1. Add new media item
2. Display all media items
3. Display available media items
4. Display borrowed media items
5. Save data to file
6. Load data from file
0. Exit
Choice: ";

const CATEGORY_PROMPT: &str =
    "Media type (1-Book, 2-Magazine, 3-Audio CD, 4-CD-ROM, 5-Cassette, 6-Video Cassette): ";
const STATUS_PROMPT: &str = "Status (1-Available, 0-Borrowed): ";

/// Menu-driven front end reading from `input` and writing to `output`
pub struct Shell<R, W> {
    catalog: CatalogStore,
    data_file: PathBuf,
    max_year: i32,
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(catalog: CatalogStore, config: &ResolvedConfig, input: R, output: W) -> Self {
        Self {
            catalog,
            data_file: config.data_file.clone(),
            max_year: config.max_year,
            input,
            output,
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Give back the catalog once the session is over
    pub fn into_catalog(self) -> CatalogStore {
        self.catalog
    }

    /// Run the menu loop until the operator exits or input ends
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.write(MENU).await?;

            let Some(line) = self.read_line().await? else {
                break;
            };

            let choice = match line.trim().parse::<i32>() {
                Ok(choice) => choice,
                Err(_) => {
                    warn!(input = line.trim(), "Rejected menu choice");
                    self.write("Error: Invalid input. Please enter a valid number.\n")
                        .await?;
                    continue;
                }
            };

            match choice {
                1 => self.add_media().await?,
                2 => self.display(StatusFilter::All).await?,
                3 => self.display(StatusFilter::Available).await?,
                4 => self.display(StatusFilter::Borrowed).await?,
                5 => self.save().await?,
                6 => self.load().await?,
                0 => {
                    self.write("Exiting the application.\n").await?;
                    break;
                }
                _ => self.write("Invalid choice.\n").await?,
            }
        }

        Ok(())
    }

    async fn add_media(&mut self) -> Result<()> {
        match self.read_record().await {
            Ok(record) => {
                debug!(category = %record.category(), title = record.title(), "Added item");
                self.catalog.add(record);
                self.write("The media item has been successfully added.\n")
                    .await?;
            }
            Err(e) => {
                warn!(error = %e, "Rejected media item");
                self.write(&format!("Error adding media: {}\n", e)).await?;
            }
        }
        Ok(())
    }

    /// Prompt for every field; the first bad answer abandons the item
    async fn read_record(&mut self) -> Result<MediaRecord> {
        let category = parse_category(&self.prompt(CATEGORY_PROMPT).await?)?;
        let author = parse_word("Author", &self.prompt("Author: ").await?)?;
        let title = parse_word("Title", &self.prompt("Title: ").await?)?;
        let year = parse_year(&self.prompt("Year of publication: ").await?, self.max_year)?;
        let available = parse_status(&self.prompt(STATUS_PROMPT).await?)?;

        Ok(MediaRecord::new(category, author, title, year, available)?)
    }

    async fn display(&mut self, filter: StatusFilter) -> Result<()> {
        let text: String = self
            .catalog
            .list(filter)
            .map(|record| format!("{}\n", record))
            .collect();
        self.write(&text).await
    }

    async fn save(&mut self) -> Result<()> {
        match self.catalog.save_to_path(&self.data_file).await {
            Ok(()) => {
                self.write("Data has been successfully saved to the file.\n")
                    .await
            }
            Err(e) => self.write(&format!("Error saving to file: {}\n", e)).await,
        }
    }

    async fn load(&mut self) -> Result<()> {
        match self.catalog.load_from_path(&self.data_file).await {
            Ok(_) => {
                self.write("Data has been successfully loaded from the file.\n")
                    .await
            }
            Err(e) => {
                self.write(&format!("Error loading from file: {}\n", e))
                    .await
            }
        }
    }

    async fn prompt(&mut self, text: &str) -> Result<String> {
        self.write(text).await?;
        self.read_line()
            .await?
            .context("Unexpected end of input.")
    }

    async fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .await
            .context("Failed to read input")?;

        Ok((read > 0).then_some(line))
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .await
            .context("Failed to write output")?;
        self.output.flush().await.context("Failed to flush output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Collects formatted log lines for assertions
    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogCapture {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn config() -> ResolvedConfig {
        ResolvedConfig {
            data_file: PathBuf::from("/nonexistent/mediacat/library_data.txt"),
            ..Default::default()
        }
    }

    async fn session(input: &str) -> (CatalogStore, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(CatalogStore::new(), &config(), input.as_bytes(), &mut output);
        shell.run().await.unwrap();
        let catalog = shell.into_catalog();
        (catalog, String::from_utf8(output).unwrap())
    }

    #[tokio::test]
    async fn test_exit_immediately() {
        let (catalog, output) = session("0\n").await;
        assert!(catalog.is_empty());
        assert_eq!(output, format!("{}Exiting the application.\n", MENU));
    }

    #[tokio::test]
    async fn test_end_of_input_exits() {
        let (_, output) = session("").await;
        assert_eq!(output, MENU);
    }

    #[tokio::test]
    async fn test_add_then_display() {
        let (catalog, output) = session("1\n1\nOrwell\n1984\n1949\n0\n2\n0\n").await;

        assert_eq!(catalog.len(), 1);
        assert!(output.contains("The media item has been successfully added.\n"));
        assert!(output.contains(
            "Type: Book\nAuthor: Orwell\nTitle: 1984\nYear of publication: 1949\nStatus: Borrowed\n\n"
        ));
    }

    #[tokio::test]
    async fn test_invalid_menu_input() {
        let (_, output) = session("abc\n9\n0\n").await;
        assert!(output.contains("Error: Invalid input. Please enter a valid number.\n"));
        assert!(output.contains("Invalid choice.\n"));
    }

    #[tokio::test]
    async fn test_bad_field_abandons_item() {
        let (catalog, output) = session("1\n7\n1\n1\nOrwell\n1984\n2024\n0\n").await;

        assert!(catalog.is_empty());
        assert!(output.contains(
            "Error adding media: Invalid media type. Please enter a number between 1 and 6.\n"
        ));
        assert!(output.contains(
            "Error adding media: Invalid year. Please enter a year between 1 and 2023.\n"
        ));
    }

    #[tokio::test]
    async fn test_load_failure_reported() {
        let (catalog, output) = session("6\n0\n").await;
        assert!(catalog.is_empty());
        assert!(output.contains("Error loading from file: Failed to read"));
    }

    #[tokio::test]
    async fn test_rejected_input_is_logged() {
        let logs = LogCapture::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (catalog, _) = session("abc\n1\n1\nGeorge Orwell\n0\n").await;
        assert!(catalog.is_empty());

        let text = logs.text();
        assert!(text.contains("Rejected menu choice"));
        assert!(text.contains("input=\"abc\""));
        assert!(text.contains("Rejected media item"));
        assert!(text.contains("Author must be a single word without spaces."));
    }
}
