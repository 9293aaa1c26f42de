//! Command-line interface for mediacat.
//!
//! Provides the interactive menu shell plus one-shot commands for adding
//! items, listing the catalog, and inspecting configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tokio::io::BufReader;
use tracing::info;

use crate::config::{load_config, ResolvedConfig};
use crate::domain::MediaCategory;
use crate::library::{CatalogStore, StatusFilter};

pub mod input;
pub mod shell;

pub use shell::Shell;

/// mediacat - Catalog of books, magazines, and audio/video media
#[derive(Parser, Debug)]
#[command(name = "mediacat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Catalog data file (overrides the config file)
    #[arg(short, long, global = true, env = "MEDIACAT_DATA_FILE")]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Add an item to the data file
    Add {
        /// Kind of item
        #[arg(short, long, value_enum)]
        category: CategoryArg,

        /// Author, a single word
        #[arg(short, long)]
        author: String,

        /// Title, a single word
        #[arg(short, long)]
        title: String,

        /// Year of publication
        #[arg(short, long)]
        year: i32,

        /// Record the item as borrowed instead of available
        #[arg(long)]
        borrowed: bool,
    },

    /// List items in the data file
    List {
        /// Which items to show
        #[arg(short, long, value_enum, default_value = "all")]
        status: StatusArg,

        /// Print JSON instead of the display form
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration
    Config,
}

/// Media category for CLI (maps to MediaCategory)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Book,
    Magazine,
    AudioCd,
    CdRom,
    Cassette,
    VideoCassette,
}

impl From<CategoryArg> for MediaCategory {
    fn from(c: CategoryArg) -> Self {
        match c {
            CategoryArg::Book => MediaCategory::Book,
            CategoryArg::Magazine => MediaCategory::Magazine,
            CategoryArg::AudioCd => MediaCategory::AudioCd,
            CategoryArg::CdRom => MediaCategory::CdRom,
            CategoryArg::Cassette => MediaCategory::Cassette,
            CategoryArg::VideoCassette => MediaCategory::VideoCassette,
        }
    }
}

/// Status filter for CLI (maps to StatusFilter)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    All,
    Available,
    Borrowed,
}

impl From<StatusArg> for StatusFilter {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::All => StatusFilter::All,
            StatusArg::Available => StatusFilter::Available,
            StatusArg::Borrowed => StatusFilter::Borrowed,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = load_config(self.file)?;

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => run_shell(&config).await,
            Commands::Add {
                category,
                author,
                title,
                year,
                borrowed,
            } => add_item(&config, category.into(), &author, &title, year, !borrowed).await,
            Commands::List { status, json } => list_items(&config, status.into(), json).await,
            Commands::Config => {
                show_config(&config);
                Ok(())
            }
        }
    }
}

/// Run the interactive menu on stdin/stdout
async fn run_shell(config: &ResolvedConfig) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let output = tokio::io::stdout();

    let mut shell = Shell::new(CatalogStore::new(), config, input, output);
    shell.run().await
}

/// Load the data file, treating a missing file as an empty catalog
async fn open_catalog(path: &Path) -> Result<CatalogStore> {
    let mut catalog = CatalogStore::new();

    if !path.exists() {
        return Ok(catalog);
    }

    catalog
        .load_from_path(path)
        .await
        .with_context(|| format!("Failed to load catalog: {}", path.display()))?;
    Ok(catalog)
}

/// Append one item to the data file
async fn add_item(
    config: &ResolvedConfig,
    category: MediaCategory,
    author: &str,
    title: &str,
    year: i32,
    available: bool,
) -> Result<()> {
    let record = input::build_record(category, author, title, year, available, config.max_year)?;

    let mut catalog = open_catalog(&config.data_file).await?;
    catalog.add(record);
    catalog
        .save_to_path(&config.data_file)
        .await
        .with_context(|| format!("Failed to save catalog: {}", config.data_file.display()))?;

    info!(
        path = %config.data_file.display(),
        total = catalog.len(),
        "The media item has been successfully added"
    );
    Ok(())
}

/// List items in the data file
async fn list_items(config: &ResolvedConfig, filter: StatusFilter, json: bool) -> Result<()> {
    let catalog = open_catalog(&config.data_file).await?;

    if json {
        let records: Vec<_> = catalog.list(filter).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if catalog.is_empty() {
        println!("Catalog is empty. Use 'mediacat add' to add items.");
        return Ok(());
    }

    let mut shown = 0;
    for record in catalog.list(filter) {
        println!("{}", record);
        shown += 1;
    }

    let counts = catalog.counts();
    println!(
        "Showing {} of {} items ({} available, {} borrowed)",
        shown,
        catalog.len(),
        counts.available,
        counts.borrowed
    );

    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &ResolvedConfig) {
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Data file:   {}", config.data_file.display());
    println!("Year limit:  new items must be before {}", config.max_year);
}
