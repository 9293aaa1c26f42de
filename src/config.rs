//! Configuration for the media catalog.
//!
//! Configuration sources (highest priority first):
//! 1. Command line / environment (`--file`, MEDIACAT_DATA_FILE)
//! 2. Config file (.mediacat/config.yaml)
//! 3. Defaults (./library_data.txt)
//!
//! Config file discovery:
//! - Searches current directory and parents for .mediacat/config.yaml
//! - Falls back to <user config dir>/mediacat/config.yaml
//! - Paths in a project config file are relative to the project root
//!   (the parent of .mediacat/)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Data file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "library_data.txt";

/// Exclusive ceiling for the publication year of newly entered items
pub const DEFAULT_MAX_YEAR: i32 = 2024;

const CONFIG_DIR: &str = ".mediacat";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    /// Data file (relative to the project root)
    pub data_file: Option<String>,
    /// Exclusive upper bound for years typed in by the operator
    pub max_year: Option<i32>,
}

/// Resolved configuration with absolute paths where known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Catalog data file
    pub data_file: PathBuf,
    /// Exclusive upper bound for new publication years
    pub max_year: i32,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            max_year: DEFAULT_MAX_YEAR,
            config_file: None,
        }
    }
}

/// Find a project config file by searching `start` and its parents
fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Per-user config file, if one exists
fn find_user_config() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("mediacat").join(CONFIG_FILE);
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Base directory that relative paths in `config_path` are resolved against
fn config_base_dir(config_path: &Path) -> &Path {
    let parent = config_path.parent().unwrap_or(Path::new("."));
    if parent.file_name().map_or(false, |n| n == CONFIG_DIR) {
        // .mediacat/config.yaml -> project root
        parent.parent().unwrap_or(Path::new("."))
    } else {
        parent
    }
}

/// Resolve a path that may be relative to the config file's base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Merge a parsed config file and an explicit data file override
fn resolve(
    config: Option<(PathBuf, ConfigFile)>,
    data_file_override: Option<PathBuf>,
) -> ResolvedConfig {
    let mut resolved = ResolvedConfig::default();

    if let Some((config_path, config)) = config {
        if let Some(ref data_file) = config.catalog.data_file {
            resolved.data_file = resolve_path(config_base_dir(&config_path), data_file);
        }
        if let Some(max_year) = config.catalog.max_year {
            resolved.max_year = max_year;
        }
        resolved.config_file = Some(config_path);
    }

    if let Some(path) = data_file_override {
        resolved.data_file = path;
    }

    resolved
}

/// Load configuration from all sources.
///
/// `data_file_override` carries the `--file` flag (or its environment
/// variable) and wins over everything else.
pub fn load_config(data_file_override: Option<PathBuf>) -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config_path = find_project_config(&cwd).or_else(find_user_config);

    let config = match config_path {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    Ok(resolve(config, data_file_override))
}
