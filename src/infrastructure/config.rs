//! Configuration management

use crate::domain::{CorrelatorOptions, DuplicatePolicy};
use crate::error::{DaypostError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file at the site root
pub const CONFIG_FILE: &str = "daypost.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding journal entry files
    pub entries_dir: PathBuf,

    /// Directory holding site posts
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,

    /// Directory holding entry photos named `<entry id>.jpg`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photos_dir: Option<PathBuf>,

    /// Directory receiving the per-post data files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Field name under which matched entries are written
    #[serde(default = "default_output_field")]
    pub output_field: String,

    #[serde(default)]
    pub on_duplicate: DuplicatePolicy,

    /// Split a leading title line off entry text
    #[serde(default = "default_extract_titles")]
    pub extract_titles: bool,

    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("_posts")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("_data")
}

fn default_output_field() -> String {
    "dayones".to_string()
}

fn default_extract_titles() -> bool {
    true
}

impl Config {
    /// Create a new config with default values
    pub fn new(entries_dir: PathBuf) -> Self {
        Config {
            entries_dir,
            posts_dir: default_posts_dir(),
            photos_dir: None,
            output_dir: default_output_dir(),
            output_field: default_output_field(),
            on_duplicate: DuplicatePolicy::default(),
            extract_titles: default_extract_titles(),
            created: Utc::now(),
        }
    }

    /// Load config from daypost.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DaypostError::NotSiteDirectory(path.to_path_buf())
            } else {
                DaypostError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| DaypostError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;
        config.validate()?;

        Ok(config)
    }

    /// Save config to daypost.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| DaypostError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path.join(CONFIG_FILE), contents)?;

        Ok(())
    }

    /// Check values that deserialization alone cannot
    pub fn validate(&self) -> Result<()> {
        let field = self.output_field.trim();
        if field.is_empty() {
            return Err(DaypostError::Config(
                "output_field must not be empty".to_string(),
            ));
        }
        if field.contains(['/', '\\']) || field == "." || field == ".." {
            return Err(DaypostError::Config(format!(
                "output_field must be a plain name, got '{}'",
                self.output_field
            )));
        }
        Ok(())
    }

    /// Options handed to the correlator
    pub fn correlator_options(&self) -> CorrelatorOptions {
        CorrelatorOptions {
            on_duplicate: self.on_duplicate,
        }
    }

    /// Resolve a configured directory against the site root
    pub fn resolve(root: &Path, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }
}
