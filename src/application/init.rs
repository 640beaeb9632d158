//! Initialize site use case

use crate::domain::DuplicatePolicy;
use crate::error::{DaypostError, Result};
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::{Config, FileSystemRepository, SiteRepository};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for `daypost init`
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Journal entries directory, relative to the site root or absolute
    pub entries_dir: PathBuf,

    /// Posts directory (None = default)
    pub posts_dir: Option<PathBuf>,

    pub on_duplicate: DuplicatePolicy,
}

pub struct InitService;

impl InitService {
    /// Write a new daypost.toml at `path`, returning its location.
    ///
    /// Fails when the site is already initialized.
    pub fn execute(path: &Path, options: InitOptions) -> Result<PathBuf> {
        if !path.exists() {
            fs::create_dir_all(path)?;
        }

        let repo = FileSystemRepository::new(path.to_path_buf());
        if repo.is_initialized() {
            return Err(DaypostError::Config(format!(
                "Site already initialized: {}",
                path.join(CONFIG_FILE).display()
            )));
        }

        let mut config = Config::new(options.entries_dir);
        if let Some(posts_dir) = options.posts_dir {
            config.posts_dir = posts_dir;
        }
        config.on_duplicate = options.on_duplicate;

        repo.save_config(&config)?;
        tracing::debug!(root = %path.display(), "initialized site");

        Ok(path.join(CONFIG_FILE))
    }
}
