//! File system repository

use crate::domain::{Entry, Post};
use crate::error::{DaypostError, Result};
use crate::infrastructure::config::CONFIG_FILE;
use crate::infrastructure::{Config, Document};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Abstract repository for site operations
pub trait SiteRepository {
    /// Get the root directory of this site
    fn root(&self) -> &Path;

    /// Load configuration from daypost.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to daypost.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if daypost.toml exists
    fn is_initialized(&self) -> bool;
}

/// File system implementation of SiteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover the site root.
    /// Checks DAYPOST_ROOT first, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("DAYPOST_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_config(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(DaypostError::Config(format!(
                    "DAYPOST_ROOT is set to '{}' but no {} found there. \
                    Run 'daypost init' in that directory or unset DAYPOST_ROOT.",
                    path.display(),
                    CONFIG_FILE
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the site root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_config(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(DaypostError::NotSiteDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_config(path: &Path) -> bool {
        path.join(CONFIG_FILE).is_file()
    }
}

impl SiteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config(&self.root)
    }
}

// Site content (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Load every post under the configured posts directory
    pub fn load_posts(&self, config: &Config) -> Result<Vec<Post>> {
        let dir = self.existing_dir(&config.posts_dir, "Posts")?;

        let mut posts = Vec::new();
        for path in markdown_files(&dir) {
            let content = fs::read_to_string(&path)?;
            let post = Document::parse(&content, &path)?.into_post(file_stem(&path), &path)?;
            posts.push(post);
        }

        tracing::debug!(count = posts.len(), dir = %dir.display(), "loaded posts");
        Ok(posts)
    }

    /// Load every entry under the configured entries directory, in path order
    pub fn load_entries(&self, config: &Config) -> Result<Vec<Entry>> {
        let dir = self.existing_dir(&config.entries_dir, "Entries")?;

        let mut entries = Vec::new();
        for path in markdown_files(&dir) {
            let content = fs::read_to_string(&path)?;
            let mut entry =
                Document::parse(&content, &path)?.into_entry(file_stem(&path), &path)?;
            self.attach_photo(config, &mut entry);
            entries.push(entry);
        }

        tracing::debug!(count = entries.len(), dir = %dir.display(), "loaded entries");
        Ok(entries)
    }

    /// Record the entry's photo when `<photos_dir>/<id>.jpg` exists
    pub fn attach_photo(&self, config: &Config, entry: &mut Entry) {
        let Some(photos_dir) = &config.photos_dir else {
            return;
        };

        let relative = photos_dir.join(format!("{}.jpg", entry.id));
        if Config::resolve(&self.root, &relative).is_file() {
            let photo = relative
                .iter()
                .map(|part| part.to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            entry
                .fields
                .insert("photo".to_string(), toml::Value::String(photo));
        }
    }

    /// Path of the data file written for a post
    pub fn output_path(&self, config: &Config, post: &Post) -> PathBuf {
        Config::resolve(&self.root, &config.output_dir)
            .join(&config.output_field)
            .join(format!("{}.toml", post.id))
    }

    /// Write one data file per post with matched entries.
    ///
    /// Data files left from earlier runs for posts that no longer match are
    /// removed. Returns the written paths.
    pub fn write_output(&self, config: &Config, posts: &[Post]) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for post in posts {
            let Some(entries) = post.entries.as_ref().filter(|e| !e.is_empty()) else {
                continue;
            };

            let mut document = BTreeMap::new();
            document.insert(config.output_field.as_str(), entries);
            let contents = toml::to_string_pretty(&document)?;

            let path = self.output_path(config, post);
            write_atomic(&path, &contents)?;
            written.push(path);
        }

        let field_dir = Config::resolve(&self.root, &config.output_dir).join(&config.output_field);
        if field_dir.is_dir() {
            for dir_entry in fs::read_dir(&field_dir)? {
                let path = dir_entry?.path();
                let stale = path.is_file()
                    && path.extension().is_some_and(|ext| ext == "toml")
                    && !written.contains(&path);
                if stale {
                    tracing::debug!(path = %path.display(), "removing stale data file");
                    fs::remove_file(&path)?;
                }
            }
        }

        Ok(written)
    }

    fn existing_dir(&self, dir: &Path, label: &str) -> Result<PathBuf> {
        let path = Config::resolve(&self.root, dir);
        if !path.is_dir() {
            return Err(DaypostError::Config(format!(
                "{} directory not found: {}",
                label,
                path.display()
            )));
        }
        Ok(path)
    }
}

/// Markdown files below `dir`, skipping hidden directories, sorted by path
fn markdown_files(dir: &Path) -> Vec<PathBuf> {
    let walker = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !name.starts_with('.'))
        });

    walker
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Best-effort atomic replace: write to a temp file in the same directory,
/// then rename into place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.daypost-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("post.toml"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;

    // Windows `rename` does not overwrite
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
