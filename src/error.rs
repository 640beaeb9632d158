//! Error types for daypost

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for daypost
#[derive(Debug, Error)]
pub enum DaypostError {
    #[error("Not a daypost site: {0}")]
    NotSiteDirectory(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },

    #[error("Posts '{existing}' and '{incoming}' share the same tags: {walk}")]
    DuplicateTagWalk {
        walk: String,
        existing: String,
        incoming: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl DaypostError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            DaypostError::NotSiteDirectory(_) => 2,
            DaypostError::DuplicateTagWalk { .. } => 3,
            DaypostError::FrontMatter { .. } => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            DaypostError::NotSiteDirectory(path) => {
                format!(
                    "Not a daypost site: {}\n\n\
                    Suggestions:\n\
                    • Run 'daypost init --entries <DIR>' in your site directory\n\
                    • Navigate to a directory containing daypost.toml\n\
                    • Set DAYPOST_ROOT environment variable to your site path",
                    path.display()
                )
            }
            DaypostError::DuplicateTagWalk {
                walk,
                existing,
                incoming,
            } => {
                format!(
                    "Posts '{}' and '{}' require the same tags: {}\n\n\
                    Suggestions:\n\
                    • Give one of the posts an extra tag\n\
                    • Set on_duplicate = \"warn\" in daypost.toml to keep the later post",
                    existing, incoming, walk
                )
            }
            DaypostError::FrontMatter { path, message } => {
                format!(
                    "Invalid front matter in {}: {}\n\n\
                    Front matter is TOML between '+++' lines at the top of the file:\n\
                    +++\n\
                    tags = [\"Panama\"]\n\
                    +++",
                    path.display(),
                    message
                )
            }
            DaypostError::Config(msg) => {
                if msg.contains("duplicate policy") {
                    format!(
                        "{}\n\n\
                        Example: on_duplicate = \"error\"",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using DaypostError
pub type Result<T> = std::result::Result<T, DaypostError>;
