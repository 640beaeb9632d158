//! Correlation use case
//!
//! Orchestrates the full workflow: load configuration, posts and entries,
//! match entries to posts, then write one data file per matched post.

use crate::domain::{Correlation, Correlator, TitleHook};
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, SiteRepository};
use std::path::PathBuf;

/// Options for correlation
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelateOptions {
    /// Report matches without writing data files
    pub dry_run: bool,
}

/// Outcome of a correlation run
#[derive(Debug, Clone)]
pub struct CorrelateReport {
    pub correlation: Correlation,

    /// Data files written (empty on a dry run)
    pub written: Vec<PathBuf>,
}

/// Service for correlating entries with posts
pub struct CorrelateService {
    repository: FileSystemRepository,
}

impl CorrelateService {
    pub fn new(repository: FileSystemRepository) -> Self {
        CorrelateService { repository }
    }

    /// Execute the correlation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is missing or invalid
    /// - A post or entry file cannot be read or parsed
    /// - Two posts share a tag walk under the `error` policy
    /// - Writing a data file fails
    pub fn execute(&self, options: CorrelateOptions) -> Result<CorrelateReport> {
        // Configuration problems are reported before any content is read
        let config = self.repository.load_config()?;

        let posts = self.repository.load_posts(&config)?;
        let entries = self.repository.load_entries(&config)?;

        let mut correlator = Correlator::new(config.correlator_options());
        if config.extract_titles {
            correlator = correlator.with_hook(TitleHook);
        }

        let correlation = correlator.run(posts, entries)?;

        let written = if options.dry_run {
            Vec::new()
        } else {
            self.repository
                .write_output(&config, &correlation.posts)?
        };

        tracing::info!(
            posts = correlation.stats.posts_indexed,
            entries = correlation.stats.entries_seen,
            matched = correlation.stats.entries_matched,
            written = written.len(),
            "correlation finished"
        );

        Ok(CorrelateReport {
            correlation,
            written,
        })
    }
}
