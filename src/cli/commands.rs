//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daypost")]
#[command(about = "Attach tagged journal entries to site posts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create daypost.toml for a site
    Init {
        /// Site directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Journal entries directory
        #[arg(short, long)]
        entries: PathBuf,

        /// Posts directory (default: _posts)
        #[arg(short, long)]
        posts: Option<PathBuf>,

        /// What to do when posts share the same tags (overwrite, warn, error)
        #[arg(long, default_value = "warn")]
        on_duplicate: String,
    },

    /// Match entries to posts and write per-post data files
    Correlate {
        /// Report matches without writing data files
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List the normalized tags each post requires
    Tags,
}
