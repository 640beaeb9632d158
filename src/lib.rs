//! daypost - attach journal entries to static-site posts
//!
//! Every post declares the tags it requires. Each journal entry is matched
//! to every post whose tags it carries, and the matched entries are written
//! next to the post, oldest first.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use error::DaypostError;
