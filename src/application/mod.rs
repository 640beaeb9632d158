//! Application layer - Use cases and orchestration

pub mod correlate;
pub mod init;
pub mod list_tags;

pub use correlate::{CorrelateOptions, CorrelateReport, CorrelateService};
pub use init::{InitOptions, InitService};
pub use list_tags::{ListTagsService, PostTags};
