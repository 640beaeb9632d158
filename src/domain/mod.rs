//! Domain layer - tag matching and correlation

pub mod correlate;
pub mod entry;
pub mod policy;
pub mod tags;
pub mod title;

pub use correlate::{Correlation, CorrelationStats, Correlator, CorrelatorOptions};
pub use entry::{Entry, Post};
pub use policy::DuplicatePolicy;
pub use title::{EntryHook, TitleHook};
