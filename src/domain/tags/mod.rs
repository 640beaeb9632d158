//! Tag system

pub mod normalize;
pub mod tree;

// Re-export main types
pub use normalize::{normalize_tag, normalize_walk};
pub use tree::{Posts, TagNode, TagTree};
