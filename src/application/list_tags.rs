//! List post tags use case

use crate::domain::tags::normalize_walk;
use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, SiteRepository};

/// A post and the tag walk it is matched by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTags {
    pub id: String,

    /// None for posts without tags, which never match
    pub walk: Option<Vec<String>>,
}

/// Service for listing the normalized tags of every post.
pub struct ListTagsService {
    repository: FileSystemRepository,
}

impl ListTagsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        Self { repository }
    }

    pub fn execute(&self) -> Result<Vec<PostTags>> {
        let config = self.repository.load_config()?;
        let posts = self.repository.load_posts(&config)?;

        Ok(posts
            .into_iter()
            .map(|post| PostTags {
                walk: normalize_walk(post.tags.as_ref()),
                id: post.id,
            })
            .collect())
    }
}
