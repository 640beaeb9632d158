//! Journal entries and site posts

use serde::Serialize;
use std::collections::BTreeMap;

/// A journal entry
///
/// Only `tags` and `creation_date` are read by the correlator; every other
/// field is carried through to the output untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Creation timestamp in a lexically sortable form (ISO-8601)
    pub creation_date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub text: String,

    #[serde(flatten)]
    pub fields: BTreeMap<String, toml::Value>,
}

impl Entry {
    /// Keys written by the entry itself; opaque fields must not reuse them
    pub const RESERVED_FIELDS: [&'static str; 5] =
        ["id", "tags", "creation_date", "title", "text"];

    pub fn new(
        id: impl Into<String>,
        tags: Option<Vec<String>>,
        creation_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tags,
            creation_date: creation_date.into(),
            title: None,
            text: String::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Set the entry text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

/// A site post that collects matching entries
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,

    /// Required tags; a post without tags never matches
    pub tags: Option<Vec<String>>,

    /// Remaining front matter of the post
    pub data: BTreeMap<String, toml::Value>,

    /// Matched entries, absent until the first match
    pub entries: Option<Vec<Entry>>,
}

impl Post {
    pub fn new(id: impl Into<String>, tags: Option<Vec<String>>) -> Self {
        Self {
            id: id.into(),
            tags,
            data: BTreeMap::new(),
            entries: None,
        }
    }

    /// Post title from its front matter, falling back to the id
    pub fn title(&self) -> &str {
        self.data
            .get("title")
            .and_then(|value| value.as_str())
            .unwrap_or(&self.id)
    }

    /// Number of matched entries
    pub fn match_count(&self) -> usize {
        self.entries.as_ref().map_or(0, Vec::len)
    }
}
