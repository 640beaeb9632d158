//! Front matter documents
//!
//! Posts and entries are markdown files that may start with a TOML front
//! matter block fenced by `+++` lines.

use crate::domain::{Entry, Post};
use crate::error::{DaypostError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

fn front_matter_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A\+\+\+[ \t]*\r?\n(?:(.*?)\r?\n)?\+\+\+[ \t]*(?:\r?\n|\z)").unwrap()
    })
}

/// A parsed file: front matter table plus the remaining body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: toml::Table,
    pub body: String,
}

impl Document {
    /// Split and parse a document. Files without front matter yield an
    /// empty table and the whole content as body.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        if !content.starts_with("+++") {
            return Ok(Document {
                front_matter: toml::Table::new(),
                body: content.to_string(),
            });
        }

        let captures = front_matter_regex()
            .captures(content)
            .ok_or_else(|| front_matter_error(path, "missing closing '+++'"))?;

        let raw = captures.get(1).map_or("", |m| m.as_str());
        let front_matter: toml::Table =
            toml::from_str(raw).map_err(|e| front_matter_error(path, &e.to_string()))?;
        let body = content[captures[0].len()..].to_string();

        Ok(Document { front_matter, body })
    }

    /// Interpret this document as a post identified by `id`
    pub fn into_post(mut self, id: String, path: &Path) -> Result<Post> {
        let tags = take_tags(&mut self.front_matter, path)?;

        let mut post = Post::new(id, tags);
        post.data = self.front_matter.into_iter().collect();
        Ok(post)
    }

    /// Interpret this document as a journal entry.
    ///
    /// The id comes from `uuid`, falling back to `fallback_id`.
    pub fn into_entry(mut self, fallback_id: String, path: &Path) -> Result<Entry> {
        let tags = take_tags(&mut self.front_matter, path)?;

        let id = match self.front_matter.remove("uuid") {
            Some(toml::Value::String(uuid)) => uuid,
            Some(_) => return Err(front_matter_error(path, "'uuid' must be a string")),
            None => fallback_id,
        };

        let creation_date = match self.front_matter.remove("creation_date") {
            Some(toml::Value::String(date)) => date,
            Some(toml::Value::Datetime(date)) => date.to_string(),
            Some(_) => {
                return Err(front_matter_error(
                    path,
                    "'creation_date' must be a string or a datetime",
                ))
            }
            None => return Err(front_matter_error(path, "missing 'creation_date'")),
        };

        let title = match self.front_matter.remove("title") {
            Some(toml::Value::String(title)) => Some(title),
            Some(_) => return Err(front_matter_error(path, "'title' must be a string")),
            None => None,
        };

        if let Some(key) = Entry::RESERVED_FIELDS
            .iter()
            .find(|key| self.front_matter.contains_key(**key))
        {
            return Err(front_matter_error(
                path,
                &format!("'{}' is reserved for the entry itself", key),
            ));
        }

        let fields: BTreeMap<String, toml::Value> = self.front_matter.into_iter().collect();

        let mut entry = Entry::new(id, tags, creation_date).with_text(self.body.trim());
        entry.title = title;
        entry.fields = fields;
        Ok(entry)
    }
}

/// Remove `tags` from the table. A single string counts as one tag.
fn take_tags(table: &mut toml::Table, path: &Path) -> Result<Option<Vec<String>>> {
    match table.remove("tags") {
        None => Ok(None),
        Some(toml::Value::String(tag)) => Ok(Some(vec![tag])),
        Some(toml::Value::Array(values)) => values
            .into_iter()
            .map(|value| match value {
                toml::Value::String(tag) => Ok(tag),
                _ => Err(front_matter_error(path, "'tags' must only hold strings")),
            })
            .collect::<Result<Vec<String>>>()
            .map(Some),
        Some(_) => Err(front_matter_error(
            path,
            "'tags' must be a string or an array of strings",
        )),
    }
}

fn front_matter_error(path: &Path, message: &str) -> DaypostError {
    DaypostError::FrontMatter {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
