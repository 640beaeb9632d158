//! Entry-post correlation
//!
//! Runs the three phases in order:
//!
//! 1. build: every tagged post is placed in a [`TagTree`]
//! 2. correlate: every entry is queried against the tree and appended to
//!    each post it matches
//! 3. finalize: each post's matched entries are sorted by creation date
//!
//! # Examples
//!
//! ```
//! use daypost::domain::{Correlator, CorrelatorOptions, Entry, Post};
//!
//! let tags = |t: &[&str]| -> Option<Vec<String>> { Some(t.iter().map(|s| s.to_string()).collect()) };
//! let posts = vec![Post::new("monteverde", tags(&["Costa Rica", "Monteverde"]))];
//! let entries = vec![
//!     Entry::new("e1", tags(&["costa rica", "monteverde", "hiking"]), "2013-01-02"),
//!     Entry::new("e2", tags(&["Costa Rica"]), "2013-01-01"),
//! ];
//!
//! let result = Correlator::new(CorrelatorOptions::default())
//!     .run(posts, entries)
//!     .unwrap();
//! assert_eq!(result.posts[0].match_count(), 1);
//! ```

use super::entry::{Entry, Post};
use super::policy::DuplicatePolicy;
use super::tags::{normalize_walk, TagTree};
use super::title::EntryHook;
use crate::error::{DaypostError, Result};

/// Options for a correlation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelatorOptions {
    /// How to treat posts whose tags normalize to the same walk
    pub on_duplicate: DuplicatePolicy,
}

/// Counters collected during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationStats {
    /// Posts placed in the tree
    pub posts_indexed: usize,
    /// Posts skipped because they have no tags
    pub posts_untagged: usize,
    /// Posts displaced by a later post with the same tag walk
    pub posts_replaced: usize,
    /// Entries read from the input
    pub entries_seen: usize,
    /// Entries that matched at least one post
    pub entries_matched: usize,
    /// Total entry-to-post attachments
    pub attachments: usize,
}

/// Result of a full run
#[derive(Debug, Clone)]
pub struct Correlation {
    pub posts: Vec<Post>,
    pub stats: CorrelationStats,
}

/// Matches journal entries to posts by tag subset
pub struct Correlator {
    options: CorrelatorOptions,
    hooks: Vec<Box<dyn EntryHook>>,
}

impl Correlator {
    pub fn new(options: CorrelatorOptions) -> Self {
        Self {
            options,
            hooks: Vec::new(),
        }
    }

    /// Add a hook run on every entry before it is matched
    pub fn with_hook<H: EntryHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Run build, correlate and finalize over the given posts and entries
    #[tracing::instrument(skip_all, fields(posts = posts.len()))]
    pub fn run<I>(&self, mut posts: Vec<Post>, entries: I) -> Result<Correlation>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut stats = CorrelationStats::default();

        let tree = self.build(&posts, &mut stats)?;
        tracing::debug!(
            indexed = stats.posts_indexed,
            untagged = stats.posts_untagged,
            replaced = stats.posts_replaced,
            "build"
        );

        self.correlate(&tree, &mut posts, entries, &mut stats);
        tracing::debug!(
            entries = stats.entries_seen,
            matched = stats.entries_matched,
            attachments = stats.attachments,
            "correlate"
        );

        Self::finalize(&tree, &mut posts);

        Ok(Correlation { posts, stats })
    }

    /// Place every tagged post in a tree keyed by its index in `posts`
    pub fn build(&self, posts: &[Post], stats: &mut CorrelationStats) -> Result<TagTree<usize>> {
        let mut tree: TagTree<usize> = TagTree::new();

        for (index, post) in posts.iter().enumerate() {
            let Some(node) = tree.attach(post.tags.as_ref()) else {
                tracing::debug!(post = %post.id, "post has no tags, skipped");
                stats.posts_untagged += 1;
                continue;
            };

            if let Some(&existing) = node.post() {
                let walk = normalize_walk(post.tags.as_ref())
                    .unwrap_or_default()
                    .join(", ");
                let existing = &posts[existing].id;

                match self.options.on_duplicate {
                    DuplicatePolicy::Error => {
                        return Err(DaypostError::DuplicateTagWalk {
                            walk,
                            existing: existing.clone(),
                            incoming: post.id.clone(),
                        });
                    }
                    DuplicatePolicy::Warn => {
                        tracing::warn!(
                            walk = %walk,
                            replaced = %existing,
                            post = %post.id,
                            "posts share the same tags, keeping the later one"
                        );
                    }
                    DuplicatePolicy::Overwrite => {}
                }

                stats.posts_replaced += 1;
            } else {
                stats.posts_indexed += 1;
            }

            node.replace_post(index);
        }

        Ok(tree)
    }

    /// Append every entry to each post it matches, in input order
    pub fn correlate<I>(
        &self,
        tree: &TagTree<usize>,
        posts: &mut [Post],
        entries: I,
        stats: &mut CorrelationStats,
    ) where
        I: IntoIterator<Item = Entry>,
    {
        for mut entry in entries {
            stats.entries_seen += 1;

            for hook in &self.hooks {
                hook.prepare(&mut entry);
            }

            let matches = tree.query(entry.tags.as_ref());
            if matches.is_empty() {
                continue;
            }
            stats.entries_matched += 1;

            for &index in matches {
                tracing::trace!(entry = %entry.id, post = %posts[index].id, "matched");
                posts[index]
                    .entries
                    .get_or_insert_with(Vec::new)
                    .push(entry.clone());
                stats.attachments += 1;
            }
        }
    }

    /// Sort each indexed post's entries by creation date.
    ///
    /// The sort is stable, so entries sharing a timestamp keep input order.
    pub fn finalize(tree: &TagTree<usize>, posts: &mut [Post]) {
        for &index in tree.posts() {
            if let Some(entries) = posts[index].entries.as_mut() {
                entries.sort_by(|a, b| a.creation_date.cmp(&b.creation_date));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::title::TitleHook;

    fn tags(tags: &[&str]) -> Option<Vec<String>> {
        Some(tags.iter().map(|t| t.to_string()).collect())
    }

    fn run(posts: Vec<Post>, entries: Vec<Entry>) -> Correlation {
        Correlator::new(CorrelatorOptions::default())
            .run(posts, entries)
            .unwrap()
    }

    fn ids(post: &Post) -> Vec<&str> {
        post.entries
            .iter()
            .flatten()
            .map(|e| e.id.as_str())
            .collect()
    }

    #[test]
    fn test_superset_entry_matches_and_subset_does_not() {
        let posts = vec![Post::new("a", tags(&["Costa Rica", "Monteverde"]))];
        let entries = vec![
            Entry::new("e1", tags(&["costa rica", "monteverde", "hiking"]), "2013-01-01"),
            Entry::new("e2", tags(&["Costa Rica"]), "2013-01-02"),
        ];

        let result = run(posts, entries);
        assert_eq!(ids(&result.posts[0]), vec!["e1"]);
        assert_eq!(result.stats.entries_seen, 2);
        assert_eq!(result.stats.entries_matched, 1);
    }

    #[test]
    fn test_entry_matches_nested_posts() {
        let posts = vec![
            Post::new("a", tags(&["Panama"])),
            Post::new("b", tags(&["Panama", "Bocas del Toro"])),
        ];
        let entries = vec![Entry::new(
            "e",
            tags(&["Panama", "Bocas del Toro"]),
            "2013-01-01",
        )];

        let result = run(posts, entries);
        assert_eq!(ids(&result.posts[0]), vec!["e"]);
        assert_eq!(ids(&result.posts[1]), vec!["e"]);
        assert_eq!(result.stats.attachments, 2);
    }

    #[test]
    fn test_untagged_post_never_matches() {
        let posts = vec![Post::new("untagged", None), Post::new("empty", Some(vec![]))];
        let entries = vec![Entry::new("e", tags(&["anything"]), "2013-01-01")];

        let result = run(posts, entries);
        assert_eq!(result.posts[0].entries, None);
        assert_eq!(result.posts[1].entries, None);
        assert_eq!(result.stats.posts_untagged, 2);
        assert_eq!(result.stats.posts_indexed, 0);
    }

    #[test]
    fn test_untagged_entry_matches_nothing() {
        let posts = vec![Post::new("a", tags(&["x"]))];
        let entries = vec![
            Entry::new("none", None, "2013-01-01"),
            Entry::new("empty", Some(vec![]), "2013-01-01"),
        ];

        let result = run(posts, entries);
        assert_eq!(result.posts[0].entries, None);
        assert_eq!(result.stats.entries_matched, 0);
    }

    #[test]
    fn test_finalize_sorts_by_creation_date() {
        let posts = vec![Post::new("a", tags(&["x"]))];
        let entries = vec![
            Entry::new("jan", tags(&["x"]), "2013-01-01"),
            Entry::new("mar", tags(&["x"]), "2013-03-01"),
            Entry::new("feb", tags(&["x"]), "2013-02-01"),
        ];

        let result = run(posts, entries);
        let dates: Vec<&str> = result.posts[0]
            .entries
            .iter()
            .flatten()
            .map(|e| e.creation_date.as_str())
            .collect();
        assert_eq!(dates, vec!["2013-01-01", "2013-02-01", "2013-03-01"]);
    }

    #[test]
    fn test_finalize_is_stable() {
        let posts = vec![Post::new("a", tags(&["x"]))];
        let entries = vec![
            Entry::new("second-day", tags(&["x"]), "2013-01-02"),
            Entry::new("first", tags(&["x"]), "2013-01-01"),
            Entry::new("second", tags(&["x"]), "2013-01-01"),
            Entry::new("third", tags(&["x"]), "2013-01-01"),
        ];

        let result = run(posts, entries);
        assert_eq!(
            ids(&result.posts[0]),
            vec!["first", "second", "third", "second-day"]
        );
    }

    #[test]
    fn test_duplicate_walk_last_post_wins() {
        let posts = vec![
            Post::new("first", tags(&["Panama", "Boquete"])),
            Post::new("second", tags(&["boquete ", "PANAMA"])),
        ];
        let entries = vec![Entry::new("e", tags(&["panama", "boquete"]), "2013-01-01")];

        for policy in [DuplicatePolicy::Overwrite, DuplicatePolicy::Warn] {
            let result = Correlator::new(CorrelatorOptions {
                on_duplicate: policy,
            })
            .run(posts.clone(), entries.clone())
            .unwrap();

            assert_eq!(result.posts[0].entries, None);
            assert_eq!(ids(&result.posts[1]), vec!["e"]);
            assert_eq!(result.stats.posts_replaced, 1);
            assert_eq!(result.stats.posts_indexed, 1);
        }
    }

    #[test]
    fn test_duplicate_walk_error_policy() {
        let posts = vec![
            Post::new("first", tags(&["Panama"])),
            Post::new("second", tags(&["panama"])),
        ];

        let err = Correlator::new(CorrelatorOptions {
            on_duplicate: DuplicatePolicy::Error,
        })
        .run(posts, Vec::new())
        .unwrap_err();

        match err {
            DaypostError::DuplicateTagWalk {
                walk,
                existing,
                incoming,
            } => {
                assert_eq!(walk, "panama");
                assert_eq!(existing, "first");
                assert_eq!(incoming, "second");
            }
            other => panic!("Expected DuplicateTagWalk, got {:?}", other),
        }
    }

    #[test]
    fn test_entries_pass_through_unmodified() {
        let posts = vec![Post::new("a", tags(&["x"]))];
        let mut entry = Entry::new("e", tags(&["X", "extra"]), "2013-01-01").with_text("Body");
        entry.fields.insert(
            "starred".to_string(),
            toml::Value::Boolean(true),
        );

        let result = run(posts, vec![entry.clone()]);
        assert_eq!(result.posts[0].entries, Some(vec![entry]));
    }

    #[test]
    fn test_hooks_run_before_matching() {
        let posts = vec![Post::new("a", tags(&["x"]))];
        let entries = vec![
            Entry::new("e", tags(&["x"]), "2013-01-01").with_text("Hello.\nWorld"),
        ];

        let result = Correlator::new(CorrelatorOptions::default())
            .with_hook(TitleHook)
            .run(posts, entries)
            .unwrap();

        let entry = &result.posts[0].entries.as_ref().unwrap()[0];
        assert_eq!(entry.title.as_deref(), Some("Hello"));
        assert_eq!(entry.text, "World");
    }

    #[test]
    fn test_subset_property_over_small_universe() {
        let universe = ["a", "b", "c", "d"];
        let subsets: Vec<Vec<&str>> = (1u32..16)
            .map(|mask| {
                universe
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, t)| *t)
                    .collect()
            })
            .collect();

        let posts: Vec<Post> = subsets
            .iter()
            .map(|s| Post::new(s.join("+"), tags(s)))
            .collect();

        for entry_tags in &subsets {
            let result = run(
                posts.clone(),
                vec![Entry::new("e", tags(entry_tags), "2013-01-01")],
            );
            for (post, post_tags) in result.posts.iter().zip(&subsets) {
                let covered = post_tags.iter().all(|t| entry_tags.contains(t));
                assert_eq!(
                    post.match_count() == 1,
                    covered,
                    "post {} against entry {:?}",
                    post.id,
                    entry_tags
                );
            }
        }
    }
}
