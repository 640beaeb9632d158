//! Tag normalization
//!
//! Turns a raw, unordered tag set into a tag walk: the lowercase, trimmed,
//! sorted and deduplicated sequence used as a path through the tag tree.

/// Normalize a single tag (lowercase, surrounding whitespace removed)
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Build the tag walk for a tag set.
///
/// Returns `None` when the set is absent, empty, or holds only blank tags.
/// Such posts and entries carry no tag constraint and are skipped by the tree.
///
/// # Examples
///
/// ```
/// use daypost::domain::tags::normalize_walk;
///
/// let walk = normalize_walk(Some(&["Monteverde", " costa rica "]));
/// assert_eq!(walk, Some(vec!["costa rica".to_string(), "monteverde".to_string()]));
///
/// assert_eq!(normalize_walk(None::<Vec<String>>), None);
/// ```
pub fn normalize_walk<I, S>(tags: Option<I>) -> Option<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut walk: Vec<String> = tags?
        .into_iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .collect();

    if walk.is_empty() {
        return None;
    }

    walk.sort();
    walk.dedup();
    Some(walk)
}
