//! Entry title extraction

use super::entry::Entry;

/// Preprocessing applied to each entry before it is matched
pub trait EntryHook {
    fn prepare(&self, entry: &mut Entry);
}

/// Split a title off the entry text.
///
/// The first line becomes the title when its first sentence ends right at
/// the line break, or when it contains no period at all. Returns
/// `(title, body)` with the trailing period dropped from the title and the
/// body trimmed; `None` when the text has no line break or the first line
/// does not qualify.
///
/// # Examples
///
/// ```
/// use daypost::domain::title::extract_title;
///
/// assert_eq!(
///     extract_title("Hello.\nWorld"),
///     Some(("Hello".to_string(), "World".to_string()))
/// );
/// assert_eq!(extract_title("Hello World"), None);
/// ```
pub fn extract_title(text: &str) -> Option<(String, String)> {
    let newline = text.find('\n')?;
    let first_line = text[..newline].trim_end();

    let qualifies = match text.find('.') {
        None => true,
        Some(period) if period > newline => true,
        Some(period) => period + 1 == first_line.len(),
    };
    if !qualifies {
        return None;
    }

    let title = first_line
        .strip_suffix('.')
        .unwrap_or(first_line)
        .trim();
    if title.is_empty() {
        return None;
    }

    let body = text[newline + 1..].trim();
    Some((title.to_string(), body.to_string()))
}

/// Hook that moves a leading title line out of the entry text
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleHook;

impl EntryHook for TitleHook {
    fn prepare(&self, entry: &mut Entry) {
        if entry.title.is_some() {
            return;
        }
        if let Some((title, body)) = extract_title(&entry.text) {
            entry.title = Some(title);
            entry.text = body;
        }
    }
}
