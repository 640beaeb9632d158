//! Output formatting utilities

use crate::application::{CorrelateReport, PostTags};

/// Format a correlation report for display
pub fn format_report(report: &CorrelateReport) -> String {
    let posts: Vec<_> = report
        .correlation
        .posts
        .iter()
        .filter(|post| post.match_count() > 0)
        .collect();

    if posts.is_empty() {
        return "No entries matched any post".to_string();
    }

    let mut output = String::new();
    for post in posts {
        output.push_str(&format!("{} ({})\n", post.title(), post.match_count()));
        for entry in post.entries.iter().flatten() {
            match &entry.title {
                Some(title) => {
                    output.push_str(&format!("  {}  {}\n", entry.creation_date, title))
                }
                None => output.push_str(&format!("  {}  {}\n", entry.creation_date, entry.id)),
            }
        }
    }

    let stats = &report.correlation.stats;
    output.push_str(&format!(
        "\n{} of {} entries matched {} posts\n",
        stats.entries_matched, stats.entries_seen, stats.posts_indexed
    ));

    output
}

/// Format post tag walks for display.
pub fn format_tag_list(posts: &[PostTags]) -> String {
    if posts.is_empty() {
        return "No posts found".to_string();
    }

    let mut output = String::new();
    for post in posts {
        match &post.walk {
            Some(walk) => output.push_str(&format!("{}: {}\n", post.id, walk.join(", "))),
            None => output.push_str(&format!("{}: (no tags)\n", post.id)),
        }
    }

    output
}
