//! Hashtags in entry titles and captions

use crate::domain::TravelEntry;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Regex for matching hashtags: #word, #word-with-dashes, #word_with_underscores
fn tag_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"#([a-zA-Z0-9_-]+)").unwrap())
}

/// Extract all tags from a string (lowercased, in order of appearance)
pub fn extract_hashtags(text: &str) -> Vec<String> {
    tag_regex()
        .captures_iter(text)
        .map(|cap| cap[1].to_lowercase())
        .collect()
}

/// Normalize a user-supplied tag: strip a leading '#', lowercase
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}

/// All tags used by an entry, deduplicated
pub fn entry_tags(entry: &TravelEntry) -> BTreeSet<String> {
    extract_hashtags(&entry.title)
        .into_iter()
        .chain(extract_hashtags(&entry.description))
        .collect()
}

pub fn has_tag(entry: &TravelEntry, tag: &str) -> bool {
    let wanted = normalize_tag(tag);
    !wanted.is_empty() && entry_tags(entry).contains(&wanted)
}
