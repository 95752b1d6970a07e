//! List tags use case

use crate::domain::hashtags::entry_tags;
use crate::domain::TravelEntry;
use std::collections::BTreeMap;

/// Every hashtag in use with the number of entries carrying it,
/// sorted by tag name
pub fn list_tags(entries: &[TravelEntry]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in entries {
        for tag in entry_tags(entry) {
            *counts.entry(tag).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}
