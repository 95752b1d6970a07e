//! Output formatting utilities

use crate::application::FeedSnapshot;
use crate::domain::{OverlayKind, TravelEntry};

fn overlay_marker(kind: OverlayKind) -> &'static str {
    match kind {
        OverlayKind::Liked => "♥ liked",
        OverlayKind::Commented => "💬 commented",
        OverlayKind::Shared => "↗ shared",
        OverlayKind::Saved => "🔖 saved",
    }
}

fn format_date(entry: &TravelEntry) -> String {
    match entry.created_at() {
        Some(date) => date.format("%d-%m-%Y %H:%M").to_string(),
        None => entry.date.clone(),
    }
}

fn format_flags(snapshot: &FeedSnapshot, id: &str) -> Option<String> {
    let flags = snapshot.flags(id);
    if flags.is_empty() {
        return None;
    }
    Some(
        flags
            .into_iter()
            .map(overlay_marker)
            .collect::<Vec<_>>()
            .join("  "),
    )
}

/// Format entries as a feed, newest first
pub fn format_feed(entries: &[&TravelEntry], snapshot: &FeedSnapshot) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries.iter().rev() {
        output.push_str(&format!("[{}] {}\n", entry.id, entry.title));

        let mut meta = format_date(entry);
        if let Some(address) = entry.display_address() {
            meta.push_str(&format!(" · {}", address));
        }
        output.push_str(&format!("    {}\n", meta));
        output.push_str(&format!("    {}\n", entry.description));

        if let Some(flags) = format_flags(snapshot, &entry.id) {
            output.push_str(&format!("    {}\n", flags));
        }
    }
    output
}

/// Format a single entry with every field
pub fn format_entry(entry: &TravelEntry, snapshot: &FeedSnapshot) -> String {
    let mut output = format!("{}\n", entry.title);
    output.push_str(&format!("id:       {}\n", entry.id));
    output.push_str(&format!("date:     {}\n", format_date(entry)));
    output.push_str(&format!("image:    {}\n", entry.image));
    if let Some(location) = entry.location {
        output.push_str(&format!("location: {}\n", location));
    }
    if let Some(address) = entry.display_address() {
        output.push_str(&format!("address:  {}\n", address));
    }
    if let Some(flags) = format_flags(snapshot, &entry.id) {
        output.push_str(&format!("flags:    {}\n", flags));
    }
    output.push_str(&format!("\n{}\n", entry.description));
    output
}

/// Format a list of tags with their entry counts
pub fn format_tag_list(tags: &[(String, usize)]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for (tag, count) in tags {
        output.push_str(&format!("#{} ({})\n", tag, count));
    }

    output
}
