//! Interaction overlays (liked, commented, shared, saved)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The four independent per-entry flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlayKind {
    Liked,
    Commented,
    Shared,
    Saved,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 4] = [
        OverlayKind::Liked,
        OverlayKind::Commented,
        OverlayKind::Shared,
        OverlayKind::Saved,
    ];

    /// Store key holding this overlay's mapping
    pub fn storage_key(&self) -> &'static str {
        match self {
            OverlayKind::Liked => "likedPosts",
            OverlayKind::Commented => "commentedPosts",
            OverlayKind::Shared => "sharedPosts",
            OverlayKind::Saved => "savedPosts",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverlayKind::Liked => "liked",
            OverlayKind::Commented => "commented",
            OverlayKind::Shared => "shared",
            OverlayKind::Saved => "saved",
        }
    }
}

impl std::fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OverlayKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "like" | "liked" => Ok(OverlayKind::Liked),
            "comment" | "commented" => Ok(OverlayKind::Commented),
            "share" | "shared" => Ok(OverlayKind::Shared),
            "save" | "saved" => Ok(OverlayKind::Saved),
            _ => Err(format!(
                "Invalid interaction: '{}'. Valid interactions are: liked, commented, shared, saved",
                s
            )),
        }
    }
}

/// Mapping from entry id to flag. A missing id means `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overlay(BTreeMap<String, bool>);

impl Overlay {
    pub fn new() -> Self {
        Overlay::default()
    }

    pub fn is_set(&self, id: &str) -> bool {
        self.0.get(id).copied().unwrap_or(false)
    }

    /// Flip the flag for `id` and return its new value
    pub fn toggle(&mut self, id: &str) -> bool {
        let value = !self.is_set(id);
        self.0.insert(id.to_string(), value);
        value
    }

    /// Raw stored value, distinguishing an explicit `false` from absence
    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, bool)> for Overlay {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Overlay(iter.into_iter().collect())
    }
}
