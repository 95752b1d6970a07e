//! Feed view-model
//!
//! Holds the renderable snapshot of entries and overlays. The snapshot is a
//! copy: every mutation goes through a repository first and the snapshot is
//! refreshed from the repository's result.

use crate::domain::hashtags::has_tag;
use crate::domain::{Overlay, OverlayKind, TravelEntry};
use crate::error::{Result, TravelogError};
use crate::infrastructure::{Confirmer, EntryRepository, InteractionRepository};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub entries: Vec<TravelEntry>,
    pub liked: Overlay,
    pub commented: Overlay,
    pub shared: Overlay,
    pub saved: Overlay,
}

impl FeedSnapshot {
    pub fn overlay(&self, kind: OverlayKind) -> &Overlay {
        match kind {
            OverlayKind::Liked => &self.liked,
            OverlayKind::Commented => &self.commented,
            OverlayKind::Shared => &self.shared,
            OverlayKind::Saved => &self.saved,
        }
    }

    fn overlay_mut(&mut self, kind: OverlayKind) -> &mut Overlay {
        match kind {
            OverlayKind::Liked => &mut self.liked,
            OverlayKind::Commented => &mut self.commented,
            OverlayKind::Shared => &mut self.shared,
            OverlayKind::Saved => &mut self.saved,
        }
    }

    /// Overlay kinds set for `id`
    pub fn flags(&self, id: &str) -> Vec<OverlayKind> {
        OverlayKind::ALL
            .into_iter()
            .filter(|kind| self.overlay(*kind).is_set(id))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct FeedViewModel {
    entries: EntryRepository,
    interactions: InteractionRepository,
    snapshot: FeedSnapshot,
}

impl FeedViewModel {
    /// Start with an empty snapshot; call `refresh` to hydrate
    pub fn new(entries: EntryRepository, interactions: InteractionRepository) -> Self {
        FeedViewModel {
            entries,
            interactions,
            snapshot: FeedSnapshot::default(),
        }
    }

    pub fn snapshot(&self) -> &FeedSnapshot {
        &self.snapshot
    }

    async fn load_entries(&self) -> Result<Vec<TravelEntry>> {
        match self.entries.load_all().await {
            Err(e) if e.is_corrupt_store() => {
                warn!(error = %e, "entry collection unreadable, showing an empty feed");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Reload entries and all overlays concurrently, then swap the snapshot
    /// in one step. On a storage error the previous snapshot is kept.
    pub async fn refresh(&mut self) -> Result<&FeedSnapshot> {
        let (entries, liked, commented, shared, saved) = tokio::try_join!(
            self.load_entries(),
            self.interactions.load_all(OverlayKind::Liked),
            self.interactions.load_all(OverlayKind::Commented),
            self.interactions.load_all(OverlayKind::Shared),
            self.interactions.load_all(OverlayKind::Saved),
        )?;

        self.snapshot = FeedSnapshot {
            entries,
            liked,
            commented,
            shared,
            saved,
        };
        Ok(&self.snapshot)
    }

    pub fn entry(&self, id: &str) -> Option<&TravelEntry> {
        self.snapshot.entries.iter().find(|entry| entry.id == id)
    }

    fn require_entry(&self, id: &str) -> Result<&TravelEntry> {
        self.entry(id)
            .ok_or_else(|| TravelogError::EntryNotFound(id.to_string()))
    }

    pub fn entries_tagged(&self, tag: &str) -> Vec<&TravelEntry> {
        self.snapshot
            .entries
            .iter()
            .filter(|entry| has_tag(entry, tag))
            .collect()
    }

    pub fn entries_in(&self, kind: OverlayKind) -> Vec<&TravelEntry> {
        let overlay = self.snapshot.overlay(kind);
        self.snapshot
            .entries
            .iter()
            .filter(|entry| overlay.is_set(&entry.id))
            .collect()
    }

    /// Delete after confirmation. Cancelling leaves everything untouched.
    pub async fn delete(&mut self, id: &str, confirmer: &dyn Confirmer) -> Result<DeleteOutcome> {
        let title = self.require_entry(id)?.title.clone();

        let prompt = format!("Delete \"{}\"? This cannot be undone.", title);
        if !confirmer.confirm(&prompt).await? {
            return Ok(DeleteOutcome::Cancelled);
        }

        self.snapshot.entries = self.entries.remove(id).await?;
        info!(id, "entry deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Flip an overlay flag and return its new value.
    ///
    /// The snapshot is updated before the write. If the write fails the
    /// flip is undone and the error is returned.
    pub async fn toggle(&mut self, kind: OverlayKind, id: &str) -> Result<bool> {
        self.require_entry(id)?;

        let before = self.snapshot.overlay(kind).clone();
        self.snapshot.overlay_mut(kind).toggle(id);

        match self.interactions.toggle(kind, id).await {
            Ok(persisted) => {
                *self.snapshot.overlay_mut(kind) = persisted;
                Ok(self.snapshot.overlay(kind).is_set(id))
            }
            Err(e) => {
                warn!(%kind, id, error = %e, "toggle not persisted, rolling back");
                *self.snapshot.overlay_mut(kind) = before;
                Err(e)
            }
        }
    }
}
