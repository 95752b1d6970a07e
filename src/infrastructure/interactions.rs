//! Interaction-state repository
//!
//! Each overlay kind lives under its own store key. Overlays are
//! non-critical: a missing or unreadable mapping is treated as empty.

use crate::domain::{Overlay, OverlayKind};
use crate::error::{Result, TravelogError};
use crate::infrastructure::{KeyLocks, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct InteractionRepository {
    store: Arc<dyn KeyValueStore>,
    locks: KeyLocks,
}

impl InteractionRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, locks: KeyLocks) -> Self {
        InteractionRepository { store, locks }
    }

    async fn read(&self, kind: OverlayKind) -> Result<Overlay> {
        let key = kind.storage_key();
        let text = match self.store.get(key).await {
            Ok(Some(text)) => text,
            Ok(None) => return Ok(Overlay::new()),
            Err(e) if e.is_corrupt_store() => {
                warn!(key, error = %e, "unreadable overlay, treating as empty");
                return Ok(Overlay::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str(&text) {
            Ok(overlay) => Ok(overlay),
            Err(e) => {
                warn!(key, error = %e, "unreadable overlay, treating as empty");
                Ok(Overlay::new())
            }
        }
    }

    /// Current mapping for `kind`. Only store I/O failures are errors.
    pub async fn load_all(&self, kind: OverlayKind) -> Result<Overlay> {
        self.read(kind).await
    }

    /// Flip the flag for `id` and persist the whole mapping with one write
    pub async fn toggle(&self, kind: OverlayKind, id: &str) -> Result<Overlay> {
        let key = kind.storage_key();
        let _guard = self.locks.lock(key).await;

        let mut overlay = self.read(kind).await?;
        let value = overlay.toggle(id);
        let text = serde_json::to_string(&overlay)
            .map_err(|e| TravelogError::storage(key, e))?;
        self.store.set(key, &text).await?;

        debug!(key, id, value, "overlay toggled");
        Ok(overlay)
    }
}
