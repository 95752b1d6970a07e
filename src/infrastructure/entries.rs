//! Entry repository
//!
//! Owns the serialized entry collection under a single store key. Every
//! mutation rewrites the whole collection.

use crate::domain::entry::{decode_entries, encode_entries};
use crate::domain::TravelEntry;
use crate::error::{Result, TravelogError};
use crate::infrastructure::{KeyLocks, KeyValueStore};
use std::sync::Arc;
use tracing::{debug, info};

pub const ENTRIES_KEY: &str = "travelEntries";

#[derive(Clone)]
pub struct EntryRepository {
    store: Arc<dyn KeyValueStore>,
    locks: KeyLocks,
}

impl EntryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, locks: KeyLocks) -> Self {
        EntryRepository { store, locks }
    }

    /// Read the collection; caller must hold the key lock
    async fn read(&self) -> Result<Vec<TravelEntry>> {
        match self.store.get(ENTRIES_KEY).await? {
            None => {
                debug!("no entry collection yet, initializing");
                self.write(&[]).await?;
                Ok(Vec::new())
            }
            Some(text) => {
                decode_entries(&text).map_err(|e| TravelogError::corrupt(ENTRIES_KEY, e))
            }
        }
    }

    async fn write(&self, entries: &[TravelEntry]) -> Result<()> {
        let text = encode_entries(entries).map_err(|e| TravelogError::storage(ENTRIES_KEY, e))?;
        self.store.set(ENTRIES_KEY, &text).await
    }

    /// All well-formed entries in stored order.
    ///
    /// Initializes the key to an empty list when absent. Fails with
    /// `CorruptStore` when the stored text is not a list.
    pub async fn load_all(&self) -> Result<Vec<TravelEntry>> {
        let _guard = self.locks.lock(ENTRIES_KEY).await;
        self.read().await
    }

    /// Append an entry and return the new collection
    pub async fn append(&self, entry: TravelEntry) -> Result<Vec<TravelEntry>> {
        if !entry.is_well_formed() {
            return Err(TravelogError::Validation(
                "id, title, description and image are required".to_string(),
            ));
        }

        let _guard = self.locks.lock(ENTRIES_KEY).await;
        let mut entries = self.read().await?;
        let id = entry.id.clone();
        entries.push(entry);
        self.write(&entries).await?;

        info!(id = %id, total = entries.len(), "entry appended");
        Ok(entries)
    }

    /// Remove the entry with `id`. Unknown ids leave the collection as is.
    pub async fn remove(&self, id: &str) -> Result<Vec<TravelEntry>> {
        let _guard = self.locks.lock(ENTRIES_KEY).await;
        let mut entries = self.read().await?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        self.write(&entries).await?;

        if entries.len() < before {
            info!(id, total = entries.len(), "entry removed");
        } else {
            debug!(id, "remove: no such entry");
        }
        Ok(entries)
    }
}
