//! Application layer - Use cases and orchestration

pub mod capture;
pub mod feed;
pub mod first_launch;
pub mod init;
pub mod list_tags;
pub mod manage_config;

pub use capture::{CaptureFlow, CaptureServices, LocationOutcome};
pub use feed::{DeleteOutcome, FeedSnapshot, FeedViewModel};
pub use first_launch::FirstLaunchService;
pub use list_tags::list_tags;

use crate::infrastructure::{EntryRepository, InteractionRepository, KeyLocks, KeyValueStore};
use std::sync::Arc;

/// Entry and interaction repositories over one store, sharing the
/// per-key write locks
pub fn open_repositories(
    store: Arc<dyn KeyValueStore>,
) -> (EntryRepository, InteractionRepository) {
    let locks = KeyLocks::new();
    (
        EntryRepository::new(Arc::clone(&store), locks.clone()),
        InteractionRepository::new(store, locks),
    )
}
