//! Infrastructure layer - Persistence and platform collaborators

pub mod camera;
pub mod config;
pub mod entries;
pub mod interactions;
pub mod key_lock;
pub mod location;
pub mod media;
pub mod notifier;
pub mod prompt;
pub mod repository;
pub mod store;

pub use camera::CameraSession;
pub use config::{Config, Place};
pub use entries::{EntryRepository, ENTRIES_KEY};
pub use interactions::InteractionRepository;
pub use key_lock::KeyLocks;
pub use location::{FixedLocation, Geocoder, LocationProvider, PlaceGeocoder};
pub use media::{CliMediaPicker, MediaPicker, MediaSelection, MediaSource};
pub use notifier::{Notifier, TerminalNotifier};
pub use prompt::{Confirmer, Permission, PermissionPrompter, StdinConfirmer, TerminalPermissions};
pub use repository::{FileSystemJournal, JournalRepository};
pub use store::{FileStore, KeyValueStore, MemoryStore};
