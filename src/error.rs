//! Error types for travelog

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for travelog application
#[derive(Debug, Error)]
pub enum TravelogError {
    #[error("Not a travelog directory: {0}")]
    NotTravelogDirectory(PathBuf),

    #[error("Missing required field: {0}")]
    Validation(String),

    #[error("Storage error on '{key}': {message}")]
    Storage { key: String, message: String },

    #[error("Corrupt data under '{key}': {message}")]
    CorruptStore { key: String, message: String },

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Media error: {0}")]
    Media(String),

    #[error("Location unavailable: {0}")]
    Location(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl TravelogError {
    /// Build a storage error for the given key
    pub fn storage(key: &str, message: impl std::fmt::Display) -> Self {
        TravelogError::Storage {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    /// Build a corrupt-store error for the given key
    pub fn corrupt(key: &str, message: impl std::fmt::Display) -> Self {
        TravelogError::CorruptStore {
            key: key.to_string(),
            message: message.to_string(),
        }
    }

    pub fn is_corrupt_store(&self) -> bool {
        matches!(self, TravelogError::CorruptStore { .. })
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            TravelogError::NotTravelogDirectory(_) => 2,
            TravelogError::Validation(_) => 3,
            TravelogError::Storage { .. } => 4,
            TravelogError::EntryNotFound(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            TravelogError::NotTravelogDirectory(path) => {
                format!(
                    "Not a travelog directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'travelog init' in this directory to create a new journal\n\
                    • Navigate to an existing travelog directory\n\
                    • Set TRAVELOG_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            TravelogError::Validation(field) => {
                format!(
                    "Missing required field: {}\n\n\
                    Every entry needs a photo, a title and a description.\n\
                    Example:\n\
                    travelog add --image beach.jpg --title \"Beach\" --description \"Sunset swim\"",
                    field
                )
            }
            TravelogError::Storage { .. } => {
                format!(
                    "{}\n\n\
                    Nothing was changed. Check that the .travelog directory is writable\n\
                    and try the command again.",
                    self
                )
            }
            TravelogError::EntryNotFound(id) => {
                format!(
                    "No entry with id '{}'\n\n\
                    Suggestions:\n\
                    • Use 'travelog feed' to see entry ids",
                    id
                )
            }
            TravelogError::Media(msg) => {
                format!(
                    "Media error: {}\n\n\
                    Suggestions:\n\
                    • Check that the image path exists\n\
                    • Configure a camera: travelog config camera_command 'fswebcam -r 1280x720'",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using TravelogError
pub type Result<T> = std::result::Result<T, TravelogError>;
