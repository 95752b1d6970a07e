//! Config management use case

use crate::error::{Result, TravelogError};
use crate::infrastructure::{Config, FileSystemJournal, JournalRepository};

const EDITABLE_KEYS: &str = "notifications, confirm_delete, camera_command";

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemJournal,
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TravelogError::Config(format!(
            "Invalid value for '{}': '{}'. Expected true or false",
            key, value
        ))),
    }
}

impl ConfigService {
    pub fn new(repository: FileSystemJournal) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "notifications" => Ok(config.notifications.to_string()),
            "confirm_delete" => Ok(config.confirm_delete.to_string()),
            "camera_command" => Ok(config.camera_command.unwrap_or_default()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(TravelogError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}, created",
                key, EDITABLE_KEYS
            ))),
        }
    }

    /// Set a config value. An empty camera command unsets it.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "notifications" => config.notifications = parse_bool(key, value)?,
            "confirm_delete" => config.confirm_delete = parse_bool(key, value)?,
            "camera_command" => {
                let command = value.trim();
                config.camera_command = if command.is_empty() {
                    None
                } else {
                    Some(command.to_string())
                };
            }
            "created" => {
                return Err(TravelogError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(TravelogError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, EDITABLE_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
