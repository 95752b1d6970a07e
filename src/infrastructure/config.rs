//! Configuration management

use crate::domain::{Address, Coordinates};
use crate::error::{Result, TravelogError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const TRAVELOG_DIR: &str = ".travelog";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    /// Shell command that captures a photo; the output path is appended
    #[serde(default)]
    pub camera_command: Option<String>,
    pub created: DateTime<Utc>,
    /// Named places used for offline reverse geocoding
    #[serde(default)]
    pub places: Vec<Place>,
}

fn default_true() -> bool {
    true
}

fn default_radius_km() -> f64 {
    25.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    pub fn to_address(&self) -> Address {
        Address {
            name: Some(self.name.clone()),
            street: None,
            city: self.city.clone(),
            region: self.region.clone(),
            country: self.country.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            notifications: true,
            confirm_delete: true,
            camera_command: None,
            created: Utc::now(),
            places: Vec::new(),
        }
    }

    /// Load config from .travelog/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(TRAVELOG_DIR).join(CONFIG_FILE);

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TravelogError::NotTravelogDirectory(path.to_path_buf())
            } else {
                TravelogError::Io(e)
            }
        })?;

        toml::from_str(&contents)
            .map_err(|e| TravelogError::Config(format!("Failed to parse config.toml: {}", e)))
    }

    /// Save config to .travelog/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let travelog_dir = path.join(TRAVELOG_DIR);
        let config_path = travelog_dir.join(CONFIG_FILE);

        if !travelog_dir.exists() {
            fs::create_dir(&travelog_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| TravelogError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Camera command, with the TRAVELOG_CAMERA environment variable taking priority
    pub fn get_camera_command(&self) -> Option<String> {
        std::env::var("TRAVELOG_CAMERA")
            .ok()
            .filter(|c| !c.trim().is_empty())
            .or_else(|| self.camera_command.clone())
    }
}
