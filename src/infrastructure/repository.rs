//! Journal directory on disk

use crate::error::{Result, TravelogError};
use crate::infrastructure::config::TRAVELOG_DIR;
use crate::infrastructure::{Config, FileStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract journal directory operations
pub trait JournalRepository {
    /// Get the root directory of this journal
    fn root(&self) -> &Path;

    /// Load configuration from .travelog/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .travelog/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .travelog directory exists
    fn is_initialized(&self) -> bool;

    /// Create .travelog directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemJournal {
    pub root: PathBuf,
}

impl FileSystemJournal {
    /// Create a journal handle for the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemJournal { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks TRAVELOG_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("TRAVELOG_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_travelog_dir(&path) {
                return Ok(FileSystemJournal::new(path));
            } else {
                return Err(TravelogError::Config(format!(
                    "TRAVELOG_ROOT is set to '{}' but no .travelog directory found. \
                    Run 'travelog init' in that directory or unset TRAVELOG_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_travelog_dir(&current) {
                return Ok(FileSystemJournal::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(TravelogError::NotTravelogDirectory(start.to_path_buf()));
                }
            }
        }
    }

    fn has_travelog_dir(path: &Path) -> bool {
        path.join(TRAVELOG_DIR).is_dir()
    }

    /// Directory holding one file per store key
    pub fn store_dir(&self) -> PathBuf {
        self.root.join(TRAVELOG_DIR).join("store")
    }

    /// Directory where camera captures are written
    pub fn media_dir(&self) -> PathBuf {
        self.root.join(TRAVELOG_DIR).join("media")
    }

    pub fn open_store(&self) -> FileStore {
        FileStore::new(self.store_dir())
    }
}

impl JournalRepository for FileSystemJournal {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_travelog_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let travelog_dir = self.root.join(TRAVELOG_DIR);

        if travelog_dir.exists() {
            return Err(TravelogError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&travelog_dir)?;
        fs::create_dir(self.store_dir())?;
        fs::create_dir(self.media_dir())?;
        Ok(())
    }
}
