//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemJournal, JournalRepository};
use std::fs;
use std::path::Path;

/// Initialize a new travel journal at the specified path.
pub fn init(path: &Path) -> Result<FileSystemJournal> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let journal = FileSystemJournal::new(path.to_path_buf());
    journal.initialize()?;
    journal.save_config(&Config::new())?;

    println!("Initialized travelog journal at {}", path.display());

    Ok(journal)
}
