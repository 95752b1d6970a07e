//! Interactive prompts: confirmations and permission requests

use crate::error::{Result, TravelogError};
use async_trait::async_trait;
use std::io::{BufRead, Write};

#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask a yes/no question. Blocks until the user answers.
    async fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Reads the answer from stdin. `assume_yes` skips the question.
#[derive(Debug, Clone)]
pub struct StdinConfirmer {
    assume_yes: bool,
}

impl StdinConfirmer {
    pub fn new(assume_yes: bool) -> Self {
        StdinConfirmer { assume_yes }
    }
}

/// `y`/`yes` in any case confirms; anything else, including EOF, cancels
pub fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[async_trait]
impl Confirmer for StdinConfirmer {
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || -> Result<bool> {
            let mut err = std::io::stderr().lock();
            write!(err, "{} [y/N] ", prompt)?;
            err.flush()?;

            let mut answer = String::new();
            std::io::stdin().lock().read_line(&mut answer)?;
            Ok(parse_answer(&answer))
        })
        .await
        .map_err(|e| TravelogError::Io(std::io::Error::other(e)))?
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    Location,
    Notifications,
}

impl Permission {
    pub const ALL: [Permission; 3] = [
        Permission::Camera,
        Permission::Location,
        Permission::Notifications,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Permission::Camera => "camera",
            Permission::Location => "location",
            Permission::Notifications => "notifications",
        }
    }
}

#[async_trait]
pub trait PermissionPrompter: Send + Sync {
    /// Ask for a permission; `true` when granted
    async fn request(&self, permission: Permission) -> Result<bool>;
}

/// Reports what the command-line environment can do. Nothing to grant
/// interactively here, so the answer follows the configuration.
#[derive(Debug, Clone)]
pub struct TerminalPermissions {
    camera_available: bool,
    notifications_enabled: bool,
}

impl TerminalPermissions {
    pub fn new(camera_available: bool, notifications_enabled: bool) -> Self {
        TerminalPermissions {
            camera_available,
            notifications_enabled,
        }
    }
}

#[async_trait]
impl PermissionPrompter for TerminalPermissions {
    async fn request(&self, permission: Permission) -> Result<bool> {
        let (granted, hint) = match permission {
            Permission::Camera => (
                self.camera_available,
                "set one with: travelog config camera_command '<command>'",
            ),
            Permission::Location => (true, "pass --lat/--lon when adding an entry"),
            Permission::Notifications => (
                self.notifications_enabled,
                "enable with: travelog config notifications true",
            ),
        };

        let status = if granted { "available" } else { "unavailable" };
        eprintln!("  {:<14} {} ({})", permission.label(), status, hint);
        Ok(granted)
    }
}
