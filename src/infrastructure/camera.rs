//! External camera command integration

use crate::error::{Result, TravelogError};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Runs a user-configured capture command (e.g. `fswebcam -r 1280x720`)
/// with the output path appended as the final argument
#[derive(Debug, Clone)]
pub struct CameraSession {
    command: String,
}

impl CameraSession {
    pub fn new(camera_command: String) -> Self {
        CameraSession {
            command: camera_command,
        }
    }

    /// Capture a photo into `output`.
    ///
    /// Returns `false` when the command succeeded but produced no file, which
    /// is how a user dismissing the camera looks from here.
    pub async fn capture(&self, output: &Path) -> Result<bool> {
        let (program, mut args) = self.parse_command()?;
        args.push(output.to_string_lossy().to_string());

        debug!(program = %program, ?args, "running camera command");

        #[cfg(windows)]
        let status = Command::new("cmd")
            .arg("/C")
            .arg(&program)
            .args(&args)
            .status()
            .await;

        #[cfg(not(windows))]
        let status = Command::new(&program).args(&args).status().await;

        let status = status.map_err(|e| {
            TravelogError::Media(format!("Failed to launch camera '{}': {}", program, e))
        })?;

        if !status.success() {
            return Err(TravelogError::Media(format!(
                "Camera command '{}' exited with {}",
                program, status
            )));
        }

        Ok(output.is_file())
    }

    /// Parse command into program and arguments
    fn parse_command(&self) -> Result<(String, Vec<String>)> {
        let parts: Vec<&str> = self.command.split_whitespace().collect();

        let Some((program, args)) = parts.split_first() else {
            return Err(TravelogError::Media(
                "Camera command is empty".to_string(),
            ));
        };

        Ok((
            program.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        ))
    }
}
