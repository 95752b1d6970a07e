//! Media selection (gallery path or camera)

use crate::error::{Result, TravelogError};
use crate::infrastructure::CameraSession;
use async_trait::async_trait;
use chrono::Utc;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaSource {
    Gallery,
    Camera,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSelection {
    /// Local URI of the chosen photo
    Picked(String),
    Cancelled,
}

#[async_trait]
pub trait MediaPicker: Send + Sync {
    async fn pick(&self, source: MediaSource) -> Result<MediaSelection>;
}

/// Picker for the command line: the "gallery" is a path given by the user,
/// the camera is an external capture command.
#[derive(Debug, Clone)]
pub struct CliMediaPicker {
    gallery_path: Option<PathBuf>,
    camera: Option<CameraSession>,
    media_dir: PathBuf,
}

impl CliMediaPicker {
    pub fn new(
        gallery_path: Option<PathBuf>,
        camera: Option<CameraSession>,
        media_dir: PathBuf,
    ) -> Self {
        CliMediaPicker {
            gallery_path,
            camera,
            media_dir,
        }
    }

    fn file_uri(path: &std::path::Path) -> Result<String> {
        let absolute = path.canonicalize().map_err(|e| {
            TravelogError::Media(format!("Cannot read image '{}': {}", path.display(), e))
        })?;
        if !absolute.is_file() {
            return Err(TravelogError::Media(format!(
                "Not a file: {}",
                path.display()
            )));
        }
        Url::from_file_path(&absolute)
            .map(String::from)
            .map_err(|_| TravelogError::Media(format!("Invalid path: {}", absolute.display())))
    }
}

#[async_trait]
impl MediaPicker for CliMediaPicker {
    async fn pick(&self, source: MediaSource) -> Result<MediaSelection> {
        match source {
            MediaSource::Gallery => match &self.gallery_path {
                Some(path) => Ok(MediaSelection::Picked(Self::file_uri(path)?)),
                None => Ok(MediaSelection::Cancelled),
            },
            MediaSource::Camera => {
                let camera = self.camera.as_ref().ok_or_else(|| {
                    TravelogError::Media("No camera command configured".to_string())
                })?;

                tokio::fs::create_dir_all(&self.media_dir).await?;
                let output = self
                    .media_dir
                    .join(format!("{}.jpg", Utc::now().timestamp_millis()));

                if camera.capture(&output).await? {
                    Ok(MediaSelection::Picked(Self::file_uri(&output)?))
                } else {
                    Ok(MediaSelection::Cancelled)
                }
            }
        }
    }
}
