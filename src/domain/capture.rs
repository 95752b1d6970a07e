//! Capture state machine
//!
//! Pure transitions over the draft of a new entry. Talking to the picker,
//! location services and the store is the application layer's job.

use crate::domain::{Coordinates, TravelEntry};
use crate::error::{Result, TravelogError};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStage {
    Idle,
    Picking,
    LocationResolving,
    FormEditing,
    Saving,
    Done,
}

/// Everything the user has supplied so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureDraft {
    pub image: Option<String>,
    pub location: Option<Coordinates>,
    pub address: Option<String>,
    pub title: String,
    pub description: String,
}

/// A draft that passed validation and can become an entry
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    image: String,
    title: String,
    description: String,
    location: Option<Coordinates>,
    address: Option<String>,
}

impl ValidDraft {
    pub fn into_entry(self, now: DateTime<Utc>) -> TravelEntry {
        TravelEntry::create(
            now,
            self.image,
            &self.title,
            &self.description,
            self.location,
            self.address,
        )
    }
}

impl CaptureDraft {
    /// Check image, title and description, in that order
    pub fn validate(&self) -> Result<ValidDraft> {
        let image = self
            .image
            .as_deref()
            .map(str::trim)
            .filter(|i| !i.is_empty())
            .ok_or_else(|| TravelogError::Validation("image".to_string()))?;
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TravelogError::Validation("title".to_string()));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(TravelogError::Validation("description".to_string()));
        }

        Ok(ValidDraft {
            image: image.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            location: self.location,
            address: self.address.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct CaptureSession {
    stage: CaptureStage,
    draft: CaptureDraft,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        CaptureSession {
            stage: CaptureStage::Idle,
            draft: CaptureDraft::default(),
        }
    }

    pub fn stage(&self) -> CaptureStage {
        self.stage
    }

    pub fn draft(&self) -> &CaptureDraft {
        &self.draft
    }

    /// Fail with a `Capture` error unless the session is in one of `allowed`
    pub fn require(&self, allowed: &[CaptureStage], action: &str) -> Result<()> {
        if allowed.contains(&self.stage) {
            Ok(())
        } else {
            Err(TravelogError::Capture(format!(
                "cannot {} while {:?}",
                action, self.stage
            )))
        }
    }

    /// Start choosing a photo. Re-picking from the form keeps the draft.
    pub fn start_picking(&mut self) -> Result<()> {
        self.require(
            &[CaptureStage::Idle, CaptureStage::FormEditing],
            "pick media",
        )?;
        self.stage = CaptureStage::Picking;
        Ok(())
    }

    pub fn media_picked(&mut self, uri: String) -> Result<()> {
        self.require(&[CaptureStage::Picking], "accept media")?;
        self.draft.image = Some(uri);
        self.stage = CaptureStage::LocationResolving;
        Ok(())
    }

    /// Picker dismissed. Back to the form if a photo was already chosen.
    pub fn media_cancelled(&mut self) -> Result<()> {
        self.require(&[CaptureStage::Picking], "cancel picking")?;
        self.stage = if self.draft.image.is_some() {
            CaptureStage::FormEditing
        } else {
            CaptureStage::Idle
        };
        Ok(())
    }

    pub fn location_resolved(
        &mut self,
        location: Option<Coordinates>,
        address: Option<String>,
    ) -> Result<()> {
        self.require(&[CaptureStage::LocationResolving], "set location")?;
        self.draft.location = location;
        self.draft.address = address;
        self.stage = CaptureStage::FormEditing;
        Ok(())
    }

    pub fn edit(&mut self, title: &str, description: &str) -> Result<()> {
        self.require(&[CaptureStage::FormEditing], "edit the form")?;
        self.draft.title = title.to_string();
        self.draft.description = description.to_string();
        Ok(())
    }

    /// Validate and move to `Saving`. On validation failure the session
    /// stays in `FormEditing`.
    pub fn begin_saving(&mut self) -> Result<ValidDraft> {
        self.require(&[CaptureStage::FormEditing], "save")?;
        let valid = self.draft.validate()?;
        self.stage = CaptureStage::Saving;
        Ok(valid)
    }

    /// Storage failed; keep what the user typed
    pub fn save_failed(&mut self) -> Result<()> {
        self.require(&[CaptureStage::Saving], "recover from save")?;
        self.stage = CaptureStage::FormEditing;
        Ok(())
    }

    pub fn saved(&mut self) -> Result<()> {
        self.require(&[CaptureStage::Saving], "finish saving")?;
        self.stage = CaptureStage::Done;
        Ok(())
    }

    /// Drop the draft and return to `Idle` from any stage
    pub fn reset(&mut self) {
        self.stage = CaptureStage::Idle;
        self.draft = CaptureDraft::default();
    }
}
