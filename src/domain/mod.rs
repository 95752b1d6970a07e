//! Domain layer - Travel entries, overlays and the capture state machine

pub mod capture;
pub mod entry;
pub mod hashtags;
pub mod location;
pub mod overlay;

pub use capture::{CaptureDraft, CaptureSession, CaptureStage, ValidDraft};
pub use entry::TravelEntry;
pub use location::{Address, Coordinates};
pub use overlay::{Overlay, OverlayKind};
