//! Capture flow use case
//!
//! Drives a `CaptureSession` through media selection, location lookup and
//! saving, calling out to the platform collaborators at each step.

use crate::domain::{CaptureDraft, CaptureStage, CaptureSession, Coordinates, TravelEntry};
use crate::error::Result;
use crate::infrastructure::{
    EntryRepository, Geocoder, LocationProvider, MediaPicker, MediaSelection, MediaSource, Notifier,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Platform services the capture flow talks to
#[derive(Clone)]
pub struct CaptureServices {
    pub picker: Arc<dyn MediaPicker>,
    pub location: Arc<dyn LocationProvider>,
    pub geocoder: Arc<dyn Geocoder>,
    pub notifier: Arc<dyn Notifier>,
}

/// Result of the best-effort location step
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Resolved {
        coordinates: Coordinates,
        address: Option<String>,
    },
    /// No position; the entry is saved without location
    Unavailable(String),
}

pub struct CaptureFlow {
    session: CaptureSession,
    entries: EntryRepository,
    services: CaptureServices,
}

impl CaptureFlow {
    pub fn new(entries: EntryRepository, services: CaptureServices) -> Self {
        CaptureFlow {
            session: CaptureSession::new(),
            entries,
            services,
        }
    }

    pub fn stage(&self) -> CaptureStage {
        self.session.stage()
    }

    pub fn draft(&self) -> &CaptureDraft {
        self.session.draft()
    }

    /// Choose a photo from the gallery or the camera
    pub async fn pick(&mut self, source: MediaSource) -> Result<MediaSelection> {
        self.session.start_picking()?;

        match self.services.picker.pick(source).await {
            Ok(MediaSelection::Picked(uri)) => {
                self.session.media_picked(uri.clone())?;
                Ok(MediaSelection::Picked(uri))
            }
            Ok(MediaSelection::Cancelled) => {
                self.session.media_cancelled()?;
                Ok(MediaSelection::Cancelled)
            }
            Err(e) => {
                self.session.media_cancelled()?;
                Err(e)
            }
        }
    }

    /// Look up the current position and its address. Never fails on
    /// collaborator errors; the form is reached either way.
    pub async fn resolve_location(&mut self) -> Result<LocationOutcome> {
        self.session
            .require(&[CaptureStage::LocationResolving], "resolve location")?;

        let coordinates = match self.services.location.current_position().await {
            Ok(coordinates) => coordinates,
            Err(e) => {
                warn!(error = %e, "location unavailable");
                self.session.location_resolved(None, None)?;
                return Ok(LocationOutcome::Unavailable(e.to_string()));
            }
        };

        let address = match self.services.geocoder.reverse_geocode(coordinates).await {
            Ok(candidates) => candidates
                .first()
                .map(|address| address.formatted())
                .filter(|text| !text.is_empty()),
            Err(e) => {
                warn!(error = %e, "reverse geocoding failed");
                None
            }
        };

        self.session
            .location_resolved(Some(coordinates), address.clone())?;
        Ok(LocationOutcome::Resolved {
            coordinates,
            address,
        })
    }

    pub fn edit(&mut self, title: &str, description: &str) -> Result<()> {
        self.session.edit(title, description)
    }

    pub async fn save(&mut self) -> Result<TravelEntry> {
        self.save_at(Utc::now()).await
    }

    /// Validate, persist and notify. Validation and storage failures leave
    /// the flow in `FormEditing` with the draft intact.
    pub async fn save_at(&mut self, now: DateTime<Utc>) -> Result<TravelEntry> {
        let entry = self.session.begin_saving()?.into_entry(now);

        if let Err(e) = self.entries.append(entry.clone()).await {
            self.session.save_failed()?;
            return Err(e);
        }
        info!(id = %entry.id, "travel entry saved");

        if let Err(e) = self
            .services
            .notifier
            .notify("Travel entry saved", &entry.title)
            .await
        {
            warn!(error = %e, "notification failed");
        }

        self.session.saved()?;
        Ok(entry)
    }

    /// Screen lost focus: drop the draft. Writes already issued still finish.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::open_repositories;
    use crate::domain::Address;
    use crate::error::TravelogError;
    use crate::infrastructure::{FixedLocation, KeyValueStore, MemoryStore, ENTRIES_KEY};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    struct StubPicker(Option<&'static str>);

    #[async_trait]
    impl MediaPicker for StubPicker {
        async fn pick(&self, _source: MediaSource) -> Result<MediaSelection> {
            Ok(match self.0 {
                Some(uri) => MediaSelection::Picked(uri.to_string()),
                None => MediaSelection::Cancelled,
            })
        }
    }

    struct StubGeocoder(Result<Vec<Address>>);

    #[async_trait]
    impl Geocoder for StubGeocoder {
        async fn reverse_geocode(&self, _coordinates: Coordinates) -> Result<Vec<Address>> {
            match &self.0 {
                Ok(addresses) => Ok(addresses.clone()),
                Err(_) => Err(TravelogError::Location("geocoder offline".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, title: &str, body: &str) -> Result<()> {
            if self.fail {
                return Err(TravelogError::Notification("denied".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct ReadOnlyStore(MemoryStore);

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key).await
        }
        async fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(TravelogError::storage(key, "read-only"))
        }
        async fn remove(&self, key: &str) -> Result<()> {
            Err(TravelogError::storage(key, "read-only"))
        }
        async fn clear(&self) -> Result<()> {
            Err(TravelogError::storage("*", "read-only"))
        }
    }

    fn lisbon() -> Coordinates {
        Coordinates::new(38.72, -9.14).unwrap()
    }

    fn services(
        picker: StubPicker,
        position: Option<Coordinates>,
        geocoder: StubGeocoder,
        notifier: Arc<RecordingNotifier>,
    ) -> CaptureServices {
        CaptureServices {
            picker: Arc::new(picker),
            location: Arc::new(FixedLocation::new(position)),
            geocoder: Arc::new(geocoder),
            notifier,
        }
    }

    fn lisbon_address() -> Vec<Address> {
        vec![Address {
            name: Some("Alfama".to_string()),
            city: Some("Lisbon".to_string()),
            country: Some("Portugal".to_string()),
            ..Address::default()
        }]
    }

    #[tokio::test]
    async fn test_full_capture_saves_entry_and_notifies() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store.clone());
        let notifier = Arc::new(RecordingNotifier::default());
        let mut flow = CaptureFlow::new(
            entries.clone(),
            services(
                StubPicker(Some("file:///photos/a.jpg")),
                Some(lisbon()),
                StubGeocoder(Ok(lisbon_address())),
                notifier.clone(),
            ),
        );

        flow.pick(MediaSource::Gallery).await.unwrap();
        assert_eq!(flow.stage(), CaptureStage::LocationResolving);

        let outcome = flow.resolve_location().await.unwrap();
        assert_eq!(
            outcome,
            LocationOutcome::Resolved {
                coordinates: lisbon(),
                address: Some("Alfama, Lisbon, Portugal".to_string()),
            }
        );

        flow.edit(" Tram 28 ", " Up the hill ").unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let entry = flow.save_at(now).await.unwrap();

        assert_eq!(flow.stage(), CaptureStage::Done);
        assert_eq!(entry.id, now.timestamp_millis().to_string());
        assert_eq!(entry.title, "Tram 28");
        assert_eq!(entry.location, Some(lisbon()));
        assert_eq!(entries.load_all().await.unwrap(), vec![entry]);
        assert_eq!(
            notifier.sent.lock().unwrap().clone(),
            vec![("Travel entry saved".to_string(), "Tram 28".to_string())]
        );
    }

    #[tokio::test]
    async fn test_location_failure_is_not_fatal() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store);
        let mut flow = CaptureFlow::new(
            entries,
            services(
                StubPicker(Some("file:///a.jpg")),
                None,
                StubGeocoder(Ok(lisbon_address())),
                Arc::new(RecordingNotifier::default()),
            ),
        );

        flow.pick(MediaSource::Camera).await.unwrap();
        let outcome = flow.resolve_location().await.unwrap();

        assert!(matches!(outcome, LocationOutcome::Unavailable(_)));
        assert_eq!(flow.stage(), CaptureStage::FormEditing);

        flow.edit("Beach", "Nice").unwrap();
        let entry = flow.save().await.unwrap();
        assert_eq!(entry.location, None);
        assert_eq!(entry.address, None);
    }

    #[tokio::test]
    async fn test_geocoder_failure_keeps_coordinates() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store);
        let mut flow = CaptureFlow::new(
            entries,
            services(
                StubPicker(Some("file:///a.jpg")),
                Some(lisbon()),
                StubGeocoder(Err(TravelogError::Location("x".to_string()))),
                Arc::new(RecordingNotifier::default()),
            ),
        );

        flow.pick(MediaSource::Gallery).await.unwrap();
        let outcome = flow.resolve_location().await.unwrap();

        assert_eq!(
            outcome,
            LocationOutcome::Resolved {
                coordinates: lisbon(),
                address: None
            }
        );
        assert_eq!(flow.draft().location, Some(lisbon()));
    }

    #[tokio::test]
    async fn test_cancelled_pick_returns_to_idle() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store);
        let mut flow = CaptureFlow::new(
            entries,
            services(
                StubPicker(None),
                None,
                StubGeocoder(Ok(vec![])),
                Arc::new(RecordingNotifier::default()),
            ),
        );

        let selection = flow.pick(MediaSource::Gallery).await.unwrap();

        assert_eq!(selection, MediaSelection::Cancelled);
        assert_eq!(flow.stage(), CaptureStage::Idle);
        assert!(flow.resolve_location().await.is_err());
    }

    #[tokio::test]
    async fn test_validation_error_keeps_form() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store.clone());
        let mut flow = CaptureFlow::new(
            entries,
            services(
                StubPicker(Some("file:///a.jpg")),
                None,
                StubGeocoder(Ok(vec![])),
                Arc::new(RecordingNotifier::default()),
            ),
        );
        flow.pick(MediaSource::Gallery).await.unwrap();
        flow.resolve_location().await.unwrap();
        flow.edit("Beach", "   ").unwrap();

        assert!(matches!(
            flow.save().await,
            Err(TravelogError::Validation(_))
        ));
        assert_eq!(flow.stage(), CaptureStage::FormEditing);
        assert_eq!(store.get(ENTRIES_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_draft() {
        let store: Arc<dyn KeyValueStore> = Arc::new(ReadOnlyStore(MemoryStore::new()));
        let (entries, _) = open_repositories(store);
        let notifier = Arc::new(RecordingNotifier::default());
        let mut flow = CaptureFlow::new(
            entries,
            services(
                StubPicker(Some("file:///a.jpg")),
                None,
                StubGeocoder(Ok(vec![])),
                notifier.clone(),
            ),
        );
        flow.pick(MediaSource::Gallery).await.unwrap();
        flow.resolve_location().await.unwrap();
        flow.edit("Beach", "Nice").unwrap();

        assert!(matches!(
            flow.save().await,
            Err(TravelogError::Storage { .. })
        ));
        assert_eq!(flow.stage(), CaptureStage::FormEditing);
        assert_eq!(flow.draft().title, "Beach");
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_still_saves() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store);
        let notifier = Arc::new(RecordingNotifier {
            fail: true,
            ..RecordingNotifier::default()
        });
        let mut flow = CaptureFlow::new(
            entries.clone(),
            services(
                StubPicker(Some("file:///a.jpg")),
                None,
                StubGeocoder(Ok(vec![])),
                notifier,
            ),
        );
        flow.pick(MediaSource::Gallery).await.unwrap();
        flow.resolve_location().await.unwrap();
        flow.edit("Beach", "Nice").unwrap();

        flow.save().await.unwrap();
        assert_eq!(flow.stage(), CaptureStage::Done);
        assert_eq!(entries.load_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_discards_draft() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let (entries, _) = open_repositories(store);
        let mut flow = CaptureFlow::new(
            entries,
            services(
                StubPicker(Some("file:///a.jpg")),
                None,
                StubGeocoder(Ok(vec![])),
                Arc::new(RecordingNotifier::default()),
            ),
        );
        flow.pick(MediaSource::Gallery).await.unwrap();

        flow.reset();
        assert_eq!(flow.stage(), CaptureStage::Idle);
        assert_eq!(flow.draft().image, None);
    }
}
