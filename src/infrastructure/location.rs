//! Location provider and reverse geocoding

use crate::domain::{Address, Coordinates};
use crate::error::{Result, TravelogError};
use crate::infrastructure::config::Place;
use async_trait::async_trait;

#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates>;
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidate addresses for a point, best match first. May be empty.
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<Address>>;
}

/// Position supplied up front (e.g. `--lat`/`--lon` on the command line)
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    coordinates: Option<Coordinates>,
}

impl FixedLocation {
    pub fn new(coordinates: Option<Coordinates>) -> Self {
        FixedLocation { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates> {
        self.coordinates
            .ok_or_else(|| TravelogError::Location("no position available".to_string()))
    }
}

/// Offline geocoder matching against configured named places
#[derive(Debug, Clone, Default)]
pub struct PlaceGeocoder {
    places: Vec<Place>,
}

impl PlaceGeocoder {
    pub fn new(places: Vec<Place>) -> Self {
        PlaceGeocoder { places }
    }
}

#[async_trait]
impl Geocoder for PlaceGeocoder {
    async fn reverse_geocode(&self, coordinates: Coordinates) -> Result<Vec<Address>> {
        let mut matches: Vec<(f64, &Place)> = self
            .places
            .iter()
            .map(|place| (place.coordinates().distance_km(&coordinates), place))
            .filter(|(distance, place)| *distance <= place.radius_km)
            .collect();
        matches.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(matches
            .into_iter()
            .map(|(_, place)| place.to_address())
            .collect())
    }
}
