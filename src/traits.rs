//! Collaborator seams
//!
//! The map core consumes facility data and the user's position through these
//! traits and hands navigation requests out through one. Concrete network,
//! UI or platform plumbing lives behind them.

use crate::{
    core::geo::LatLng,
    data::facility::{CategoryFilter, Facility},
    LocationError, Result,
};
use async_trait::async_trait;

/// Supplies facility records, at load time and whenever the filter changes
#[async_trait]
pub trait FacilitySource: Send + Sync {
    async fn load(&self, filter: &CategoryFilter) -> Result<Vec<Facility>>;
}

/// Resolves the user's position. May suspend for as long as the platform takes.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> std::result::Result<LatLng, LocationError>;
}

/// Opens turn-by-turn directions somewhere outside the map. Fire-and-forget.
pub trait NavigationHandoff {
    fn open_directions(&self, facility_name: &str, lat: f64, lng: f64);
}

/// Directions link for the Kakao map web app
pub fn kakao_directions_url(facility_name: &str, lat: f64, lng: f64) -> String {
    format!(
        "https://map.kakao.com/link/to/{},{},{}",
        urlencoding::encode(facility_name),
        lat,
        lng
    )
}
