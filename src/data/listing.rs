//! Distance-annotated facility rows for the list collaborator

use crate::{
    core::geo::LatLng,
    data::facility::{CategoryFilter, Facility},
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilityListing {
    pub facility: Arc<Facility>,
    /// Distance from the user, when the user's location is known
    pub distance_km: Option<f64>,
}

/// Filters `facilities` and, when the user's location is known, sorts the
/// rows nearest-first. Without a location the input order is kept.
pub fn build_listing(
    facilities: &[Arc<Facility>],
    filter: &CategoryFilter,
    user_location: Option<LatLng>,
) -> Vec<FacilityListing> {
    let mut rows: Vec<FacilityListing> = facilities
        .iter()
        .filter(|facility| filter.matches(facility))
        .map(|facility| FacilityListing {
            facility: Arc::clone(facility),
            distance_km: user_location.map(|user| user.distance_km(&facility.position)),
        })
        .collect();

    if user_location.is_some() {
        // stable, so equidistant rows keep their input order
        rows.sort_by(|a, b| {
            let a = a.distance_km.unwrap_or(f64::INFINITY);
            let b = b.distance_km.unwrap_or(f64::INFINITY);
            a.total_cmp(&b)
        });
    }

    rows
}
