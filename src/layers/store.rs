use crate::{
    core::geo::LatLng,
    data::facility::{CategoryFilter, Facility},
    layers::marker::Marker,
};
use std::sync::Arc;

/// Ordered marker sequence. Order is z-order: later markers draw on top and
/// are hit-tested after earlier ones.
#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a fresh marker sequence: matching facilities in input order, then
    /// one user-location marker last when a location is known.
    pub fn rebuild(
        facilities: &[Arc<Facility>],
        filter: &CategoryFilter,
        user_location: Option<LatLng>,
        user_label: Option<&str>,
    ) -> Vec<Marker> {
        let mut markers: Vec<Marker> = facilities
            .iter()
            .filter(|facility| filter.matches(facility))
            .map(|facility| Marker::facility(Arc::clone(facility)))
            .collect();

        if let Some(position) = user_location {
            markers.push(Marker::user_location(
                position,
                user_label.map(str::to_string),
            ));
        }

        markers
    }

    /// Swaps in a whole new sequence
    pub fn replace(&mut self, markers: Vec<Marker>) {
        self.markers = markers;
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn facility_markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter().filter(|marker| marker.is_selectable())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
