use crate::{
    core::geo::LatLng,
    data::facility::{Facility, FacilityId},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a marker stands for. Facility markers carry their record.
#[derive(Debug, Clone, PartialEq)]
pub enum MarkerKind {
    Facility(Arc<Facility>),
    UserLocation,
}

/// Glyph drawn in the middle of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerIcon {
    Hospital,
    Pin,
}

/// A renderable, selectable point. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    position: LatLng,
    kind: MarkerKind,
    icon: MarkerIcon,
    label: Option<String>,
}

impl Marker {
    pub fn facility(facility: Arc<Facility>) -> Self {
        Self {
            position: facility.position,
            label: Some(facility.name.clone()),
            kind: MarkerKind::Facility(facility),
            icon: MarkerIcon::Hospital,
        }
    }

    pub fn user_location(position: LatLng, label: Option<String>) -> Self {
        Self {
            position,
            kind: MarkerKind::UserLocation,
            icon: MarkerIcon::Pin,
            label,
        }
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn kind(&self) -> &MarkerKind {
        &self.kind
    }

    pub fn icon(&self) -> MarkerIcon {
        self.icon
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_selectable(&self) -> bool {
        matches!(self.kind, MarkerKind::Facility(_))
    }

    pub fn facility_record(&self) -> Option<&Arc<Facility>> {
        match &self.kind {
            MarkerKind::Facility(facility) => Some(facility),
            MarkerKind::UserLocation => None,
        }
    }

    pub fn facility_id(&self) -> Option<FacilityId> {
        self.facility_record().map(|facility| facility.id)
    }
}
