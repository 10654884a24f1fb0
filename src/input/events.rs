use crate::{
    core::geo::{LatLng, Point},
    data::{
        facility::{CategoryFilter, Facility, FacilityId},
        listing::FacilityListing,
    },
};
use std::sync::Arc;

/// Events the view controller consumes
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Category filter changed in the list UI
    FilterChanged(CategoryFilter),
    /// Geolocation succeeded
    LocationResolved(LatLng),
    /// Geolocation was denied or unavailable
    LocationFailed,
    /// Click/tap in surface-local pixels
    Click { position: Point },
    /// Rendering surface resized
    Resize { width: u32, height: u32 },
    /// A facility was picked from the list rather than the map
    FacilityChosen(FacilityId),
}

/// Whether an event changed anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

/// Informational messages for the user. None of these block the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapNotice {
    /// Location found; the list is now sorted by distance
    LocationFound { location: LatLng },
    /// Location unavailable; the fallback location is used instead
    LocationFallback { location: LatLng },
    /// Directions need the user's location first
    LocationRequired,
}

/// Events the map emits to its collaborators
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Center or zoom changed
    ViewChanged { center: LatLng, zoom: u8 },
    /// A facility became the active selection (detail panel)
    SelectionChanged { facility: Arc<Facility> },
    /// The active selection was dropped
    SelectionCleared,
    /// Fresh rows for the facility list
    ListingUpdated { listings: Vec<FacilityListing> },
    Notice(MapNotice),
    /// The surface was repainted
    Redrawn { frame: u64 },
}

impl MapEvent {
    /// Key listeners register under
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::SelectionChanged { .. } => "selectionchanged",
            MapEvent::SelectionCleared => "selectioncleared",
            MapEvent::ListingUpdated { .. } => "listingupdated",
            MapEvent::Notice(_) => "notice",
            MapEvent::Redrawn { .. } => "redrawn",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(MapEvent::Redrawn { frame: 1 }.name(), "redrawn");
        assert_eq!(MapEvent::Notice(MapNotice::LocationRequired).name(), "notice");
    }
}
