//! Core constants for the facility map.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

use crate::core::geo::LatLng;

/// Pixels per degree at zoom 0. The planar scale is `2^zoom * PIXELS_PER_DEGREE`.
pub const PIXELS_PER_DEGREE: f64 = 100.0;

/// Highest zoom level a viewport accepts.
pub const MAX_ZOOM: u8 = 18;

/// Seoul city hall, the default map center and geolocation fallback.
pub const SEOUL: LatLng = LatLng {
    lat: 37.5665,
    lng: 126.9780,
};

/// Zoom used before the user has been located.
pub const DEFAULT_ZOOM: u8 = 7;

/// Zoom applied once the user's location is known.
pub const LOCAL_ZOOM: u8 = 9;

/// Default rendering surface size in pixels.
pub const DEFAULT_SURFACE_SIZE: (u32, u32) = (800, 600);

/// Maximum pointer distance (exclusive) for a click to select a marker.
pub const HIT_TOLERANCE_PX: f64 = 20.0;

/// Grid spacing in pixels, independent of zoom.
pub const GRID_SPACING_PX: u32 = 50;

/// Marker circle radius in pixels.
pub const MARKER_RADIUS_PX: f64 = 15.0;

/// Label plate size (width, height) drawn under a marker.
pub const LABEL_PLATE_SIZE: (u32, u32) = (120, 25);
