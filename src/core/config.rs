//! Configuration for map behavior and appearance
//!
//! `MapOptions` holds the tunables the view controller consults when it
//! applies transitions (default view, local zoom, hit tolerance, geolocation
//! fallback). Every field has a default, so a JSON document only needs to
//! name the values it overrides.

use crate::{
    core::{
        constants::{DEFAULT_SURFACE_SIZE, DEFAULT_ZOOM, HIT_TOLERANCE_PX, LOCAL_ZOOM, SEOUL},
        geo::LatLng,
        viewport::Viewport,
    },
    rendering::style::MapStyle,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Center of the initial viewport
    pub default_center: LatLng,
    /// Zoom of the initial viewport
    pub default_zoom: u8,
    /// Zoom applied once the user's location is known
    pub local_zoom: u8,
    /// Exclusive pixel radius for marker hit testing
    pub hit_tolerance_px: f64,
    /// Location substituted when geolocation fails
    pub fallback_location: LatLng,
    pub surface_width: u32,
    pub surface_height: u32,
    /// Label drawn under the user-location marker
    pub user_marker_label: Option<String>,
    pub style: MapStyle,
}

impl MapOptions {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects values that would violate viewport invariants later on
    pub fn validate(&self) -> Result<()> {
        if self.surface_width == 0 || self.surface_height == 0 {
            return Err(MapError::Config(format!(
                "surface size must be positive, got {}x{}",
                self.surface_width, self.surface_height
            )));
        }
        if self.hit_tolerance_px.is_nan() || self.hit_tolerance_px <= 0.0 {
            return Err(MapError::Config(format!(
                "hit tolerance must be positive, got {}",
                self.hit_tolerance_px
            )));
        }
        if !self.default_center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "default center {:?}",
                self.default_center
            )));
        }
        if !self.fallback_location.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "fallback location {:?}",
                self.fallback_location
            )));
        }
        Ok(())
    }

    /// The viewport a freshly created controller starts from
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(
            self.default_center,
            self.default_zoom,
            self.surface_width,
            self.surface_height,
        )
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        let (surface_width, surface_height) = DEFAULT_SURFACE_SIZE;
        Self {
            default_center: SEOUL,
            default_zoom: DEFAULT_ZOOM,
            local_zoom: LOCAL_ZOOM,
            hit_tolerance_px: HIT_TOLERANCE_PX,
            fallback_location: SEOUL,
            surface_width,
            surface_height,
            user_marker_label: Some("My location".to_string()),
            style: MapStyle::default(),
        }
    }
}
