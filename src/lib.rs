//! # clinimap
//!
//! Map core for a medical-facility locator.
//!
//! Facilities are drawn as markers on a flat, tile-less map. The crate covers
//! the projection between geographic and surface pixel coordinates, the
//! ordered marker store, rendering to an RGBA surface, click hit-testing,
//! great-circle distances and the view controller that ties them together.
//! Facility data, geolocation and navigation hand-off come in through the
//! traits in [`traits`].

pub mod background;
pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod spatial;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapOptions,
    controller::ViewController,
    geo::{distance_km, LatLng, Point},
    viewport::Viewport,
};

pub use crate::data::{
    facility::{CategoryFilter, Facility, FacilityId},
    listing::{build_listing, FacilityListing},
};

pub use crate::layers::{marker::Marker, store::MarkerStore};

pub use crate::input::{EventHandled, InputEvent, MapEvent, MapNotice};

pub use crate::rendering::{MapRenderer, MapStyle, Surface};

pub use crate::spatial::hit_test::hit_test;

pub use crate::traits::{FacilitySource, GeolocationProvider, NavigationHandoff};

/// Installs `env_logger` as the `log` backend. `RUST_LOG` wins over
/// `default_filter`; repeated calls are no-ops.
#[cfg(feature = "debug")]
pub fn init_logging(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),
}

/// Why the user's position could not be determined
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    Unavailable,

    #[error("location request timed out")]
    Timeout,

    #[error("geolocation not supported on this platform")]
    Unsupported,
}
