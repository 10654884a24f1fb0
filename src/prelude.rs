//! Prelude module for common clinimap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use clinimap::prelude::*;`

pub use crate::core::{
    config::MapOptions,
    constants::{DEFAULT_ZOOM, HIT_TOLERANCE_PX, LOCAL_ZOOM, SEOUL},
    controller::ViewController,
    geo::{distance_km, LatLng, Point},
    viewport::Viewport,
};

pub use crate::data::{
    facility::{facilities_from_json, CategoryFilter, Facility, FacilityId},
    listing::{build_listing, FacilityListing},
    sample::sample_facilities,
    source::StaticFacilitySource,
};

pub use crate::layers::{
    marker::{Marker, MarkerIcon, MarkerKind},
    store::MarkerStore,
};

pub use crate::input::{EventHandled, EventManager, InputEvent, MapEvent, MapNotice};

pub use crate::spatial::hit_test::hit_test;

pub use crate::background::{
    request_location, FixedGeolocation, LocationReply, LocationTicket, LocationTracker,
};

pub use crate::rendering::{Color, MapRenderer, MapStyle, RenderContext, Surface};

pub use crate::traits::{
    kakao_directions_url, FacilitySource, GeolocationProvider, NavigationHandoff,
};

pub use crate::runtime::AsyncHandle;

#[cfg(feature = "tokio-runtime")]
pub use crate::runtime::spawn;

pub use crate::{LocationError, MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
