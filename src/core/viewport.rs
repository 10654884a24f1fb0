use crate::core::{
    constants::{DEFAULT_SURFACE_SIZE, DEFAULT_ZOOM, MAX_ZOOM, PIXELS_PER_DEGREE, SEOUL},
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};

/// The current view of the map: center, zoom, and surface dimensions
///
/// Projection is planar: degrees map linearly to pixels with a scale of
/// `2^zoom * PIXELS_PER_DEGREE`. There is no clamping and no wrap-around at
/// the antimeridian.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: u8,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
}

impl Viewport {
    /// Creates a new viewport
    ///
    /// Panics if either surface dimension is zero.
    pub fn new(center: LatLng, zoom: u8, width: u32, height: u32) -> Self {
        assert_surface(width, height);
        Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
            width,
            height,
        }
    }

    /// Sets the center of the viewport
    pub fn set_center(&mut self, center: LatLng) {
        self.center = center;
    }

    /// Sets the zoom level, clamping to `MAX_ZOOM`
    pub fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(MAX_ZOOM);
    }

    /// Sets the surface size. Panics if either dimension is zero.
    pub fn set_size(&mut self, width: u32, height: u32) {
        assert_surface(width, height);
        self.width = width;
        self.height = height;
    }

    /// Pixels per degree at the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powi(i32::from(self.zoom)) * PIXELS_PER_DEGREE
    }

    /// Surface-space pixel of the viewport center
    pub fn center_pixel(&self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Converts a geographical coordinate to surface pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let scale = self.scale();
        let origin = self.center_pixel();
        Point::new(
            origin.x + (lat_lng.lng - self.center.lng) * scale,
            origin.y - (lat_lng.lat - self.center.lat) * scale,
        )
    }

    /// Converts surface pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let scale = self.scale();
        let origin = self.center_pixel();
        LatLng::new(
            self.center.lat - (pixel.y - origin.y) / scale,
            self.center.lng + (pixel.x - origin.x) / scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        let (width, height) = DEFAULT_SURFACE_SIZE;
        Self::new(SEOUL, DEFAULT_ZOOM, width, height)
    }
}

fn assert_surface(width: u32, height: u32) {
    assert!(
        width > 0 && height > 0,
        "viewport surface must be non-empty, got {width}x{height}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seoul_viewport() -> Viewport {
        Viewport::new(SEOUL, 7, 800, 600)
    }

    #[test]
    fn test_viewport_creation() {
        let viewport = seoul_viewport();
        assert_eq!(viewport.zoom, 7);
        assert_eq!(viewport.center, SEOUL);
        assert_eq!(viewport.width, 800);
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_center_projects_to_surface_middle() {
        let viewport = seoul_viewport();
        assert_eq!(viewport.lat_lng_to_pixel(&SEOUL), Point::new(400.0, 300.0));
    }

    #[test]
    fn test_axis_directions() {
        let viewport = seoul_viewport();
        let north = viewport.lat_lng_to_pixel(&LatLng::new(SEOUL.lat + 0.1, SEOUL.lng));
        let east = viewport.lat_lng_to_pixel(&LatLng::new(SEOUL.lat, SEOUL.lng + 0.1));
        assert!(north.y < 300.0);
        assert!(east.x > 400.0);
    }

    #[test]
    fn test_round_trip() {
        let coords = [
            LatLng::new(35.1796, 129.0756),
            LatLng::new(-33.8688, 151.2093),
            LatLng::new(0.0, -179.9),
            LatLng::new(89.0, 0.5),
        ];
        for zoom in [0, 3, 7, 12, 18] {
            let mut viewport = seoul_viewport();
            viewport.set_zoom(zoom);
            for coord in &coords {
                let back = viewport.pixel_to_lat_lng(&viewport.lat_lng_to_pixel(coord));
                assert!((back.lat - coord.lat).abs() < 1e-9);
                assert!((back.lng - coord.lng).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zoom_doubles_scale() {
        let a = LatLng::new(37.0, 126.5);
        let b = LatLng::new(37.0, 127.5);
        let mut viewport = seoul_viewport();
        let before = viewport.lat_lng_to_pixel(&b).x - viewport.lat_lng_to_pixel(&a).x;
        viewport.set_zoom(8);
        let after = viewport.lat_lng_to_pixel(&b).x - viewport.lat_lng_to_pixel(&a).x;
        assert!((after - 2.0 * before).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_zero_scale_positive() {
        let mut viewport = seoul_viewport();
        viewport.set_zoom(0);
        assert_eq!(viewport.scale(), PIXELS_PER_DEGREE);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = seoul_viewport();
        viewport.set_zoom(40);
        assert_eq!(viewport.zoom, MAX_ZOOM);
    }

    #[test]
    #[should_panic(expected = "non-empty")]
    fn test_zero_surface_panics() {
        let mut viewport = seoul_viewport();
        viewport.set_size(0, 600);
    }
}
