pub mod config;
pub mod constants;
pub mod controller;
pub mod geo;
pub mod viewport;

pub use config::MapOptions;
pub use controller::ViewController;
pub use geo::{LatLng, Point};
pub use viewport::Viewport;
