pub mod marker;
pub mod store;

pub use marker::{Marker, MarkerIcon, MarkerKind};
pub use store::MarkerStore;
