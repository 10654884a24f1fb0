pub mod facility;
pub mod listing;
pub mod sample;
pub mod source;

pub use facility::{
    facilities_from_file, facilities_from_json, CategoryFilter, Facility, FacilityId,
};
pub use listing::{build_listing, FacilityListing};
pub use source::StaticFacilitySource;
