pub mod geolocation;

pub use geolocation::{
    request_location, FixedGeolocation, LocationReply, LocationTicket, LocationTracker,
};
