//! Geolocation request bookkeeping
//!
//! Requests cannot be cancelled, so several may be in flight at once. Every
//! request is stamped with a ticket from a monotonic counter and only the
//! reply carrying the most recently issued ticket is applied; anything older
//! is stale and dropped.

use crate::{core::geo::LatLng, traits::GeolocationProvider, LocationError};
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Sequence number identifying one location request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationTicket(pub u64);

/// Result of one location request
#[derive(Debug, Clone, PartialEq)]
pub struct LocationReply {
    pub ticket: LocationTicket,
    pub outcome: Result<LatLng, LocationError>,
}

/// Issues tickets and carries replies back to the controller
#[derive(Debug)]
pub struct LocationTracker {
    next: u64,
    latest: Option<LocationTicket>,
    settled: bool,
    sender: Sender<LocationReply>,
    receiver: Receiver<LocationReply>,
}

impl LocationTracker {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self {
            next: 1,
            latest: None,
            settled: false,
            sender,
            receiver,
        }
    }

    /// Starts a new request; any earlier outstanding request becomes stale
    pub fn issue(&mut self) -> LocationTicket {
        let ticket = LocationTicket(self.next);
        self.next += 1;
        self.latest = Some(ticket);
        self.settled = false;
        ticket
    }

    /// Most recently issued ticket, if any
    pub fn latest(&self) -> Option<LocationTicket> {
        self.latest
    }

    pub fn is_current(&self, ticket: LocationTicket) -> bool {
        self.latest == Some(ticket)
    }

    /// True while the latest request has not been answered
    pub fn is_pending(&self) -> bool {
        self.latest.is_some() && !self.settled
    }

    /// Claims the answer slot for `ticket`. Only the first reply for the
    /// latest ticket wins; stale or duplicate replies get `false`.
    pub fn settle(&mut self, ticket: LocationTicket) -> bool {
        if self.is_current(ticket) && !self.settled {
            self.settled = true;
            true
        } else {
            false
        }
    }

    /// Sender a background task uses to deliver its reply
    pub fn sender(&self) -> Sender<LocationReply> {
        self.sender.clone()
    }

    /// Drains every reply delivered so far, oldest first
    pub fn drain(&self) -> Vec<LocationReply> {
        self.receiver.try_iter().collect()
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `provider` for `ticket` and packages the outcome
pub async fn request_location<P>(provider: &P, ticket: LocationTicket) -> LocationReply
where
    P: GeolocationProvider + ?Sized,
{
    let outcome = provider.current_position().await;
    match &outcome {
        Ok(position) => log::debug!("location request {} resolved to {:?}", ticket.0, position),
        Err(err) => log::debug!("location request {} failed: {}", ticket.0, err),
    }
    LocationReply { ticket, outcome }
}

/// Provider that always answers with the same outcome
#[derive(Debug, Clone, PartialEq)]
pub struct FixedGeolocation {
    outcome: Result<LatLng, LocationError>,
}

impl FixedGeolocation {
    pub fn at(position: LatLng) -> Self {
        Self {
            outcome: Ok(position),
        }
    }

    pub fn failing(error: LocationError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

#[async_trait]
impl GeolocationProvider for FixedGeolocation {
    async fn current_position(&self) -> Result<LatLng, LocationError> {
        self.outcome.clone()
    }
}
