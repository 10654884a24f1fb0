//! The view controller owns the viewport, marker store and surface and is the
//! only place that mutates them. Every input ends in a rebuild and/or a
//! redraw, and every visible change is announced through the event manager.

use crate::{
    background::geolocation::{request_location, LocationReply, LocationTicket, LocationTracker},
    core::{
        config::MapOptions,
        geo::{LatLng, Point},
        viewport::Viewport,
    },
    data::{
        facility::{CategoryFilter, Facility, FacilityId},
        listing::{build_listing, FacilityListing},
    },
    input::{EventHandled, EventManager, InputEvent, MapEvent, MapNotice},
    layers::{marker::Marker, store::MarkerStore},
    prelude::HashMap,
    rendering::{renderer::MapRenderer, surface::Surface},
    spatial::hit_test::hit_test,
    traits::{FacilitySource, GeolocationProvider, NavigationHandoff},
    Result,
};
use std::sync::Arc;

#[derive(Debug)]
pub struct ViewController {
    options: MapOptions,
    renderer: MapRenderer,
    surface: Surface,
    viewport: Viewport,
    facilities: Vec<Arc<Facility>>,
    facility_index: HashMap<FacilityId, Arc<Facility>>,
    filter: CategoryFilter,
    user_location: Option<LatLng>,
    store: MarkerStore,
    selection: Option<FacilityId>,
    locations: LocationTracker,
    event_manager: EventManager,
    frame: u64,
}

impl ViewController {
    /// Creates a controller with an empty marker set and paints the first frame
    pub fn new(options: MapOptions) -> Self {
        let viewport = options.initial_viewport();
        let surface = Surface::new(viewport.width, viewport.height);
        let renderer = MapRenderer::new(options.style.clone());

        let mut controller = Self {
            options,
            renderer,
            surface,
            viewport,
            facilities: Vec::new(),
            facility_index: HashMap::default(),
            filter: CategoryFilter::All,
            user_location: None,
            store: MarkerStore::new(),
            selection: None,
            locations: LocationTracker::new(),
            event_manager: EventManager::new(),
            frame: 0,
        };
        controller.redraw();
        controller
    }

    /// Replaces the facility set, keeping the current filter and location.
    /// Ids are unique: a record repeating an earlier id is dropped.
    pub fn load_facilities(&mut self, facilities: Vec<Facility>) {
        self.facility_index.clear();
        self.facilities = Vec::with_capacity(facilities.len());
        for facility in facilities {
            if self.facility_index.contains_key(&facility.id) {
                log::warn!("dropping {} with duplicate facility id {}", facility.name, facility.id);
                continue;
            }
            let facility = Arc::new(facility);
            self.facility_index.insert(facility.id, Arc::clone(&facility));
            self.facilities.push(facility);
        }
        log::info!("loaded {} facilities", self.facilities.len());

        if let Some(id) = self.selection {
            if !self.facility_index.contains_key(&id) {
                self.selection = None;
                self.event_manager.emit(MapEvent::SelectionCleared);
            }
        }

        self.refresh();
    }

    /// Pulls every facility from `source`; filtering happens locally
    pub async fn load_from<S>(&mut self, source: &S) -> Result<usize>
    where
        S: FacilitySource + ?Sized,
    {
        let facilities = source.load(&CategoryFilter::All).await?;
        self.load_facilities(facilities);
        Ok(self.facilities.len())
    }

    /// Start-up sequence: loads facilities and locates the user concurrently.
    /// The location outcome is applied even when loading fails.
    pub async fn initialize<S, P>(&mut self, source: &S, provider: &P) -> Result<usize>
    where
        S: FacilitySource + ?Sized,
        P: GeolocationProvider + ?Sized,
    {
        let everything = CategoryFilter::All;
        let ticket = self.begin_location_request();
        let (loaded, reply) = futures::join!(
            source.load(&everything),
            request_location(provider, ticket)
        );

        let loaded = loaded.map(|facilities| {
            self.load_facilities(facilities);
            self.facilities.len()
        });
        self.apply_location_reply(reply);
        loaded
    }

    /// Dispatches one input event
    pub fn handle(&mut self, event: InputEvent) -> EventHandled {
        match event {
            InputEvent::FilterChanged(filter) => {
                self.set_filter(filter);
                EventHandled::Handled
            }
            InputEvent::LocationResolved(location) => {
                self.location_resolved(location);
                EventHandled::Handled
            }
            InputEvent::LocationFailed => {
                self.location_failed();
                EventHandled::Handled
            }
            InputEvent::Click { position } => match self.click(position) {
                Some(_) => EventHandled::Handled,
                None => EventHandled::NotHandled,
            },
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
                EventHandled::Handled
            }
            InputEvent::FacilityChosen(id) => {
                if self.select_facility(id) {
                    EventHandled::Handled
                } else {
                    EventHandled::NotHandled
                }
            }
        }
    }

    /// Applies a category filter. The selection is left alone even when the
    /// selected facility no longer matches.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        log::debug!("filter changed to {}", filter);
        self.filter = filter;
        self.refresh();
    }

    /// Centers on the user's position and switches to the local zoom
    pub fn location_resolved(&mut self, location: LatLng) {
        log::info!("user location resolved to {:?}", location);
        self.apply_user_location(location, MapNotice::LocationFound { location });
    }

    /// Substitutes the fallback location for a failed lookup
    pub fn location_failed(&mut self) {
        let location = self.options.fallback_location;
        log::warn!("user location unavailable, falling back to {:?}", location);
        self.apply_user_location(location, MapNotice::LocationFallback { location });
    }

    fn apply_user_location(&mut self, location: LatLng, notice: MapNotice) {
        self.user_location = Some(location);
        self.viewport.set_center(location);
        self.viewport.set_zoom(self.options.local_zoom);
        self.emit_view_changed();
        self.event_manager.emit(MapEvent::Notice(notice));
        self.refresh();
    }

    /// Hit-tests `position` and selects the facility under it, if any.
    /// Clicks on empty space or on the user marker change nothing.
    pub fn click(&mut self, position: Point) -> Option<FacilityId> {
        let facility = hit_test(
            &position,
            self.store.markers(),
            &self.viewport,
            self.options.hit_tolerance_px,
        )
        .and_then(Marker::facility_record)
        .cloned();

        match facility {
            Some(facility) => {
                let id = facility.id;
                self.select(facility);
                Some(id)
            }
            None => {
                log::trace!("click at ({}, {}) hit nothing", position.x, position.y);
                None
            }
        }
    }

    /// Selects a facility by id, as when it is picked from the list
    pub fn select_facility(&mut self, id: FacilityId) -> bool {
        match self.facility_index.get(&id).cloned() {
            Some(facility) => {
                self.select(facility);
                true
            }
            None => {
                log::warn!("cannot select unknown facility {}", id);
                false
            }
        }
    }

    fn select(&mut self, facility: Arc<Facility>) {
        log::debug!("selected facility {} ({})", facility.id, facility.name);
        self.selection = Some(facility.id);
        self.viewport.set_center(facility.position);
        self.emit_view_changed();
        self.event_manager.emit(MapEvent::SelectionChanged { facility });
        self.redraw();
    }

    /// Drops the selection (detail panel closed)
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.event_manager.emit(MapEvent::SelectionCleared);
        }
    }

    /// Resizes viewport and surface together. Panics on a zero dimension.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.set_size(width, height);
        self.surface.resize(width, height);
        self.redraw();
    }

    pub fn pan_to(&mut self, center: LatLng) {
        if center != self.viewport.center {
            self.viewport.set_center(center);
            self.emit_view_changed();
            self.redraw();
        }
    }

    pub fn zoom_to(&mut self, zoom: u8) {
        let old_zoom = self.viewport.zoom;
        self.viewport.set_zoom(zoom);
        if self.viewport.zoom != old_zoom {
            self.emit_view_changed();
            self.redraw();
        }
    }

    /// Hands the selected facility to `handoff`. Needs both a selection and
    /// a known user location; without a location a notice is raised instead.
    pub fn request_directions(&mut self, handoff: &dyn NavigationHandoff) -> bool {
        let Some(facility) = self.selected_facility().cloned() else {
            log::debug!("directions requested without a selection");
            return false;
        };

        if self.user_location.is_none() {
            self.event_manager.emit(MapEvent::Notice(MapNotice::LocationRequired));
            return false;
        }

        log::info!("opening directions to {}", facility.name);
        handoff.open_directions(
            &facility.name,
            facility.position.lat,
            facility.position.lng,
        );
        true
    }

    /// Starts a location request. Replies for earlier tickets become stale.
    pub fn begin_location_request(&mut self) -> LocationTicket {
        let ticket = self.locations.issue();
        log::debug!("location request {} issued", ticket.0);
        ticket
    }

    /// Applies a reply if it answers the latest request; stale and duplicate
    /// replies are dropped.
    pub fn apply_location_reply(&mut self, reply: LocationReply) -> bool {
        if !self.locations.settle(reply.ticket) {
            log::warn!("ignoring stale location reply {}", reply.ticket.0);
            return false;
        }

        match reply.outcome {
            Ok(location) => self.location_resolved(location),
            Err(err) => {
                log::info!("location request {} failed: {}", reply.ticket.0, err);
                self.location_failed();
            }
        }
        true
    }

    /// Asks `provider` for the position and applies the answer in place
    pub async fn locate<P>(&mut self, provider: &P) -> bool
    where
        P: GeolocationProvider + ?Sized,
    {
        let ticket = self.begin_location_request();
        let reply = request_location(provider, ticket).await;
        self.apply_location_reply(reply)
    }

    /// Runs a location request in the background. The reply is picked up by
    /// `poll_location_replies`.
    #[cfg(feature = "tokio-runtime")]
    pub fn spawn_location_request(
        &mut self,
        provider: Arc<dyn GeolocationProvider>,
    ) -> (LocationTicket, Box<dyn crate::runtime::AsyncHandle>) {
        let ticket = self.begin_location_request();
        let sender = self.locations.sender();
        let handle = crate::runtime::spawn(async move {
            let reply = request_location(provider.as_ref(), ticket).await;
            if sender.send(reply).is_err() {
                log::debug!("controller dropped before location {} arrived", ticket.0);
            }
        });
        (ticket, handle)
    }

    /// Applies replies delivered by background requests; returns how many
    /// were accepted
    pub fn poll_location_replies(&mut self) -> usize {
        let mut accepted = 0;
        for reply in self.locations.drain() {
            if self.apply_location_reply(reply) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn is_locating(&self) -> bool {
        self.locations.is_pending()
    }

    pub fn on<F>(&mut self, event_type: &'static str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn markers(&self) -> &[Marker] {
        self.store.markers()
    }

    pub fn facilities(&self) -> &[Arc<Facility>] {
        &self.facilities
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn selection(&self) -> Option<FacilityId> {
        self.selection
    }

    pub fn selected_facility(&self) -> Option<&Arc<Facility>> {
        self.selection.and_then(|id| self.facility_index.get(&id))
    }

    /// Current list rows: filtered, and nearest-first once the location is known
    pub fn listing(&self) -> Vec<FacilityListing> {
        build_listing(&self.facilities, &self.filter, self.user_location)
    }

    /// Number of frames painted so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    fn refresh(&mut self) {
        self.rebuild_markers();
        self.redraw();
        let listings = self.listing();
        self.event_manager.emit(MapEvent::ListingUpdated { listings });
    }

    fn rebuild_markers(&mut self) {
        let markers = MarkerStore::rebuild(
            &self.facilities,
            &self.filter,
            self.user_location,
            self.options.user_marker_label.as_deref(),
        );
        log::debug!("marker store rebuilt with {} markers", markers.len());
        self.store.replace(markers);
    }

    fn redraw(&mut self) {
        self.renderer.render(&mut self.surface, &self.viewport, self.store.markers());
        self.frame += 1;
        self.event_manager.emit(MapEvent::Redrawn { frame: self.frame });
    }

    fn emit_view_changed(&mut self) {
        self.event_manager.emit(MapEvent::ViewChanged {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}
