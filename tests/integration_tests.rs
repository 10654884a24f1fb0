use clinimap::prelude::*;
use std::sync::Mutex;

/// Integration tests for real user interactions and scenarios
/// These tests drive the controller the way a host application would
#[cfg(test)]
mod integration_tests {
    use super::*;

    fn two_facilities() -> Vec<Facility> {
        vec![
            Facility::new(1, "City Hall Clinic", "clinic", SEOUL),
            Facility::new(2, "North Hospital", "hospital", LatLng::new(37.58, 126.99)),
        ]
    }

    fn controller_with(facilities: Vec<Facility>) -> ViewController {
        let mut controller = ViewController::new(MapOptions::default());
        controller.load_facilities(facilities);
        controller.process_events();
        controller
    }

    /// Collects every event delivered to listeners under `name`
    fn record(controller: &mut ViewController, name: &'static str) -> Arc<Mutex<Vec<MapEvent>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        controller.on(name, move |event| sink.lock().unwrap().push(event.clone()));
        seen
    }

    #[tokio::test]
    async fn test_click_selects_marker_and_recenters() {
        let mut controller = controller_with(two_facilities());
        let style = MapStyle::default();

        // (37.58, 126.99) at zoom 7 around Seoul
        let target = controller.viewport().lat_lng_to_pixel(&LatLng::new(37.58, 126.99));
        assert!((target.x - 553.6).abs() < 1e-6);
        assert!((target.y - 127.2).abs() < 1e-6);

        let handled = controller.handle(InputEvent::Click { position: target });
        assert_eq!(handled, EventHandled::Handled);
        assert_eq!(controller.selection(), Some(FacilityId(2)));
        assert_eq!(controller.viewport().center, LatLng::new(37.58, 126.99));
        assert_eq!(controller.viewport().zoom, DEFAULT_ZOOM);

        // the selected marker is now drawn in the middle of the surface
        assert_eq!(
            controller.surface().pixel(392, 300),
            Some(style.markers.facility_color.to_rgba())
        );
    }

    #[tokio::test]
    async fn test_click_tolerance_is_exclusive() {
        let mut controller = controller_with(two_facilities());
        let center = controller.viewport().lat_lng_to_pixel(&SEOUL);

        let edge = Point::new(center.x + HIT_TOLERANCE_PX, center.y);
        assert_eq!(controller.click(edge), None);

        let inside = Point::new(center.x + HIT_TOLERANCE_PX - 0.5, center.y);
        assert_eq!(controller.click(inside), Some(FacilityId(1)));
    }

    #[tokio::test]
    async fn test_user_marker_is_not_clickable() {
        let mut controller = controller_with(two_facilities());
        let spot = LatLng::new(37.4, 126.8);
        controller.handle(InputEvent::LocationResolved(spot));

        let user_marker = controller.markers().last().unwrap();
        assert!(matches!(user_marker.kind(), MarkerKind::UserLocation));

        let pixel = controller.viewport().lat_lng_to_pixel(&spot);
        assert_eq!(
            controller.handle(InputEvent::Click { position: pixel }),
            EventHandled::NotHandled
        );
        assert_eq!(controller.selection(), None);
    }

    #[tokio::test]
    async fn test_filtered_out_facility_cannot_be_clicked() {
        let mut controller = controller_with(two_facilities());
        controller.handle(InputEvent::FilterChanged("clinic".parse().unwrap()));
        assert_eq!(controller.markers().len(), 1);

        let pixel = controller.viewport().lat_lng_to_pixel(&LatLng::new(37.58, 126.99));
        assert_eq!(controller.click(pixel), None);

        controller.handle(InputEvent::FilterChanged(CategoryFilter::All));
        assert_eq!(controller.markers().len(), 2);
    }

    #[tokio::test]
    async fn test_initialize_sorts_listing_by_distance() {
        let source = StaticFacilitySource::new(sample_facilities());
        let busan = LatLng::new(35.1, 129.04);
        let provider = FixedGeolocation::at(busan);

        let mut controller = ViewController::default();
        let count = controller.initialize(&source, &provider).await.unwrap();
        assert_eq!(count, source.len());

        assert_eq!(controller.user_location(), Some(busan));
        assert_eq!(controller.viewport().zoom, LOCAL_ZOOM);

        let listing = controller.listing();
        let distances: Vec<f64> = listing.iter().map(|row| row.distance_km.unwrap()).collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(distances[0] < 50.0);
    }

    #[tokio::test]
    async fn test_location_failure_notice() {
        let mut controller = controller_with(two_facilities());
        let notices = record(&mut controller, "notice");

        let provider = FixedGeolocation::failing(LocationError::Timeout);
        assert!(controller.locate(&provider).await);
        controller.process_events();

        assert_eq!(controller.user_location(), Some(SEOUL));
        assert_eq!(
            notices.lock().unwrap().as_slice(),
            &[MapEvent::Notice(MapNotice::LocationFallback { location: SEOUL })]
        );
    }

    #[cfg(feature = "tokio-runtime")]
    #[tokio::test]
    async fn test_background_requests_only_latest_applies() {
        let mut controller = controller_with(two_facilities());
        let first_spot = LatLng::new(35.1796, 129.0756);
        let second_spot = LatLng::new(37.4563, 126.7052);

        let (first, first_handle) =
            controller.spawn_location_request(Arc::new(FixedGeolocation::at(first_spot)));
        let (second, second_handle) =
            controller.spawn_location_request(Arc::new(FixedGeolocation::at(second_spot)));
        assert!(second > first);
        assert!(controller.is_locating());

        for _ in 0..200 {
            if first_handle.is_finished() && second_handle.is_finished() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        assert_eq!(controller.poll_location_replies(), 1);
        assert_eq!(controller.user_location(), Some(second_spot));
        assert_eq!(controller.viewport().center, second_spot);
        assert!(!controller.is_locating());
    }

    #[tokio::test]
    async fn test_events_follow_each_transition() {
        let mut controller = controller_with(two_facilities());
        let redraws = record(&mut controller, "redrawn");
        let views = record(&mut controller, "viewchanged");

        controller.handle(InputEvent::Resize {
            width: 640,
            height: 480,
        });
        controller.handle(InputEvent::FacilityChosen(FacilityId(1)));
        controller.zoom_to(10);
        controller.pan_to(LatLng::new(37.5, 127.0));
        controller.process_events();

        assert_eq!(redraws.lock().unwrap().len(), 4);
        let views = views.lock().unwrap();
        assert_eq!(views.len(), 3);
        assert_eq!(
            views.last(),
            Some(&MapEvent::ViewChanged {
                center: LatLng::new(37.5, 127.0),
                zoom: 10
            })
        );
    }

    #[tokio::test]
    async fn test_repeated_redraws_are_identical() {
        let mut controller = controller_with(two_facilities());
        controller.location_resolved(LatLng::new(37.55, 126.97));
        let first = controller.surface().clone();

        controller.handle(InputEvent::FilterChanged(CategoryFilter::All));
        assert_eq!(controller.surface(), &first);
    }

    #[tokio::test]
    async fn test_options_from_json_drive_controller() {
        let options = MapOptions::from_json_str(
            r##"{
                "local_zoom": 12,
                "surface_width": 400,
                "surface_height": 300,
                "fallback_location": { "lat": 35.1796, "lng": 129.0756 },
                "style": { "background_color": "#ffffff" }
            }"##,
        )
        .unwrap();

        let mut controller = ViewController::new(options);
        assert_eq!(controller.surface().width(), 400);
        assert_eq!(controller.surface().pixel(1, 1), Some(Color::WHITE.to_rgba()));

        controller.location_failed();
        assert_eq!(controller.viewport().zoom, 12);
        assert_eq!(controller.viewport().center, LatLng::new(35.1796, 129.0756));
    }

    #[tokio::test]
    async fn test_facilities_from_json_feed() {
        let facilities = facilities_from_json(
            r#"[
                { "id": 10, "name": "Harbor Clinic", "type": "clinic",
                  "lat": 35.1, "lng": 129.0, "beds": 12 },
                { "id": 11, "name": "Hill Hospital", "category": "hospital",
                  "lat": 35.2, "lng": 129.1, "departments": ["Emergency", "Surgery"] }
            ]"#,
        )
        .unwrap();
        assert_eq!(facilities[0].capacity, 12);
        assert_eq!(facilities[1].departments.len(), 2);

        let mut controller = controller_with(facilities);
        assert!(controller.select_facility(FacilityId(11)));
        assert_eq!(
            controller.selected_facility().map(|f| f.name.as_str()),
            Some("Hill Hospital")
        );

        let bad = facilities_from_json(
            r#"[{ "id": 1, "name": "x", "type": "clinic", "lat": 91.0, "lng": 0.0 }]"#,
        );
        assert!(matches!(bad, Err(MapError::InvalidCoordinates(_))));
    }

    #[tokio::test]
    async fn test_save_png() {
        let controller = controller_with(two_facilities());
        let path = std::env::temp_dir().join(format!("clinimap-{}.png", std::process::id()));

        controller.surface().save_png(&path).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
        std::fs::remove_file(&path).unwrap();
    }
}
