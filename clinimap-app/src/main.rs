mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use clinimap::{
    data::{sample::sample_facilities, StaticFacilitySource},
    prelude::*,
    traits::kakao_directions_url,
};
use std::sync::Arc;

use crate::cli::Args;

/// Prints the directions link instead of opening a browser
struct PrintHandoff;

impl NavigationHandoff for PrintHandoff {
    fn open_directions(&self, facility_name: &str, lat: f64, lng: f64) {
        println!("directions: {}", kakao_directions_url(facility_name, lat, lng));
    }
}

/// Headless facility map renderer
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    log::info!("clinimap-app v{} starting", env!("CARGO_PKG_VERSION"));
    run(args).await
}

fn init_logging(verbose: bool) {
    clinimap::init_logging(if verbose { "debug" } else { "info" });
}

async fn run(args: Args) -> Result<()> {
    let mut options = match &args.config {
        Some(path) => MapOptions::from_json_file(path)
            .with_context(|| format!("reading map options from {}", path.display()))?,
        None => MapOptions::default(),
    };
    if let Some(width) = args.width {
        options.surface_width = width;
    }
    if let Some(height) = args.height {
        options.surface_height = height;
    }
    options.validate().context("invalid map options")?;

    let source = match &args.facilities {
        Some(path) => StaticFacilitySource::from_json_file(path)
            .with_context(|| format!("loading facilities from {}", path.display()))?,
        None => StaticFacilitySource::new(sample_facilities()),
    };

    let mut controller = ViewController::new(options);

    let count = match (args.locate, args.locate_fail) {
        (Some((lat, lng)), _) => {
            let provider = FixedGeolocation::at(LatLng::new(lat, lng));
            controller.initialize(&source, &provider).await?
        }
        (None, true) => {
            let provider = FixedGeolocation::failing(LocationError::PermissionDenied);
            controller.initialize(&source, &provider).await?
        }
        (None, false) => controller.load_from(&source).await?,
    };
    log::info!("{} facilities available", count);
    print_notices(&mut controller);

    let filter: CategoryFilter = args.filter.parse().unwrap_or_default();
    controller.handle(InputEvent::FilterChanged(filter));

    for (x, y) in &args.click {
        let position = Point::new(*x, *y);
        if controller.handle(InputEvent::Click { position }) == EventHandled::NotHandled {
            log::info!("click at {}, {} hit no facility", x, y);
        }
    }
    if let Some(id) = args.select {
        controller.handle(InputEvent::FacilityChosen(FacilityId(id)));
    }

    print_listing(&controller);

    if let Some(facility) = controller.selected_facility().map(Arc::clone) {
        print_details(&facility);
    }
    if args.directions {
        controller.request_directions(&PrintHandoff);
        print_notices(&mut controller);
    }

    controller
        .surface()
        .save_png(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    println!(
        "wrote {}x{} map to {}",
        controller.surface().width(),
        controller.surface().height(),
        args.out.display()
    );
    Ok(())
}

fn print_notices(controller: &mut ViewController) {
    for line in drain_notices(controller) {
        println!("{}", line);
    }
}

/// Delivers queued events and returns the user-facing notices among them
fn drain_notices(controller: &mut ViewController) -> Vec<String> {
    controller
        .process_events()
        .iter()
        .filter_map(|event| match event {
            MapEvent::Notice(notice) => Some(notice_message(notice)),
            _ => None,
        })
        .collect()
}

fn notice_message(notice: &MapNotice) -> String {
    match notice {
        MapNotice::LocationFound { location } => {
            format!("located at {:.4}, {:.4}", location.lat, location.lng)
        }
        MapNotice::LocationFallback { location } => format!(
            "location unavailable, using {:.4}, {:.4}",
            location.lat, location.lng
        ),
        MapNotice::LocationRequired => "directions need your location first".to_string(),
    }
}

fn print_listing(controller: &ViewController) {
    let rows = controller.listing();
    println!("{} facilities ({})", rows.len(), controller.filter());
    for row in rows {
        match row.distance_km {
            Some(distance) => println!(
                "  [{}] {} ({}) {:.1} km",
                row.facility.id, row.facility.name, row.facility.category, distance
            ),
            None => println!(
                "  [{}] {} ({})",
                row.facility.id, row.facility.name, row.facility.category
            ),
        }
    }
}

fn print_details(facility: &Facility) {
    println!("selected: {}", facility.name);
    if !facility.address.is_empty() {
        println!("  address: {}", facility.address);
    }
    if facility.capacity > 0 {
        println!("  beds: {}", facility.capacity);
    }
    if !facility.phone.is_empty() {
        println!("  phone: {}", facility.phone);
    }
    if !facility.departments.is_empty() {
        println!("  departments: {}", facility.departments_summary(3));
    }
}
