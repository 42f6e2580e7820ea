//! Site-selection demo: full pipeline over a synthetic region
//!
//! Builds a 100 km square administrative boundary with a road cross and a
//! protected block (in geographic coordinates, as layers usually arrive),
//! normalizes everything into UTM, samples study areas and derives the
//! road-corridor affected zones, then prints the run summary.
//!
//! Run:
//!   cargo run -p ecosite-algorithms --example site_selection_demo

use geo::Area;
use geo_types::{Coord, Geometry, LineString, Rect};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ecosite_algorithms::pipeline::{run_pipeline, PipelineParams};
use ecosite_algorithms::sampler::SamplerParams;
use ecosite_algorithms::zones::ZoneParams;
use ecosite_core::{GeometryStore, VectorLayer, CRS};

fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    // --- 1. Raw layers, in the geographic frame they would be shipped in ---
    let geographic = CRS::sirgas2000();

    // Roughly 1° square block in Minas Gerais; ~100 km on a side once projected
    let boundary = VectorLayer::from_geometries(
        vec![Geometry::Rect(Rect::new(
            Coord { x: -44.9, y: -20.4 },
            Coord { x: -43.9, y: -19.4 },
        ))],
        geographic.clone(),
    );

    let protected = VectorLayer::from_geometries(
        vec![Geometry::Rect(Rect::new(
            Coord { x: -44.55, y: -20.05 },
            Coord { x: -44.35, y: -19.85 },
        ))],
        geographic.clone(),
    );

    let roads = VectorLayer::from_geometries(
        vec![
            Geometry::LineString(LineString::from(vec![(-44.6, -20.4), (-44.6, -19.4)])),
            Geometry::LineString(LineString::from(vec![(-44.9, -19.9), (-43.9, -19.9)])),
        ],
        geographic.clone(),
    );

    // --- 2. Normalize into the planar frame ---
    let store = GeometryStore::load(&boundary, &protected, &roads, &CRS::utm(23, false))
        .expect("failed to normalize base layers");

    // --- 3. Run the pipeline ---
    let params = PipelineParams {
        sampler: SamplerParams {
            target_count: 6,
            rect_width: 15_000.0,
            rect_height: 10_000.0,
            max_attempts: 30_000,
            max_exclusion_distance: 25_000.0,
            seed: 42,
        },
        zones: ZoneParams {
            buffer_radius: 500.0,
            buffer_segments: 32,
        },
    };

    let output = run_pipeline(&store, &params).expect("pipeline run failed");

    // --- 4. Report ---
    println!(
        "\nAccepted {}/{} study areas in {} attempts",
        output.summary.accepted, output.summary.requested, output.summary.attempts_used
    );
    for area in &output.areas {
        let c = area.rect().center();
        println!(
            "  {:<14}  center ({:>9.0}, {:>10.0})  {:>6.1} km²",
            area.label(),
            c.x,
            c.y,
            area.polygon().unsigned_area() / 1.0e6
        );
    }

    println!("\nDerived {} affected zones", output.zones.len());
    for zone in &output.zones {
        println!(
            "  {:<16}  area {:>2}  {:>6.1} km²",
            zone.label(),
            zone.area_id(),
            zone.geometry().unsigned_area() / 1.0e6
        );
    }

    if !output.summary.skipped_zone_area_ids.is_empty() {
        println!(
            "\nSkipped areas (no derivable zone): {:?}",
            output.summary.skipped_zone_area_ids
        );
    }
    if !output.summary.repair_failed_area_ids.is_empty() {
        println!(
            "Dropped areas (unrepairable zone geometry): {:?}",
            output.summary.repair_failed_area_ids
        );
    }
}
