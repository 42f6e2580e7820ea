//! End-to-end pipeline: sampling followed by zone derivation
//!
//! Produces the two ordered collections (study areas, affected zones) and a
//! run summary the caller can persist or report. Persistence and
//! reprojection back to a geographic frame are the caller's concern.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::sampler::{sample_study_areas, SamplerParams};
use crate::zones::{derive_affected_zones, ZoneParams};
use ecosite_core::{AffectedZone, Algorithm, Error, GeometryStore, Result, StudyArea};

/// Parameter block for a full run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineParams {
    pub sampler: SamplerParams,
    pub zones: ZoneParams,
}

/// Accounting for one run, reported alongside the output collections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Target study-area count
    pub requested: usize,
    /// Study areas actually accepted
    pub accepted: usize,
    /// Sampling attempts consumed
    pub attempts_used: usize,
    /// Areas with no derivable zone (clip or subtraction left nothing)
    pub skipped_zone_area_ids: Vec<u32>,
    /// Areas whose zone geometry could not be repaired
    pub repair_failed_area_ids: Vec<u32>,
}

impl RunSummary {
    /// True when the requested study-area count was reached.
    pub fn complete(&self) -> bool {
        self.accepted == self.requested
    }
}

/// Output of a full run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Accepted study areas in acceptance order
    pub areas: Vec<StudyArea>,
    /// Derived zones in study-area order
    pub zones: Vec<AffectedZone>,
    pub summary: RunSummary,
}

/// Run sampling and zone derivation against normalized base layers.
pub fn run_pipeline(store: &GeometryStore, params: &PipelineParams) -> Result<PipelineOutput> {
    let sampling = sample_study_areas(store, &params.sampler)?;
    let report =
        derive_affected_zones(&sampling.areas, store.roads(), store.exclusion(), &params.zones)?;

    let summary = RunSummary {
        requested: params.sampler.target_count,
        accepted: sampling.areas.len(),
        attempts_used: sampling.attempts_used,
        skipped_zone_area_ids: report.skipped_area_ids,
        repair_failed_area_ids: report.failed_area_ids,
    };

    info!(
        requested = summary.requested,
        accepted = summary.accepted,
        attempts = summary.attempts_used,
        zones = report.zones.len(),
        "pipeline run finished"
    );

    Ok(PipelineOutput {
        areas: sampling.areas,
        zones: report.zones,
        summary,
    })
}

/// The full pipeline as an `Algorithm`.
#[derive(Debug, Clone, Default)]
pub struct SiteSelection;

impl Algorithm for SiteSelection {
    type Input = GeometryStore;
    type Output = PipelineOutput;
    type Params = PipelineParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "SiteSelection"
    }

    fn description(&self) -> &'static str {
        "Sample non-overlapping study rectangles and derive road-corridor affected zones"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        run_pipeline(&input, &params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosite_core::{VectorLayer, CRS};
    use geo_types::{Coord, Geometry, LineString, Rect};

    fn planar() -> CRS {
        CRS::utm(23, false)
    }

    fn store() -> GeometryStore {
        let boundary = VectorLayer::from_geometries(
            vec![Geometry::Rect(Rect::new(
                Coord { x: 0.0, y: 0.0 },
                Coord { x: 100_000.0, y: 100_000.0 },
            ))],
            planar(),
        );
        let protected = VectorLayer::from_geometries(
            vec![Geometry::Rect(Rect::new(
                Coord { x: 35_000.0, y: 35_000.0 },
                Coord { x: 55_000.0, y: 55_000.0 },
            ))],
            planar(),
        );
        let roads = VectorLayer::from_geometries(
            vec![
                Geometry::LineString(LineString::from(vec![
                    (30_000.0, 0.0),
                    (30_000.0, 100_000.0),
                ])),
                Geometry::LineString(LineString::from(vec![
                    (0.0, 30_000.0),
                    (100_000.0, 30_000.0),
                ])),
            ],
            planar(),
        );
        GeometryStore::load(&boundary, &protected, &roads, &planar()).unwrap()
    }

    fn params() -> PipelineParams {
        PipelineParams {
            sampler: SamplerParams {
                target_count: 2,
                rect_width: 10_000.0,
                rect_height: 8_000.0,
                max_attempts: 20_000,
                max_exclusion_distance: 20_000.0,
                seed: 42,
            },
            zones: ZoneParams::default(),
        }
    }

    #[test]
    fn test_run_produces_consistent_summary() {
        let store = store();
        let output = run_pipeline(&store, &params()).unwrap();

        assert_eq!(output.summary.requested, 2);
        assert_eq!(output.summary.accepted, output.areas.len());
        assert!(output.summary.attempts_used >= output.areas.len());
        assert_eq!(
            output.zones.len() + output.summary.skipped_zone_area_ids.len()
                + output.summary.repair_failed_area_ids.len(),
            output.areas.len()
        );
        // Every zone points at an existing area
        for zone in &output.zones {
            assert!(output.areas.iter().any(|a| a.id() == zone.area_id()));
        }
    }

    #[test]
    fn test_algorithm_wrapper() {
        let algo = SiteSelection;
        assert_eq!(algo.name(), "SiteSelection");

        let output = algo.execute(store(), params()).unwrap();
        assert_eq!(output.summary.requested, 2);
    }
}
