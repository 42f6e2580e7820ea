//! Affected-zone derivation
//!
//! For each accepted study area: clip the road network to the area, buffer
//! the clipped roads into a corridor, clamp the corridor to the area, and
//! subtract the exclusion union. Areas whose corridor comes out empty are
//! skipped with a logged reason, not failed; invalid boolean-op output is
//! normalized and re-checked before it is returned.

use geo::{BooleanOps, Validation};
use geo_types::{MultiLineString, MultiPolygon};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::maybe_rayon::*;
use crate::vector::{buffer_lines, clip_lines_by_rect, BufferParams};
use ecosite_core::{AffectedZone, Error, Result, StudyArea};

/// Parameters for the zone-derivation stage.
///
/// Lengths are in units of the planar frame; the default is a 500 m road
/// corridor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneParams {
    /// Corridor radius around roads
    pub buffer_radius: f64,
    /// Arc approximation used when buffering
    pub buffer_segments: usize,
}

impl Default for ZoneParams {
    fn default() -> Self {
        Self {
            buffer_radius: 500.0,
            buffer_segments: 16,
        }
    }
}

impl ZoneParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.buffer_radius > 0.0) {
            return Err(Error::InvalidParameter {
                name: "buffer_radius",
                value: self.buffer_radius.to_string(),
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

/// Outcome of a derivation batch.
///
/// Skipped and failed areas are identified by study-area id; neither affects
/// sibling areas.
#[derive(Debug, Clone, Default)]
pub struct ZoneReport {
    /// Derived zones in study-area order, with fresh ids 1..
    pub zones: Vec<AffectedZone>,
    /// Areas with no derivable zone (empty clip or empty net corridor)
    pub skipped_area_ids: Vec<u32>,
    /// Areas whose zone geometry could not be repaired
    pub failed_area_ids: Vec<u32>,
}

enum Derivation {
    Zone(MultiPolygon<f64>),
    Empty(&'static str),
    Unrepairable,
}

/// Derive one corridor geometry for `area`, or report why there is none.
fn derive_one(
    area: &StudyArea,
    roads: &MultiLineString<f64>,
    exclusion: &MultiPolygon<f64>,
    params: &ZoneParams,
) -> Derivation {
    let clipped = clip_lines_by_rect(roads, area.rect());
    if clipped.0.is_empty() {
        return Derivation::Empty("no roads inside the area");
    }

    let corridor = buffer_lines(
        &clipped,
        &BufferParams {
            distance: params.buffer_radius,
            segments: params.buffer_segments,
        },
    );

    let clamped = corridor.intersection(&area.polygon());
    let net = if exclusion.0.is_empty() {
        clamped
    } else {
        clamped.difference(exclusion)
    };

    if net.0.is_empty() {
        return Derivation::Empty("corridor empty after exclusion removal");
    }

    match normalize(net) {
        Some(geometry) => Derivation::Zone(geometry),
        None => Derivation::Unrepairable,
    }
}

/// Normalize boolean-op output.
///
/// A self-union resolves the self-intersections floating point can leave
/// behind, the way a zero-distance buffer does; the result is re-checked
/// and `None` means the geometry stayed invalid.
fn normalize(geometry: MultiPolygon<f64>) -> Option<MultiPolygon<f64>> {
    if geometry.is_valid() {
        return Some(geometry);
    }
    let repaired = geometry.union(&MultiPolygon::new(Vec::new()));
    repaired.is_valid().then_some(repaired)
}

/// Derive affected zones for every study area, in identifier order.
///
/// Zone identifiers are a fresh 1-based sequence over the derived zones,
/// independent of study-area identifiers; each zone carries its owning
/// area's id. Per-area derivation is independent and fans out across cores
/// when the `parallel` feature is enabled; results are identical either way.
pub fn derive_affected_zones(
    areas: &[StudyArea],
    roads: &MultiLineString<f64>,
    exclusion: &MultiPolygon<f64>,
    params: &ZoneParams,
) -> Result<ZoneReport> {
    params.validate()?;

    let outcomes: Vec<Derivation> = areas
        .into_par_iter()
        .map(|area| derive_one(area, roads, exclusion, params))
        .collect();

    let mut report = ZoneReport::default();
    for (area, outcome) in areas.iter().zip(outcomes) {
        match outcome {
            Derivation::Zone(geometry) => {
                let id = report.zones.len() as u32 + 1;
                debug!(zone = id, area = area.id(), "affected zone derived");
                report.zones.push(AffectedZone::new(id, area.id(), geometry));
            }
            Derivation::Empty(reason) => {
                warn!(area = area.id(), reason, "no affected zone derived");
                report.skipped_area_ids.push(area.id());
            }
            Derivation::Unrepairable => {
                let err = Error::GeometryRepair { area_id: area.id() };
                warn!(area = area.id(), error = %err, "affected zone dropped");
                report.failed_area_ids.push(area.id());
            }
        }
    }

    Ok(report)
}
