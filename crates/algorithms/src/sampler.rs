//! Candidate study-area sampling
//!
//! Bounded rejection sampling: rectangle centers are drawn uniformly from
//! the boundary's bounding box and kept when they pass the placement
//! constraints, until the target count is reached or the attempt budget is
//! exhausted. The generator is seeded, so identical inputs and parameters
//! reproduce the same accepted sequence.

use geo::{BoundingRect, Contains, EuclideanDistance, Intersects};
use geo_types::{Coord, Polygon, Rect};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use ecosite_core::{Error, GeometryStore, Result, StudyArea};

/// Parameters for the sampling stage.
///
/// Lengths are in units of the store's planar frame (metres for UTM).
/// Defaults search for fifteen 20 x 15 km areas within 5 km of protected
/// land, inside a budget of 30 000 attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplerParams {
    /// Number of study areas to search for
    pub target_count: usize,
    /// Rectangle width
    pub rect_width: f64,
    /// Rectangle height
    pub rect_height: f64,
    /// Attempt budget; sampling stops when exhausted
    pub max_attempts: usize,
    /// Maximum allowed distance from a candidate to the exclusion union
    pub max_exclusion_distance: f64,
    /// Seed for the deterministic generator
    pub seed: u64,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            target_count: 15,
            rect_width: 20_000.0,
            rect_height: 15_000.0,
            max_attempts: 30_000,
            max_exclusion_distance: 5_000.0,
            seed: 42,
        }
    }
}

impl SamplerParams {
    /// Reject dimensionless or negative geometry parameters early.
    pub fn validate(&self) -> Result<()> {
        if !(self.rect_width > 0.0) {
            return Err(Error::InvalidParameter {
                name: "rect_width",
                value: self.rect_width.to_string(),
                reason: "must be positive".into(),
            });
        }
        if !(self.rect_height > 0.0) {
            return Err(Error::InvalidParameter {
                name: "rect_height",
                value: self.rect_height.to_string(),
                reason: "must be positive".into(),
            });
        }
        if !(self.max_exclusion_distance >= 0.0) {
            return Err(Error::InvalidParameter {
                name: "max_exclusion_distance",
                value: self.max_exclusion_distance.to_string(),
                reason: "must not be negative".into(),
            });
        }
        Ok(())
    }
}

/// Result of a sampling run.
///
/// Fewer areas than requested is a reportable outcome, not an error;
/// `complete` tells the two cases apart.
#[derive(Debug, Clone)]
pub struct SamplingOutcome {
    /// Accepted areas, in acceptance order (ids 1..)
    pub areas: Vec<StudyArea>,
    /// Attempts consumed, including rejected draws
    pub attempts_used: usize,
    /// Whether the target count was reached within the budget
    pub complete: bool,
}

/// Accepted rectangle in the spatial index.
///
/// Rectangles are axis-aligned, so envelope intersection in the tree is
/// exact rectangle intersection; no refinement step needed.
struct AcceptedRect(Rect<f64>);

impl RTreeObject for AcceptedRect {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.0.min().x, self.0.min().y],
            [self.0.max().x, self.0.max().y],
        )
    }
}

/// Search for up to `target_count` non-overlapping study rectangles.
///
/// Constraints, evaluated in order with short-circuiting:
/// 1. the candidate lies entirely within the boundary;
/// 2. the candidate is not entirely inside the exclusion union;
/// 3. the candidate is within `max_exclusion_distance` of the exclusion union;
/// 4. the candidate intersects the road network;
/// 5. the candidate does not intersect any already-accepted rectangle.
///
/// An empty exclusion union satisfies 2 and 3 vacuously; an empty road
/// network fails 4 for every candidate. Partial overlap with the exclusion
/// union is allowed; only full containment rejects.
pub fn sample_study_areas(
    store: &GeometryStore,
    params: &SamplerParams,
) -> Result<SamplingOutcome> {
    params.validate()?;

    let bounds = store
        .boundary()
        .bounding_rect()
        .ok_or_else(|| Error::DataLoad("boundary geometry has no extent".into()))?;

    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let mut areas: Vec<StudyArea> = Vec::new();
    let mut index: RTree<AcceptedRect> = RTree::new();
    let half_w = params.rect_width / 2.0;
    let half_h = params.rect_height / 2.0;

    let mut attempts = 0;
    while areas.len() < params.target_count && attempts < params.max_attempts {
        attempts += 1;

        // x drawn before y, so a given seed fixes the whole center sequence
        let cx = rng.gen_range(bounds.min().x..=bounds.max().x);
        let cy = rng.gen_range(bounds.min().y..=bounds.max().y);
        let rect = Rect::new(
            Coord { x: cx - half_w, y: cy - half_h },
            Coord { x: cx + half_w, y: cy + half_h },
        );
        let candidate = rect.to_polygon();

        if !store.boundary().contains(&candidate) {
            continue;
        }

        if !store.exclusion().0.is_empty() {
            if store.exclusion().contains(&candidate) {
                continue;
            }
            if distance_to_exclusion(&candidate, store) > params.max_exclusion_distance {
                continue;
            }
        }

        if !candidate.intersects(store.roads()) {
            continue;
        }

        let accepted = AcceptedRect(rect);
        if index
            .locate_in_envelope_intersecting(&accepted.envelope())
            .next()
            .is_some()
        {
            continue;
        }

        index.insert(accepted);
        let area = StudyArea::new(areas.len() as u32 + 1, rect);
        debug!(id = area.id(), attempt = attempts, "study area accepted");
        areas.push(area);
    }

    let complete = areas.len() == params.target_count;
    if complete {
        info!(count = areas.len(), attempts, "sampling complete");
    } else {
        warn!(
            accepted = areas.len(),
            requested = params.target_count,
            attempts,
            "attempt budget exhausted before reaching target count"
        );
    }

    Ok(SamplingOutcome {
        areas,
        attempts_used: attempts,
        complete,
    })
}

/// Minimum distance from the candidate to any part of the exclusion union.
fn distance_to_exclusion(candidate: &Polygon<f64>, store: &GeometryStore) -> f64 {
    store
        .exclusion()
        .0
        .iter()
        .map(|part| candidate.euclidean_distance(part))
        .fold(f64::INFINITY, f64::min)
}
