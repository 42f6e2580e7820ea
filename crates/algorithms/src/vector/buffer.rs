//! Buffer operations
//!
//! Euclidean offset corridors around line work. Each segment contributes a
//! rectangle and each vertex a disc; the boolean union of all pieces
//! approximates the true offset with round joins and caps. Circular arcs
//! are approximated with a fixed number of segments.

use geo::BooleanOps;
use geo_types::{Coord, LineString, MultiLineString, MultiPolygon, Polygon};
use std::f64::consts::PI;

/// Parameters for buffer operations
#[derive(Debug, Clone)]
pub struct BufferParams {
    /// Offset distance in CRS units
    pub distance: f64,
    /// Number of segments to approximate circular arcs (default: 16)
    pub segments: usize,
}

impl Default for BufferParams {
    fn default() -> Self {
        Self {
            distance: 1.0,
            segments: 16,
        }
    }
}

/// Disc polygon approximating a circle around `center`.
fn disc(center: Coord<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let n = segments.max(4);
    let mut coords = Vec::with_capacity(n + 1);
    for i in 0..n {
        let angle = 2.0 * PI * i as f64 / n as f64;
        coords.push((center.x + radius * angle.cos(), center.y + radius * angle.sin()));
    }
    // Close the ring
    coords.push(coords[0]);

    Polygon::new(LineString::from(coords), vec![])
}

/// Rectangle swept along one segment, offset `radius` to each side.
///
/// Returns `None` for degenerate (zero-length) segments.
fn segment_quad(a: Coord<f64>, b: Coord<f64>, radius: f64) -> Option<Polygon<f64>> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len < f64::EPSILON {
        return None;
    }

    // Unit normal scaled to the offset distance
    let nx = -dy / len * radius;
    let ny = dx / len * radius;

    Some(Polygon::new(
        LineString::from(vec![
            (a.x + nx, a.y + ny),
            (b.x + nx, b.y + ny),
            (b.x - nx, b.y - ny),
            (a.x - nx, a.y - ny),
            (a.x + nx, a.y + ny),
        ]),
        vec![],
    ))
}

/// Buffer line work by `params.distance`, producing a corridor polygon.
///
/// Returns an empty geometry for empty input or a non-positive distance.
pub fn buffer_lines(lines: &MultiLineString<f64>, params: &BufferParams) -> MultiPolygon<f64> {
    if params.distance <= 0.0 {
        return MultiPolygon::new(Vec::new());
    }

    let mut corridor = MultiPolygon::new(Vec::new());
    for line in &lines.0 {
        for window in line.0.windows(2) {
            if let Some(quad) = segment_quad(window[0], window[1], params.distance) {
                corridor = merge(corridor, quad);
            }
        }
        for &vertex in &line.0 {
            corridor = merge(corridor, disc(vertex, params.distance, params.segments));
        }
    }
    corridor
}

fn merge(acc: MultiPolygon<f64>, piece: Polygon<f64>) -> MultiPolygon<f64> {
    if acc.0.is_empty() {
        MultiPolygon::new(vec![piece])
    } else {
        acc.union(&piece)
    }
}
