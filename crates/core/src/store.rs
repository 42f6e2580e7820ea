//! Normalized base layers for a pipeline run
//!
//! Loads the administrative boundary, the protected-area set and the road
//! network into one planar frame: the boundary as a (possibly multi-part)
//! polygon, the protected areas dissolved into a single union, the roads
//! flattened into a single multi-line geometry.

use geo::BooleanOps;
use geo_types::{Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use tracing::{debug, info};

use crate::crs::{CrsTransform, Projection, CRS};
use crate::error::{Error, Result};
use crate::vector::VectorLayer;

/// The three normalized base geometries of a run, all in a common planar
/// frame. Read-only after construction.
#[derive(Debug, Clone)]
pub struct GeometryStore {
    boundary: MultiPolygon<f64>,
    exclusion: MultiPolygon<f64>,
    roads: MultiLineString<f64>,
    crs: CRS,
}

impl GeometryStore {
    /// Normalize the three raw layers into the planar frame `target`.
    ///
    /// The boundary must contain polygonal geometry; an empty protected-area
    /// or road layer is valid and propagates as an empty geometry.
    pub fn load(
        boundary: &VectorLayer,
        protected: &VectorLayer,
        roads: &VectorLayer,
        target: &CRS,
    ) -> Result<Self> {
        if !Projection::from_crs(target)?.is_planar() {
            return Err(Error::InvalidParameter {
                name: "target_crs",
                value: target.identifier(),
                reason: "target frame must be planar".into(),
            });
        }

        let boundary_parts = reproject_polygons(boundary, target)?;
        if boundary_parts.is_empty() {
            return Err(Error::DataLoad(
                "boundary layer contains no polygonal geometry".into(),
            ));
        }
        let boundary = MultiPolygon::new(boundary_parts);

        let exclusion = dissolve(reproject_polygons(protected, target)?);
        let roads = MultiLineString::new(reproject_lines(roads, target)?);

        info!(
            boundary_parts = boundary.0.len(),
            exclusion_parts = exclusion.0.len(),
            road_parts = roads.0.len(),
            crs = %target,
            "base layers normalized"
        );

        Ok(Self {
            boundary,
            exclusion,
            roads,
            crs: target.clone(),
        })
    }

    /// The administrative boundary constraining all sampling
    pub fn boundary(&self) -> &MultiPolygon<f64> {
        &self.boundary
    }

    /// Dissolved union of all protected areas (may be empty)
    pub fn exclusion(&self) -> &MultiPolygon<f64> {
        &self.exclusion
    }

    /// Dissolved road network (may be empty)
    pub fn roads(&self) -> &MultiLineString<f64> {
        &self.roads
    }

    /// The planar frame everything is expressed in
    pub fn crs(&self) -> &CRS {
        &self.crs
    }
}

/// Collect the polygonal parts of a layer, reprojected into `target`.
fn reproject_polygons(layer: &VectorLayer, target: &CRS) -> Result<Vec<Polygon<f64>>> {
    let tf = CrsTransform::new(layer.crs(), target)?;
    let mut parts = Vec::new();
    for geometry in layer.iter() {
        match geometry {
            Geometry::Polygon(p) => parts.push(tf.apply(p)),
            Geometry::MultiPolygon(mp) => parts.extend(tf.apply(mp).0),
            Geometry::Rect(r) => parts.push(tf.apply(&r.to_polygon())),
            other => debug!(kind = kind_name(other), "skipping non-polygonal geometry"),
        }
    }
    Ok(parts)
}

/// Collect the linear parts of a layer, reprojected into `target`.
fn reproject_lines(layer: &VectorLayer, target: &CRS) -> Result<Vec<LineString<f64>>> {
    let tf = CrsTransform::new(layer.crs(), target)?;
    let mut parts = Vec::new();
    for geometry in layer.iter() {
        match geometry {
            Geometry::LineString(ls) => parts.push(tf.apply(ls)),
            Geometry::MultiLineString(mls) => parts.extend(tf.apply(mls).0),
            Geometry::Line(l) => parts.push(tf.apply(&LineString::from(*l))),
            other => debug!(kind = kind_name(other), "skipping non-linear geometry"),
        }
    }
    Ok(parts)
}

/// Dissolve polygons into a single union. Empty input stays empty.
fn dissolve(parts: Vec<Polygon<f64>>) -> MultiPolygon<f64> {
    parts
        .into_iter()
        .fold(MultiPolygon::new(Vec::new()), |acc, p| {
            if acc.0.is_empty() {
                MultiPolygon::new(vec![p])
            } else {
                acc.union(&p)
            }
        })
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "point",
        Geometry::Line(_) => "line",
        Geometry::LineString(_) => "linestring",
        Geometry::Polygon(_) => "polygon",
        Geometry::MultiPoint(_) => "multipoint",
        Geometry::MultiLineString(_) => "multilinestring",
        Geometry::MultiPolygon(_) => "multipolygon",
        Geometry::GeometryCollection(_) => "geometrycollection",
        Geometry::Rect(_) => "rect",
        Geometry::Triangle(_) => "triangle",
    }
}
