//! Study areas and their directly-affected zones

use geo_types::{MultiPolygon, Polygon, Rect};

/// An accepted candidate rectangle satisfying all placement constraints.
///
/// Immutable once accepted. Identifiers form a 1-based sequence in
/// acceptance order.
#[derive(Debug, Clone, PartialEq)]
pub struct StudyArea {
    id: u32,
    rect: Rect<f64>,
}

impl StudyArea {
    pub fn new(id: u32, rect: Rect<f64>) -> Self {
        Self { id, rect }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// The axis-aligned extent of the area
    pub fn rect(&self) -> Rect<f64> {
        self.rect
    }

    /// The area as a closed polygon
    pub fn polygon(&self) -> Polygon<f64> {
        self.rect.to_polygon()
    }

    /// Human-readable label used in logs and attribute tables
    pub fn label(&self) -> String {
        format!("Study Area {}", self.id)
    }
}

/// The road-corridor zone derived inside one study area, net of protected
/// land. May be multi-part; references its owning study area by id.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectedZone {
    id: u32,
    area_id: u32,
    geometry: MultiPolygon<f64>,
}

impl AffectedZone {
    pub fn new(id: u32, area_id: u32, geometry: MultiPolygon<f64>) -> Self {
        Self { id, area_id, geometry }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    /// Identifier of the owning study area
    pub fn area_id(&self) -> u32 {
        self.area_id
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Human-readable label used in logs and attribute tables
    pub fn label(&self) -> String {
        format!("Affected Zone {}", self.id)
    }
}
