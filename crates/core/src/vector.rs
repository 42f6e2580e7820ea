//! Vector layers: geometry collections tagged with their CRS

use geo_types::Geometry;

use crate::crs::CRS;

/// An ordered collection of geometries in a common coordinate reference
/// system: the in-memory analogue of one layer of a geospatial package.
///
/// The pipeline consumes three of these: the administrative boundary, the
/// protected-area set and the road network.
#[derive(Debug, Clone)]
pub struct VectorLayer {
    geometries: Vec<Geometry<f64>>,
    crs: CRS,
}

impl VectorLayer {
    /// Create an empty layer in the given CRS
    pub fn new(crs: CRS) -> Self {
        Self {
            geometries: Vec::new(),
            crs,
        }
    }

    /// Create a layer from existing geometries
    pub fn from_geometries(geometries: Vec<Geometry<f64>>, crs: CRS) -> Self {
        Self { geometries, crs }
    }

    /// Append a geometry
    pub fn push(&mut self, geometry: Geometry<f64>) {
        self.geometries.push(geometry);
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry<f64>> {
        self.geometries.iter()
    }

    /// The CRS the geometries are expressed in
    pub fn crs(&self) -> &CRS {
        &self.crs
    }
}

impl IntoIterator for VectorLayer {
    type Item = Geometry<f64>;
    type IntoIter = std::vec::IntoIter<Geometry<f64>>;

    fn into_iter(self) -> Self::IntoIter {
        self.geometries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Point;

    #[test]
    fn test_layer_push_and_len() {
        let mut layer = VectorLayer::new(CRS::wgs84());
        assert!(layer.is_empty());

        layer.push(Geometry::Point(Point::new(1.0, 2.0)));
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.crs(), &CRS::wgs84());
    }

    #[test]
    fn test_layer_from_geometries() {
        let layer = VectorLayer::from_geometries(
            vec![
                Geometry::Point(Point::new(0.0, 0.0)),
                Geometry::Point(Point::new(1.0, 1.0)),
            ],
            CRS::sirgas2000(),
        );
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.iter().count(), 2);
    }
}
