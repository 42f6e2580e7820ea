//! # EcoSite Core
//!
//! Core types and geometry normalization for the EcoSite study-area pipeline.
//!
//! This crate provides:
//! - `CRS`: Coordinate Reference System handling and planar reprojection
//! - `VectorLayer`: geometry collections tagged with the CRS they live in
//! - `GeometryStore`: the normalized base layers of a pipeline run
//! - `StudyArea` / `AffectedZone`: the entities the pipeline produces
//! - Algorithm traits for consistent API

pub mod crs;
pub mod error;
pub mod site;
pub mod store;
pub mod vector;

pub use crs::{CrsTransform, CRS};
pub use error::{Error, Result};
pub use site::{AffectedZone, StudyArea};
pub use store::GeometryStore;
pub use vector::VectorLayer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::{CrsTransform, CRS};
    pub use crate::error::{Error, Result};
    pub use crate::site::{AffectedZone, StudyArea};
    pub use crate::store::GeometryStore;
    pub use crate::vector::VectorLayer;
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in EcoSite.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
