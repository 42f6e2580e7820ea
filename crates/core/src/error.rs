//! Error types for EcoSite

use thiserror::Error;

/// Main error type for EcoSite operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("data load error: {0}")]
    DataLoad(String),

    #[error("unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("geometry repair failed for study area {area_id}")]
    GeometryRepair { area_id: u32 },
}

/// Result type alias for EcoSite operations
pub type Result<T> = std::result::Result<T, Error>;
