//! # EcoSite Algorithms
//!
//! Analysis stages for the EcoSite study-area pipeline.
//!
//! ## Stages
//!
//! - **sampler**: bounded rejection sampling of candidate study rectangles
//! - **zones**: derivation of directly-affected zones from buffered roads
//! - **vector**: clipping and buffering primitives shared by the stages
//! - **pipeline**: end-to-end orchestration and run summary

pub mod maybe_rayon;
pub mod pipeline;
pub mod sampler;
pub mod vector;
pub mod zones;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::pipeline::{
        run_pipeline, PipelineOutput, PipelineParams, RunSummary, SiteSelection,
    };
    pub use crate::sampler::{sample_study_areas, SamplerParams, SamplingOutcome};
    pub use crate::vector::{buffer_lines, clip_lines_by_rect, BufferParams};
    pub use crate::zones::{derive_affected_zones, ZoneParams, ZoneReport};
    pub use ecosite_core::prelude::*;
}
