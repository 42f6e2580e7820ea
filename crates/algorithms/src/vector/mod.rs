//! Vector operations shared by the sampling and zone-derivation stages
//!
//! - Clip: Cohen-Sutherland clipping of line work to an axis-aligned rectangle
//! - Buffer: Euclidean offset corridors around line work

mod buffer;
mod clip;

pub use buffer::{buffer_lines, BufferParams};
pub use clip::clip_lines_by_rect;
