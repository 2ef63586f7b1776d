//! # Imaging Module
//!
//! Image types flowing through the pipeline and the processing context filters run on.

pub mod context;
pub mod types;

pub use context::{
    CanvasLayout, ProcessingContext, WorkingSpace, DEFAULT_TILE_ALIGNMENT, MAX_CANVAS_BYTES,
    MAX_TILE_ALIGNMENT,
};
pub use types::{Extent, RenderedImage, SourceImage};
