//! # Image Renderer
//!
//! Applies filter definitions to a source image, one output per filter, each cropped to
//! the source's pixel extent.

pub mod renderer;

// Re-exports for convenience
pub use renderer::{RenderBatch, RenderResult, Renderer};
