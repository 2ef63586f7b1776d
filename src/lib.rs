//! # snap-filters
//!
//! Render a photo through a catalog of visual filters so the user can pick one.
//!
//! Each filter produces its own image with exactly the photo's dimensions. Renders are
//! independent of one another and of earlier runs: the same photo and filter always give
//! the same pixels.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snap_filters::{imaging::SourceImage, render::Renderer};
//!
//! # fn main() -> anyhow::Result<()> {
//! let source = SourceImage::open("photo.jpg")?;
//! let renderer = Renderer::default();
//!
//! let batch = renderer.render_defaults(&source)?;
//! for (index, result) in batch.iter().enumerate() {
//!     match result {
//!         Ok(image) => image.save_png(format!("preview_{}.png", index))?,
//!         Err(e) => eprintln!("preview {} unavailable: {}", index, e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`filters`] - Filter definitions, operations and the built-in catalog
//! - [`imaging`] - Source/rendered image types and the processing context
//! - [`render`] - The renderer and batch results
//! - [`config`] - Configuration management
//!
//! ## Custom Filter Lists
//!
//! A catalog can be built from any list of definitions. Construction checks every entry
//! against the processing context before anything is rendered:
//!
//! ```rust,no_run
//! use snap_filters::filters::{FilterCatalog, FilterDefinition, SepiaToneParams};
//! use snap_filters::imaging::ProcessingContext;
//!
//! let context = ProcessingContext::new();
//! let catalog = FilterCatalog::from_definitions(
//!     &context,
//!     vec![
//!         FilterDefinition::PhotoEffectNoir,
//!         FilterDefinition::SepiaTone(SepiaToneParams::new(0.3)),
//!     ],
//! );
//! assert!(catalog.is_ok());
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod imaging;
pub mod render;

// Re-export commonly used types for convenience
pub use crate::{
    config::Config,
    error::{ConfigurationError, PipelineError, RenderError, Result},
    filters::{default_filters, FilterCatalog, FilterDefinition, FilterKind},
    imaging::{ProcessingContext, RenderedImage, SourceImage},
    render::{RenderBatch, Renderer},
};
