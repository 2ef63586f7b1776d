//! # Filter System
//!
//! The closed set of filter operations and the catalog of built-in effects.
//!
//! ## Built-in Filters
//!
//! - **Color Clamp**: every component held between 0.2 and 0.9
//! - **Color Controls**: saturation dropped to 0.1
//! - **Photo Effect: Instant / Process / Noir**: fixed film looks
//! - **Sepia Tone**: sepia at intensity 0.7
//!
//! ## Usage
//!
//! ```rust,no_run
//! use snap_filters::{filters::FilterCatalog, imaging::ProcessingContext};
//!
//! let context = ProcessingContext::new();
//! let catalog = FilterCatalog::builtin(&context).expect("built-in filters are available");
//! for filter in &catalog {
//!     println!("{}", filter.metadata().display_name);
//! }
//! ```

pub mod catalog;
pub mod definition;
pub mod traits;

// Operation implementations
pub mod color_clamp;
pub mod color_controls;
pub mod photo_effect;
pub mod sepia;

// Re-exports for convenience
pub use catalog::{default_filters, FilterCatalog, DEFAULT_FILTERS};
pub use definition::{FilterDefinition, FilterKind};
pub use traits::{FilterMetadata, PixelOperation};

pub use color_clamp::ColorClampParams;
pub use color_controls::ColorControlsParams;
pub use photo_effect::PhotoEffect;
pub use sepia::SepiaToneParams;
