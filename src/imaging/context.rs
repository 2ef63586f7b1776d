use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::ContextConfig,
    error::ConfigurationError,
    filters::FilterKind,
    imaging::Extent,
};

/// Default tile size the working canvas is rounded up to
pub const DEFAULT_TILE_ALIGNMENT: u32 = 8;

/// Largest accepted tile alignment
pub const MAX_TILE_ALIGNMENT: u32 = 1024;

/// Largest working canvas a render may allocate, in bytes
pub const MAX_CANVAS_BYTES: u64 = 1 << 30;

/// Color encoding the filter operations compute in
///
/// Sources and rendered images are always sRGB-encoded; the renderer converts the working
/// canvas into this space before running an operation and back afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkingSpace {
    /// Operate directly on sRGB-encoded values
    #[default]
    Srgb,
    /// Operate on linear-light values
    Linear,
}

impl WorkingSpace {
    /// Convert an sRGB-encoded pixel into this space. Alpha is never touched.
    pub fn encode(self, pixel: [f32; 4]) -> [f32; 4] {
        match self {
            Self::Srgb => pixel,
            Self::Linear => [
                srgb_to_linear(pixel[0]),
                srgb_to_linear(pixel[1]),
                srgb_to_linear(pixel[2]),
                pixel[3],
            ],
        }
    }

    /// Convert a pixel in this space back to sRGB encoding
    pub fn decode(self, pixel: [f32; 4]) -> [f32; 4] {
        match self {
            Self::Srgb => pixel,
            Self::Linear => [
                linear_to_srgb(pixel[0]),
                linear_to_srgb(pixel[1]),
                linear_to_srgb(pixel[2]),
                pixel[3],
            ],
        }
    }
}

fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.04045 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(value: f32) -> f32 {
    if value <= 0.003_130_8 {
        value * 12.92
    } else {
        1.055 * value.powf(1.0 / 2.4) - 0.055
    }
}

/// Where the source sits inside the tile-aligned working canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub canvas: Extent,
    pub source: Extent,
}

/// The backend filter operations run on
///
/// Knows which operations it provides, the working color space and the tile alignment of
/// its canvases. Renders only read it, so one context can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingContext {
    working_space: WorkingSpace,
    tile_alignment: u32,
    operations: BTreeSet<FilterKind>,
}

impl ProcessingContext {
    /// A context providing every built-in operation
    pub fn new() -> Self {
        Self::with_operations(FilterKind::ALL)
    }

    /// A context providing only the given operations
    pub fn with_operations<I>(operations: I) -> Self
    where
        I: IntoIterator<Item = FilterKind>,
    {
        Self {
            working_space: WorkingSpace::default(),
            tile_alignment: DEFAULT_TILE_ALIGNMENT,
            operations: operations.into_iter().collect(),
        }
    }

    /// Build a context from the `[context]` configuration section
    pub fn from_config(config: &ContextConfig) -> Result<Self, ConfigurationError> {
        if !(1..=MAX_TILE_ALIGNMENT).contains(&config.tile_alignment) {
            return Err(ConfigurationError::InvalidValue {
                key: "context.tile_alignment".to_string(),
                value: config.tile_alignment.to_string(),
            });
        }

        let mut context = Self::new()
            .with_working_space(config.working_space)
            .with_tile_alignment(config.tile_alignment);

        for name in &config.disabled_operations {
            let kind: FilterKind = name.parse()?;
            debug!("Disabling operation {}", kind);
            context = context.without_operation(kind);
        }

        Ok(context)
    }

    pub fn with_working_space(mut self, working_space: WorkingSpace) -> Self {
        self.working_space = working_space;
        self
    }

    /// Set the tile alignment, clamped into `1..=MAX_TILE_ALIGNMENT`
    pub fn with_tile_alignment(mut self, alignment: u32) -> Self {
        self.tile_alignment = alignment.clamp(1, MAX_TILE_ALIGNMENT);
        self
    }

    /// Remove an operation from the context
    pub fn without_operation(mut self, kind: FilterKind) -> Self {
        self.operations.remove(&kind);
        self
    }

    /// Check if the context provides an operation
    pub fn supports(&self, kind: FilterKind) -> bool {
        self.operations.contains(&kind)
    }

    /// All operations this context provides
    pub fn operations(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.operations.iter().copied()
    }

    pub fn working_space(&self) -> WorkingSpace {
        self.working_space
    }

    pub fn tile_alignment(&self) -> u32 {
        self.tile_alignment
    }

    /// Lay out the working canvas for a source of the given extent
    ///
    /// The canvas is the source size rounded up to the tile alignment with the source
    /// centered in it. Returns `None` when the canvas would exceed `MAX_CANVAS_BYTES`.
    pub fn canvas_layout(&self, source: Extent) -> Option<CanvasLayout> {
        let width = round_up(source.width, self.tile_alignment)?;
        let height = round_up(source.height, self.tile_alignment)?;

        let canvas = Extent::new(width, height);
        let bytes = canvas.area().checked_mul(4 * std::mem::size_of::<f32>() as u64)?;
        if bytes > MAX_CANVAS_BYTES {
            return None;
        }

        Some(CanvasLayout {
            canvas,
            source: Extent {
                x: (width - source.width) / 2,
                y: (height - source.height) / 2,
                width: source.width,
                height: source.height,
            },
        })
    }
}

impl Default for ProcessingContext {
    fn default() -> Self {
        Self::new()
    }
}

fn round_up(value: u32, alignment: u32) -> Option<u32> {
    let alignment = alignment.max(1);
    Some(value.checked_add(alignment - 1)? / alignment * alignment)
}
