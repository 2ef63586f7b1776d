use crate::{error::ConfigurationError, filters::FilterKind};

/// Core trait every filter operation implements
///
/// Operations are pointwise: each output pixel depends only on the input pixel at the same
/// position. Pixels are straight (non-premultiplied) RGBA in the context's working space.
pub trait PixelOperation: Send + Sync {
    /// Which operation this is
    fn kind(&self) -> FilterKind;

    /// Map one input pixel to its output value
    fn apply_pixel(&self, pixel: [f32; 4]) -> [f32; 4];

    /// Check that the parameters can be rendered
    ///
    /// Called when a catalog is built and again before every render, so a bad
    /// definition never reaches `apply_pixel`.
    fn validate(&self) -> Result<(), ConfigurationError> {
        Ok(())
    }

    /// Human-facing description of the operation and its parameters
    fn metadata(&self) -> FilterMetadata;

    /// Whether the operation turns transparent black into something visible
    ///
    /// Such operations have an unbounded output extent and rely on the renderer's crop.
    fn expands_extent(&self) -> bool {
        self.apply_pixel([0.0; 4]) != [0.0; 4]
    }
}

/// Metadata about a filter operation
#[derive(Debug, Clone, Default)]
pub struct FilterMetadata {
    /// Name shown to the user, e.g. "Sepia Tone"
    pub display_name: String,

    pub description: String,

    /// Parameters with descriptions
    pub parameters: Vec<(String, String)>,
}

/// Rec. 709 luma weights used by the color operations
pub(crate) const LUMA: [f32; 3] = [0.2125, 0.7154, 0.0721];

pub(crate) fn luma(pixel: [f32; 4]) -> f32 {
    LUMA[0] * pixel[0] + LUMA[1] * pixel[1] + LUMA[2] * pixel[2]
}

/// Validate that a parameter is a finite number
pub(crate) fn ensure_finite(kind: FilterKind, name: &str, value: f32) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidParameter {
            operation: kind.name().to_string(),
            details: format!("{} must be finite, got {}", name, value),
        })
    }
}
