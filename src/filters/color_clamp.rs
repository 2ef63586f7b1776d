use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    filters::{traits::ensure_finite, FilterKind, FilterMetadata, PixelOperation},
};

/// Parameters for the color clamp operation
///
/// Every RGBA component is clamped into `[min_components[i], max_components[i]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorClampParams {
    pub min_components: [f32; 4],
    pub max_components: [f32; 4],
}

impl ColorClampParams {
    pub const fn new(min_components: [f32; 4], max_components: [f32; 4]) -> Self {
        Self { min_components, max_components }
    }
}

impl Default for ColorClampParams {
    fn default() -> Self {
        Self::new([0.0; 4], [1.0; 4])
    }
}

impl PixelOperation for ColorClampParams {
    fn kind(&self) -> FilterKind {
        FilterKind::ColorClamp
    }

    fn apply_pixel(&self, pixel: [f32; 4]) -> [f32; 4] {
        let mut out = pixel;
        // NaN components land on the lower bound
        for (i, value) in out.iter_mut().enumerate() {
            *value = value.max(self.min_components[i]).min(self.max_components[i]);
        }
        out
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        for i in 0..4 {
            ensure_finite(self.kind(), "min_components", self.min_components[i])?;
            ensure_finite(self.kind(), "max_components", self.max_components[i])?;

            if self.min_components[i] > self.max_components[i] {
                return Err(ConfigurationError::InvalidParameter {
                    operation: self.kind().name().to_string(),
                    details: format!(
                        "component {}: min {} exceeds max {}",
                        i, self.min_components[i], self.max_components[i]
                    ),
                });
            }
        }
        Ok(())
    }

    fn metadata(&self) -> FilterMetadata {
        FilterMetadata {
            display_name: self.kind().display_name().to_string(),
            description: "Clamps every color component into a fixed range".to_string(),
            parameters: vec![
                ("min_components".to_string(), "Lower bound per RGBA component (0.0-1.0)".to_string()),
                ("max_components".to_string(), "Upper bound per RGBA component (0.0-1.0)".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_each_component() {
        let params = ColorClampParams::new([0.2; 4], [0.9; 4]);
        assert_eq!(params.apply_pixel([0.0, 0.5, 1.0, 1.0]), [0.2, 0.5, 0.9, 0.9]);
    }

    #[test]
    fn test_default_is_identity_in_range() {
        let params = ColorClampParams::default();
        let pixel = [0.1, 0.4, 0.7, 1.0];
        assert_eq!(params.apply_pixel(pixel), pixel);
        assert!(!params.expands_extent());
    }

    #[test]
    fn test_raised_minimum_expands_extent() {
        assert!(ColorClampParams::new([0.2; 4], [0.9; 4]).expands_extent());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let params = ColorClampParams::new([0.5, 0.0, 0.0, 0.0], [0.4, 1.0, 1.0, 1.0]);
        assert!(matches!(
            params.validate(),
            Err(ConfigurationError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_nan_component_is_clamped() {
        let params = ColorClampParams::new([0.2; 4], [0.9; 4]);
        assert_eq!(params.apply_pixel([f32::NAN, 0.5, f32::INFINITY, 1.0]), [0.2, 0.5, 0.9, 0.9]);
    }

    #[test]
    fn test_nan_bound_rejected() {
        let params = ColorClampParams::new([f32::NAN, 0.0, 0.0, 0.0], [1.0; 4]);
        assert!(params.validate().is_err());
    }
}
