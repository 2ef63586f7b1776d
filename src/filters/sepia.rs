use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    filters::{traits::ensure_finite, FilterKind, FilterMetadata, PixelOperation},
};

const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Parameters for the sepia tone operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SepiaToneParams {
    /// Blend between the input (0.0) and full sepia (1.0)
    pub intensity: f32,
}

impl SepiaToneParams {
    pub const fn new(intensity: f32) -> Self {
        Self { intensity }
    }
}

impl Default for SepiaToneParams {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PixelOperation for SepiaToneParams {
    fn kind(&self) -> FilterKind {
        FilterKind::SepiaTone
    }

    fn apply_pixel(&self, pixel: [f32; 4]) -> [f32; 4] {
        let mut out = pixel;
        for (channel, row) in SEPIA_MATRIX.iter().enumerate() {
            let toned = row[0] * pixel[0] + row[1] * pixel[1] + row[2] * pixel[2];
            out[channel] = pixel[channel] + (toned - pixel[channel]) * self.intensity;
        }
        out
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_finite(self.kind(), "intensity", self.intensity)
    }

    fn metadata(&self) -> FilterMetadata {
        FilterMetadata {
            display_name: self.kind().display_name().to_string(),
            description: "Warm brown toning of an old photograph".to_string(),
            parameters: vec![(
                "intensity".to_string(),
                "Strength of the sepia toning (0.0-1.0)".to_string(),
            )],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_intensity_is_identity() {
        let pixel = [0.2, 0.4, 0.6, 1.0];
        assert_eq!(SepiaToneParams::new(0.0).apply_pixel(pixel), pixel);
    }

    #[test]
    fn test_full_sepia_on_gray() {
        let out = SepiaToneParams::new(1.0).apply_pixel([0.5, 0.5, 0.5, 1.0]);

        // Gray turns warm: red above green above blue
        assert!(out[0] > out[1]);
        assert!(out[1] > out[2]);
        assert!((out[2] - 0.4685).abs() < 1e-4);
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_partial_intensity_blends() {
        let pixel = [0.5, 0.5, 0.5, 1.0];
        let full = SepiaToneParams::new(1.0).apply_pixel(pixel);
        let partial = SepiaToneParams::new(0.7).apply_pixel(pixel);

        for i in 0..3 {
            let expected = pixel[i] + (full[i] - pixel[i]) * 0.7;
            assert!((partial[i] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_infinite_intensity_rejected() {
        assert!(SepiaToneParams::new(f32::INFINITY).validate().is_err());
    }
}
