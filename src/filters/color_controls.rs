use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    filters::{
        traits::{ensure_finite, luma},
        FilterKind, FilterMetadata, PixelOperation,
    },
};

/// Parameters for the color controls operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorControlsParams {
    /// 0.0 = grayscale, 1.0 = unchanged, above 1.0 = more vivid
    pub saturation: f32,

    /// Added to every color channel
    pub brightness: f32,

    /// Scale around mid-gray, 1.0 = unchanged
    pub contrast: f32,
}

impl ColorControlsParams {
    pub const fn new(saturation: f32, brightness: f32, contrast: f32) -> Self {
        Self { saturation, brightness, contrast }
    }

    /// Only change saturation
    pub const fn with_saturation(saturation: f32) -> Self {
        Self::new(saturation, 0.0, 1.0)
    }
}

impl Default for ColorControlsParams {
    fn default() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }
}

impl PixelOperation for ColorControlsParams {
    fn kind(&self) -> FilterKind {
        FilterKind::ColorControls
    }

    fn apply_pixel(&self, pixel: [f32; 4]) -> [f32; 4] {
        let l = luma(pixel);
        let mut out = pixel;
        for value in out.iter_mut().take(3) {
            let saturated = l + (*value - l) * self.saturation;
            let brightened = saturated + self.brightness;
            *value = (brightened - 0.5) * self.contrast + 0.5;
        }
        out
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        ensure_finite(self.kind(), "saturation", self.saturation)?;
        ensure_finite(self.kind(), "brightness", self.brightness)?;
        ensure_finite(self.kind(), "contrast", self.contrast)?;

        if self.saturation < 0.0 || self.contrast < 0.0 {
            return Err(ConfigurationError::InvalidParameter {
                operation: self.kind().name().to_string(),
                details: format!(
                    "saturation and contrast must not be negative (saturation {}, contrast {})",
                    self.saturation, self.contrast
                ),
            });
        }
        Ok(())
    }

    fn metadata(&self) -> FilterMetadata {
        FilterMetadata {
            display_name: self.kind().display_name().to_string(),
            description: "Adjusts saturation, brightness and contrast".to_string(),
            parameters: vec![
                ("saturation".to_string(), "Color saturation (0.0 = gray, 1.0 = unchanged)".to_string()),
                ("brightness".to_string(), "Offset added to each channel (-1.0-1.0)".to_string()),
                ("contrast".to_string(), "Contrast around mid-gray (1.0 = unchanged)".to_string()),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: [f32; 4], b: [f32; 4]) {
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn test_default_is_identity() {
        let pixel = [0.3, 0.6, 0.9, 0.5];
        assert_close(ColorControlsParams::default().apply_pixel(pixel), pixel);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let out = ColorControlsParams::with_saturation(0.0).apply_pixel([1.0, 0.0, 0.0, 1.0]);
        assert_close(out, [0.2125, 0.2125, 0.2125, 1.0]);
    }

    #[test]
    fn test_low_saturation_pulls_toward_luma() {
        let pixel = [0.9, 0.1, 0.1, 1.0];
        let l = luma(pixel);
        let out = ColorControlsParams::with_saturation(0.1).apply_pixel(pixel);

        assert!((out[0] - l).abs() < (pixel[0] - l).abs());
        assert!((out[1] - l).abs() < (pixel[1] - l).abs());
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_brightness_and_contrast() {
        let out = ColorControlsParams::new(1.0, 0.1, 2.0).apply_pixel([0.5, 0.5, 0.5, 1.0]);
        assert_close(out, [0.7, 0.7, 0.7, 1.0]);
    }

    #[test]
    fn test_negative_saturation_rejected() {
        assert!(ColorControlsParams::with_saturation(-0.5).validate().is_err());
        assert!(ColorControlsParams::with_saturation(0.1).validate().is_ok());
    }
}
