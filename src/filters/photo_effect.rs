//! # Photo Effects
//!
//! Fixed "film stock" looks without parameters. Each look is a saturation change, a
//! per-channel gain, a black lift and white gain, and an S-curve for contrast.

use crate::filters::{traits::luma, FilterKind, FilterMetadata, PixelOperation};

/// A parameterless photographic look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoEffect {
    kind: FilterKind,
    description: &'static str,
    saturation: f32,
    channel_gains: [f32; 3],
    lift: f32,
    gain: f32,
    curve: f32,
}

/// Warm, faded instant-camera print
pub const INSTANT: PhotoEffect = PhotoEffect {
    kind: FilterKind::PhotoEffectInstant,
    description: "Warm, faded instant-camera print",
    saturation: 0.8,
    channel_gains: [1.06, 1.0, 0.88],
    lift: 0.06,
    gain: 0.9,
    curve: 0.2,
};

/// Cool, contrasty cross-processed film
pub const PROCESS: PhotoEffect = PhotoEffect {
    kind: FilterKind::PhotoEffectProcess,
    description: "Cool, contrasty cross-processed film",
    saturation: 0.9,
    channel_gains: [0.9, 1.0, 1.1],
    lift: 0.0,
    gain: 1.0,
    curve: 0.5,
};

/// High-contrast black and white
pub const NOIR: PhotoEffect = PhotoEffect {
    kind: FilterKind::PhotoEffectNoir,
    description: "High-contrast black and white",
    saturation: 0.0,
    channel_gains: [1.0, 1.0, 1.0],
    lift: 0.0,
    gain: 1.0,
    curve: 0.6,
};

fn s_curve(value: f32, amount: f32) -> f32 {
    let v = value.clamp(0.0, 1.0);
    let smooth = v * v * (3.0 - 2.0 * v);
    v + (smooth - v) * amount
}

impl PixelOperation for PhotoEffect {
    fn kind(&self) -> FilterKind {
        self.kind
    }

    fn apply_pixel(&self, pixel: [f32; 4]) -> [f32; 4] {
        let l = luma(pixel);
        let mut out = pixel;
        for (channel, value) in out.iter_mut().take(3).enumerate() {
            let saturated = l + (*value - l) * self.saturation;
            let graded = self.lift + saturated * self.channel_gains[channel] * self.gain;
            *value = s_curve(graded, self.curve);
        }
        out
    }

    fn metadata(&self) -> FilterMetadata {
        FilterMetadata {
            display_name: self.kind.display_name().to_string(),
            description: self.description.to_string(),
            parameters: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noir_is_monochrome() {
        for pixel in [[0.9, 0.1, 0.3, 1.0], [0.0, 1.0, 0.5, 0.5], [0.2, 0.2, 0.8, 1.0]] {
            let out = NOIR.apply_pixel(pixel);
            assert_eq!(out[0], out[1]);
            assert_eq!(out[1], out[2]);
            assert_eq!(out[3], pixel[3]);
        }
    }

    #[test]
    fn test_noir_increases_contrast() {
        let dark = NOIR.apply_pixel([0.2, 0.2, 0.2, 1.0]);
        let light = NOIR.apply_pixel([0.8, 0.8, 0.8, 1.0]);
        assert!(dark[0] < 0.2);
        assert!(light[0] > 0.8);
    }

    #[test]
    fn test_instant_is_warm_and_faded() {
        let gray = INSTANT.apply_pixel([0.5, 0.5, 0.5, 1.0]);
        assert!(gray[0] > gray[2]);

        let black = INSTANT.apply_pixel([0.0, 0.0, 0.0, 1.0]);
        assert!(black[0] > 0.0);
        assert!(INSTANT.expands_extent());
    }

    #[test]
    fn test_process_is_cool() {
        let gray = PROCESS.apply_pixel([0.5, 0.5, 0.5, 1.0]);
        assert!(gray[2] > gray[0]);
        assert!(!PROCESS.expands_extent());
    }

    #[test]
    fn test_output_in_display_range() {
        for effect in [INSTANT, PROCESS, NOIR] {
            let out = effect.apply_pixel([1.0, 1.0, 0.0, 1.0]);
            for value in &out[..3] {
                assert!((0.0..=1.0).contains(value));
            }
        }
    }
}
