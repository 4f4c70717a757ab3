//! HDR to display conversion: tone mapping, gamma, and 8-bit quantization.

use crate::{Color, ImageBuffer};
use serde::Deserialize;

/// Default display gamma.
pub const DEFAULT_GAMMA: f64 = 2.2;

/// Operator that compresses linear radiance into [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneMap {
    /// Hard clip at 1.0
    #[default]
    Clamp,
    /// x / (1 + x)
    Reinhard,
    /// Narkowicz fit of the ACES filmic curve
    Aces,
    /// Hable's filmic curve, white point 11.2
    Uncharted2,
}

impl ToneMap {
    /// Map a single linear channel.
    pub fn map_channel(&self, x: f64) -> f64 {
        if x.is_nan() || x <= 0.0 {
            return 0.0;
        }
        let mapped = match self {
            ToneMap::Clamp => x,
            ToneMap::Reinhard => x / (1.0 + x),
            ToneMap::Aces => {
                let a = 2.51;
                let b = 0.03;
                let c = 2.43;
                let d = 0.59;
                let e = 0.14;
                (x * (a * x + b)) / (x * (c * x + d) + e)
            }
            ToneMap::Uncharted2 => {
                const WHITE: f64 = 11.2;
                const EXPOSURE_BIAS: f64 = 2.0;
                hable(x * EXPOSURE_BIAS) / hable(WHITE)
            }
        };
        clamp_01(mapped)
    }

    /// Map every channel of `color`.
    pub fn apply(&self, color: Color) -> Color {
        Color::new(self.map_channel(color.x), self.map_channel(color.y), self.map_channel(color.z))
    }
}

fn hable(x: f64) -> f64 {
    let a = 0.15;
    let b = 0.50;
    let c = 0.10;
    let d = 0.20;
    let e = 0.02;
    let f = 0.30;
    ((x * (a * x + c * b) + d * e) / (x * (a * x + b) + d * f)) - e / f
}

/// Apply gamma encoding. Non-positive input maps to 0.
#[inline]
pub fn linear_to_gamma(linear: f64, gamma: f64) -> f64 {
    if linear > 0.0 && gamma > 0.0 {
        linear.powf(1.0 / gamma)
    } else {
        0.0
    }
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// Convert a linear color to 8-bit RGB.
pub fn color_to_rgb(color: Color, tone_map: ToneMap, gamma: f64) -> [u8; 3] {
    let mapped = tone_map.apply(color);
    let quantize = |c: f64| (255.0 * clamp_01(linear_to_gamma(c, gamma)) + 0.5) as u8;
    [quantize(mapped.x), quantize(mapped.y), quantize(mapped.z)]
}

/// Convert a whole image to interleaved 8-bit RGB bytes.
pub fn to_rgb8(image: &ImageBuffer, tone_map: ToneMap, gamma: f64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(image.pixels.len() * 3);
    for color in &image.pixels {
        bytes.extend_from_slice(&color_to_rgb(*color, tone_map, gamma));
    }
    bytes
}
