//! RGBA color with float channels.

use serde::{Deserialize, Serialize};

/// RGBA color with channels in [0, 1].
///
/// Channels are stored as `f32` so that gradient interpolation and the
/// box-blur averaging stay in float space; conversion to 8-bit happens
/// only at the texture-upload boundary via [`Rgba::to_bytes`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
    /// Alpha channel (0.0 - 1.0)
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from explicit channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Linear interpolation towards `other` by `t` in [0, 1].
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        Rgba {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Convert to 8-bit RGBA, clamping each channel to [0, 1] first.
    pub fn to_bytes(self) -> [u8; 4] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let black = Rgba::opaque(0.0, 0.0, 0.0);
        let white = Rgba::opaque(1.0, 1.0, 1.0);
        assert_eq!(black.lerp(white, 0.0), black);
        assert_eq!(black.lerp(white, 1.0), white);
        let mid = black.lerp(white, 0.5);
        assert_eq!(mid.r, 0.5);
        assert_eq!(mid.a, 1.0);
    }

    #[test]
    fn test_to_bytes_clamps() {
        let c = Rgba::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c.to_bytes(), [255, 0, 128, 255]);
    }
}
