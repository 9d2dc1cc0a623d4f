//! Generation configuration snapshot and validation.
//!
//! All pipeline parameters travel together in a [`HeatmapConfig`] value
//! that is captured once per generation call. Mutating the caller's
//! configuration afterwards never alters an already-produced grid; only a
//! fresh generation (or the cheap reposition path) reacts to changes.

use serde::{Deserialize, Serialize};

use crate::core_types::{ColorGradient, MapBounds};

/// Hard cap on grid resolution, bounding memory and generation cost.
pub const MAX_RESOLUTION: usize = 2048;

/// Policy mapping raw accumulated density into the [0, 1] color range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalizationPolicy {
    /// Divide by the grid maximum. A single dense cluster can flatten the
    /// rest of the map to near-zero.
    Linear,
    /// Compress with `ln(1 + v) / ln(1 + max)`. Preferred default when
    /// point density varies by orders of magnitude across the map.
    #[default]
    Logarithmic,
}

/// Immutable bundle of parameters consumed atomically at generation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapConfig {
    /// Grid resolution per axis; the output grid is `resolution x resolution`
    pub resolution: usize,
    /// Gaussian kernel radius in grid cells, must be positive
    pub kernel_radius: f32,
    /// Number of 3x3 box-blur passes applied after colorization
    pub smoothing_passes: u32,
    /// Height above the detected ground at which the grid is placed
    pub height_offset: f32,
    /// Density-to-[0,1] compression policy
    pub normalization: NormalizationPolicy,
    /// Color ramp indexed by normalized density
    pub gradient: ColorGradient,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            resolution: 512,
            kernel_radius: 8.0,
            smoothing_passes: 1,
            height_offset: 0.5,
            normalization: NormalizationPolicy::Logarithmic,
            gradient: ColorGradient::heat(),
        }
    }
}

impl HeatmapConfig {
    /// Validate this configuration together with the generation bounds.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`ConfigError`]:
    /// - [`ConfigError::DegenerateBounds`] if either horizontal axis of
    ///   `bounds` has no extent
    /// - [`ConfigError::InvalidResolution`] if `resolution` is zero or
    ///   above [`MAX_RESOLUTION`]
    /// - [`ConfigError::InvalidKernelRadius`] if `kernel_radius` is not
    ///   finite and positive
    /// - [`ConfigError::EmptyGradient`] if the gradient has no stops
    pub fn validate(&self, bounds: &MapBounds) -> Result<(), ConfigError> {
        bounds.validate()?;
        if !(1..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        if !self.kernel_radius.is_finite() || self.kernel_radius <= 0.0 {
            return Err(ConfigError::InvalidKernelRadius(self.kernel_radius));
        }
        if self.gradient.is_empty() {
            return Err(ConfigError::EmptyGradient);
        }
        Ok(())
    }
}

/// Configuration errors, fatal to a generation call.
///
/// No partial grid is ever produced on these: the caller receives the
/// error instead of a corrupted or default-valued grid.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Bounds have `max <= min` on an axis, or non-finite extents
    DegenerateBounds(String),
    /// Resolution outside `1..=MAX_RESOLUTION`
    InvalidResolution(usize),
    /// Kernel radius not finite and positive
    InvalidKernelRadius(f32),
    /// Gradient carries no stops
    EmptyGradient,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::DegenerateBounds(msg) => write!(f, "degenerate bounds: {msg}"),
            ConfigError::InvalidResolution(res) => {
                write!(f, "resolution must be 1..={MAX_RESOLUTION}, got {res}")
            }
            ConfigError::InvalidKernelRadius(radius) => {
                write!(f, "kernel radius must be finite and positive, got {radius}")
            }
            ConfigError::EmptyGradient => write!(f, "gradient must contain at least one stop"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> MapBounds {
        MapBounds::new(-10.0, 10.0, -10.0, 10.0, 0.0)
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(HeatmapConfig::default().validate(&bounds()).is_ok());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let config = HeatmapConfig {
            resolution: 0,
            ..HeatmapConfig::default()
        };
        assert_eq!(
            config.validate(&bounds()),
            Err(ConfigError::InvalidResolution(0))
        );
    }

    #[test]
    fn test_oversized_resolution_rejected() {
        let config = HeatmapConfig {
            resolution: MAX_RESOLUTION + 1,
            ..HeatmapConfig::default()
        };
        assert!(config.validate(&bounds()).is_err());
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let config = HeatmapConfig {
            kernel_radius: 0.0,
            ..HeatmapConfig::default()
        };
        assert_eq!(
            config.validate(&bounds()),
            Err(ConfigError::InvalidKernelRadius(0.0))
        );
    }

    #[test]
    fn test_empty_gradient_rejected() {
        let config = HeatmapConfig {
            gradient: ColorGradient::new(Vec::new()),
            ..HeatmapConfig::default()
        };
        assert_eq!(config.validate(&bounds()), Err(ConfigError::EmptyGradient));
    }

    #[test]
    fn test_degenerate_bounds_rejected_first() {
        let config = HeatmapConfig {
            resolution: 0,
            ..HeatmapConfig::default()
        };
        let degenerate = MapBounds::new(5.0, 5.0, 0.0, 1.0, 0.0);
        assert!(matches!(
            config.validate(&degenerate),
            Err(ConfigError::DegenerateBounds(_))
        ));
    }
}
