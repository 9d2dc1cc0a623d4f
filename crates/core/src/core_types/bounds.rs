//! Axis-aligned world-space bounds of the playing surface.

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Axis-aligned rectangle in world space covered by the heatmap.
///
/// `min_y` is the vertical floor of the playable area; it is only used as
/// the ground-height fallback when the ground probe finds no intersection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    /// Minimum X extent in world units
    pub min_x: f32,
    /// Maximum X extent in world units
    pub max_x: f32,
    /// Minimum Z extent in world units
    pub min_z: f32,
    /// Maximum Z extent in world units
    pub max_z: f32,
    /// Vertical floor, used as the ground-probe fallback height
    pub min_y: f32,
}

impl MapBounds {
    /// Create bounds from explicit extents.
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32, min_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
            min_y,
        }
    }

    /// Check that both horizontal axes have positive extent.
    ///
    /// Degenerate bounds would collapse the whole point set onto a single
    /// cell row (and divide by zero in the coordinate mapping), so they are
    /// rejected up front rather than silently tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DegenerateBounds`] if `max <= min` on either
    /// axis, or if any extent is non-finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_x.is_finite()
            && self.max_x.is_finite()
            && self.min_z.is_finite()
            && self.max_z.is_finite())
        {
            return Err(ConfigError::DegenerateBounds(
                "bounds extents must be finite".to_string(),
            ));
        }
        if self.max_x <= self.min_x {
            return Err(ConfigError::DegenerateBounds(format!(
                "X axis has no extent: min_x = {}, max_x = {}",
                self.min_x, self.max_x
            )));
        }
        if self.max_z <= self.min_z {
            return Err(ConfigError::DegenerateBounds(format!(
                "Z axis has no extent: min_z = {}, max_z = {}",
                self.min_z, self.max_z
            )));
        }
        Ok(())
    }

    /// Width of the bounds along X in world units.
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Depth of the bounds along Z in world units.
    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// X coordinate of the horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.min_x + self.max_x) / 2.0
    }

    /// Z coordinate of the horizontal center.
    pub fn center_z(&self) -> f32 {
        (self.min_z + self.max_z) / 2.0
    }
}
