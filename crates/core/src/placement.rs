//! Ground probing and world-space placement of the finished grid.

use nalgebra::UnitQuaternion;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use tracing::warn;

use crate::core_types::{MapBounds, Vec3};

/// Height above the bounds center the downward ground ray starts from.
/// High enough to clear any level geometry the heatmap overlays.
pub const PROBE_ORIGIN_HEIGHT: f32 = 500.0;

/// Injected capability for finding the real ground under the heatmap.
///
/// The engine only consumes "cast a ray straight down from `origin`,
/// return the hit height or none". Level geometry, collision layers, and
/// the actual raycast all live with the host.
pub trait GroundProbe: Send + Sync {
    /// Cast a ray straight down from `origin`. Returns the world-space Y
    /// of the first intersection, or `None` if nothing was hit.
    fn cast_down(&self, origin: Vec3) -> Option<f32>;
}

/// A probe that never hits anything. Placement falls back to the bounds
/// floor; useful for hosts without queryable level geometry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeometryProbe;

impl GroundProbe for NoGeometryProbe {
    fn cast_down(&self, _origin: Vec3) -> Option<f32> {
        None
    }
}

/// Position, orientation, and footprint used to place the generated grid
/// in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementTransform {
    /// Center of the bounds at `ground_height + height_offset`
    pub position: Vec3,
    /// Quarter turn about X: the grid lies flat, facing up
    pub rotation: UnitQuaternion<f32>,
    /// Footprint (width along X, depth along Z) in world units
    pub size: (f32, f32),
}

/// Resolve the ground height under the bounds center.
///
/// Probes downward from [`PROBE_ORIGIN_HEIGHT`] above the center. A miss
/// is not an error: it falls back to the bounds' own floor, with a
/// diagnostic warning as the only trace.
pub fn resolve_ground_height(bounds: &MapBounds, probe: &dyn GroundProbe) -> f32 {
    let origin = Vec3::new(bounds.center_x(), PROBE_ORIGIN_HEIGHT, bounds.center_z());
    match probe.cast_down(origin) {
        Some(height) => height,
        None => {
            warn!(
                fallback = bounds.min_y,
                "ground probe found no intersection, falling back to bounds floor"
            );
            bounds.min_y
        }
    }
}

/// Compute the placement transform for the grid.
///
/// O(1) and independent of grid generation: callers re-run this alone
/// when only the height offset or ground height changes.
pub fn place(bounds: &MapBounds, ground_height: f32, height_offset: f32) -> PlacementTransform {
    PlacementTransform {
        position: Vec3::new(
            bounds.center_x(),
            ground_height + height_offset,
            bounds.center_z(),
        ),
        rotation: UnitQuaternion::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2),
        size: (bounds.width(), bounds.depth()),
    }
}
