//! Vector type alias for 3D positions.

use nalgebra::Vector3;

/// 3D vector type for world-space positions.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`. Sample points carry
/// a full 3D position; the density pipeline reads only `x` and `z`, while
/// `y` is derived separately from the ground probe during placement.
pub type Vec3 = Vector3<f32>;
