//! Point-to-cell mapping and Gaussian density splatting.

use crate::core_types::{MapBounds, Vec3};
use crate::grid::DensityField;

/// Clamped inverse lerp: where `v` sits between `a` and `b`, in [0, 1].
///
/// The clamp pins out-of-bounds values to the nearest edge rather than
/// producing out-of-range results. Callers guarantee `b > a` (enforced by
/// bounds validation).
fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    ((v - a) / (b - a)).clamp(0.0, 1.0)
}

/// Map a world-space `(x, z)` position to grid cell indices.
///
/// Points outside the bounds are pinned to the nearest edge cell. Pure
/// function, safe to call concurrently for different points.
pub fn map_to_cell(x: f32, z: f32, bounds: &MapBounds, resolution: usize) -> (usize, usize) {
    let span = (resolution - 1) as f32;
    let cell_x = (inverse_lerp(bounds.min_x, bounds.max_x, x) * span).round() as usize;
    let cell_y = (inverse_lerp(bounds.min_z, bounds.max_z, z) * span).round() as usize;
    (cell_x, cell_y)
}

/// Splat a Gaussian kernel centered at each point into a fresh field.
///
/// For every point, each integer offset `(dx, dy)` with
/// `dx^2 + dy^2 <= ceil(radius)^2` receives `exp(-d^2 / (2 * radius^2))`,
/// clipped to the grid. Only the radius-bounded neighborhood is visited,
/// so the cost is `O(points * radius^2)` regardless of resolution.
///
/// Accumulation is additive, so the result is independent of point order
/// up to float summation order (the accepted approximation for this
/// pipeline). An empty point list yields an all-zero field, not an error.
///
/// Callers must pass a validated configuration: `resolution >= 1` and
/// `kernel_radius > 0`.
pub fn accumulate(
    points: &[Vec3],
    bounds: &MapBounds,
    resolution: usize,
    kernel_radius: f32,
) -> DensityField {
    let mut field = DensityField::new(resolution);

    let radius = kernel_radius.ceil() as i32;
    let radius_sq = radius * radius;
    let falloff = 2.0 * kernel_radius * kernel_radius;
    let res = resolution as i32;

    for point in points {
        let (center_x, center_y) = map_to_cell(point.x, point.z, bounds, resolution);

        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy > radius_sq {
                    continue;
                }
                let cell_x = center_x as i32 + dx;
                let cell_y = center_y as i32 + dy;
                if cell_x < 0 || cell_x >= res || cell_y < 0 || cell_y >= res {
                    continue;
                }
                let dist_sq = (dx * dx + dy * dy) as f32;
                let value = (-dist_sq / falloff).exp();
                field.add(cell_x as usize, cell_y as usize, value);
            }
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bounds() -> MapBounds {
        MapBounds::new(-10.0, 10.0, -10.0, 10.0, 0.0)
    }

    #[test]
    fn test_map_center_and_corners() {
        let b = bounds();
        assert_eq!(map_to_cell(0.0, 0.0, &b, 65), (32, 32));
        assert_eq!(map_to_cell(-10.0, -10.0, &b, 65), (0, 0));
        assert_eq!(map_to_cell(10.0, 10.0, &b, 65), (64, 64));
    }

    #[test]
    fn test_map_pins_outside_points_to_edges() {
        let b = bounds();
        assert_eq!(map_to_cell(-999.0, 0.0, &b, 65), (0, 32));
        assert_eq!(map_to_cell(0.0, 999.0, &b, 65), (32, 64));
    }

    #[test]
    fn test_empty_points_give_zero_field() {
        let field = accumulate(&[], &bounds(), 128, 8.0);
        assert_eq!(field.max_value(), 0.0);
    }

    #[test]
    fn test_single_point_peak_at_center() {
        let field = accumulate(&[Vec3::new(0.0, 5.0, 0.0)], &bounds(), 65, 4.0);

        // Unit contribution at distance zero
        assert_relative_eq!(field.get(32, 32), 1.0);

        // Monotonically decreasing outward along the axis
        for step in 1..4 {
            assert!(field.get(32 + step, 32) < field.get(32 + step - 1, 32));
        }

        // Zero beyond the splat radius
        assert_eq!(field.get(32 + 6, 32), 0.0);
    }

    #[test]
    fn test_splat_clips_at_grid_border() {
        // Point pinned to a corner: the kernel quarter outside is dropped
        let field = accumulate(&[Vec3::new(-10.0, 0.0, -10.0)], &bounds(), 65, 4.0);
        assert_relative_eq!(field.get(0, 0), 1.0);
        assert!(field.get(1, 0) > 0.0);
    }

    #[test]
    fn test_overlapping_splats_are_additive() {
        let b = bounds();
        let one = accumulate(&[Vec3::new(0.0, 0.0, 0.0)], &b, 65, 4.0);
        let two = accumulate(
            &[Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)],
            &b,
            65,
            4.0,
        );
        assert_relative_eq!(two.get(32, 32), 2.0 * one.get(32, 32));
        assert_relative_eq!(two.get(30, 33), 2.0 * one.get(30, 33));
    }

    #[test]
    fn test_resolution_one_collects_everything() {
        let field = accumulate(&[Vec3::new(3.0, 0.0, -7.0)], &bounds(), 1, 2.0);
        assert_relative_eq!(field.get(0, 0), 1.0);
    }
}
