//! Reposition path: cheap, idempotent, grid-preserving.

use approx::assert_relative_eq;
use heatmap_core::placement::NoGeometryProbe;
use heatmap_core::{GroundProbe, HeatmapConfig, HeatmapEngine, MapBounds, Vec3};

struct FlatGround(f32);

impl GroundProbe for FlatGround {
    fn cast_down(&self, _origin: Vec3) -> Option<f32> {
        Some(self.0)
    }
}

fn bounds() -> MapBounds {
    MapBounds::new(0.0, 40.0, -20.0, 20.0, -5.0)
}

fn config() -> HeatmapConfig {
    HeatmapConfig {
        resolution: 33,
        kernel_radius: 3.0,
        height_offset: 0.5,
        ..HeatmapConfig::default()
    }
}

#[test]
fn test_probe_hit_positions_above_real_ground() {
    let mut engine = HeatmapEngine::new();
    let heatmap = engine
        .generate(&[Vec3::new(10.0, 0.0, 0.0)], bounds(), config(), &FlatGround(7.0))
        .unwrap();
    assert_relative_eq!(heatmap.placement().position.y, 7.5);
    assert_relative_eq!(heatmap.ground_height(), 7.0);
}

#[test]
fn test_probe_miss_falls_back_to_bounds_floor() {
    let mut engine = HeatmapEngine::new();
    let heatmap = engine
        .generate(&[], bounds(), config(), &NoGeometryProbe)
        .unwrap();
    // min_y fallback, not a default zero
    assert_relative_eq!(heatmap.ground_height(), -5.0);
    assert_relative_eq!(heatmap.placement().position.y, -4.5);
}

#[test]
fn test_reposition_twice_equals_once() {
    let mut engine = HeatmapEngine::new();
    engine
        .generate(&[], bounds(), config(), &FlatGround(2.0))
        .unwrap();

    let once = *engine.reposition(1.25).unwrap();
    let twice = *engine.reposition(1.25).unwrap();
    assert_eq!(once, twice);
    assert_relative_eq!(once.position.y, 3.25);
    // Footprint and center are untouched by repositioning
    assert_relative_eq!(once.size.0, 40.0);
    assert_relative_eq!(once.size.1, 40.0);
    assert_relative_eq!(once.position.x, 20.0);
}

#[test]
fn test_reprobe_ground_tracks_changed_geometry() {
    let mut engine = HeatmapEngine::new();
    engine
        .generate(&[], bounds(), config(), &FlatGround(2.0))
        .unwrap();

    let moved = *engine.reprobe_ground(&FlatGround(6.0)).unwrap();
    assert_relative_eq!(moved.position.y, 6.5);
    assert_relative_eq!(engine.heatmap().unwrap().ground_height(), 6.0);
}

#[test]
fn test_visibility_toggle_leaves_grid_and_placement_alone() {
    let mut engine = HeatmapEngine::new();
    engine
        .generate(&[Vec3::new(5.0, 0.0, 5.0)], bounds(), config(), &FlatGround(0.0))
        .unwrap();

    let grid_before = engine.heatmap().unwrap().color_grid().as_slice().to_vec();
    let placement_before = *engine.heatmap().unwrap().placement();

    engine.set_visible(false);
    let heatmap = engine.heatmap().unwrap();
    assert!(!heatmap.visible());
    assert_eq!(heatmap.color_grid().as_slice(), &grid_before[..]);
    assert_eq!(*heatmap.placement(), placement_before);
}
