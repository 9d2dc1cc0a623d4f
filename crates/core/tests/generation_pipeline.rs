//! End-to-end generation pipeline behavior.

use approx::assert_relative_eq;
use heatmap_core::placement::NoGeometryProbe;
use heatmap_core::{
    ColorGradient, ConfigError, GradientStop, HeatmapConfig, HeatmapEngine, MapBounds,
    NormalizationPolicy, Rgba, Vec3,
};

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn bounds() -> MapBounds {
    MapBounds::new(-10.0, 10.0, -10.0, 10.0, 0.0)
}

fn black_to_white() -> ColorGradient {
    ColorGradient::new(vec![
        GradientStop::new(0.0, Rgba::opaque(0.0, 0.0, 0.0)),
        GradientStop::new(1.0, Rgba::opaque(1.0, 1.0, 1.0)),
    ])
}

#[test]
fn test_single_point_at_center_peaks_at_one() {
    init_logging();

    let config = HeatmapConfig {
        resolution: 65,
        kernel_radius: 4.0,
        smoothing_passes: 0,
        normalization: NormalizationPolicy::Linear,
        gradient: black_to_white(),
        ..HeatmapConfig::default()
    };

    let mut engine = HeatmapEngine::new();
    let heatmap = engine
        .generate(
            &[Vec3::new(0.0, 1.7, 0.0)],
            bounds(),
            config,
            &NoGeometryProbe,
        )
        .unwrap();

    let grid = heatmap.color_grid();
    // Center cell normalizes to 1.0, so it maps to the last gradient stop
    assert_relative_eq!(grid.get(32, 32).r, 1.0);

    // Density decreases monotonically outward along the row
    for step in 1..4 {
        assert!(grid.get(32 + step, 32).r < grid.get(32 + step - 1, 32).r);
    }

    // Beyond the kernel radius the row is back at the baseline color
    assert_relative_eq!(grid.get(32 + 8, 32).r, 0.0);
}

#[test]
fn test_zero_points_regenerate_baseline_grid() {
    let config = HeatmapConfig {
        resolution: 128,
        kernel_radius: 8.0,
        smoothing_passes: 2,
        gradient: black_to_white(),
        ..HeatmapConfig::default()
    };
    let baseline = config.gradient.evaluate(0.0);

    let mut engine = HeatmapEngine::new();
    let heatmap = engine
        .generate(&[], bounds(), config, &NoGeometryProbe)
        .unwrap();

    // Every cell sits at the gradient's t = 0 color; smoothing a uniform
    // grid is a no-op even at the edges
    assert!(heatmap
        .color_grid()
        .as_slice()
        .iter()
        .all(|&c| (c.r - baseline.r).abs() < 1e-6));
}

#[test]
fn test_degenerate_bounds_produce_no_grid() {
    let degenerate = MapBounds::new(5.0, 5.0, -10.0, 10.0, 0.0);
    let mut engine = HeatmapEngine::new();
    let result = engine.generate(&[], degenerate, HeatmapConfig::default(), &NoGeometryProbe);
    assert!(matches!(result, Err(ConfigError::DegenerateBounds(_))));
    assert!(engine.heatmap().is_none());
}

#[test]
fn test_config_is_snapshotted_at_generation() {
    let mut config = HeatmapConfig {
        resolution: 33,
        kernel_radius: 3.0,
        ..HeatmapConfig::default()
    };

    let mut engine = HeatmapEngine::new();
    engine
        .generate(
            &[Vec3::new(0.0, 0.0, 0.0)],
            bounds(),
            config.clone(),
            &NoGeometryProbe,
        )
        .unwrap();

    // Mutating the caller's configuration afterwards does not reach the
    // already-produced heatmap
    config.resolution = 65;
    config.kernel_radius = 9.0;
    let snapshot = engine.heatmap().unwrap().config();
    assert_eq!(snapshot.resolution, 33);
    assert_relative_eq!(snapshot.kernel_radius, 3.0);
}

#[test]
fn test_smoothing_passes_reduce_the_peak() {
    let sharp = HeatmapConfig {
        resolution: 65,
        kernel_radius: 2.0,
        smoothing_passes: 0,
        normalization: NormalizationPolicy::Linear,
        gradient: black_to_white(),
        ..HeatmapConfig::default()
    };
    let smoothed = HeatmapConfig {
        smoothing_passes: 3,
        ..sharp.clone()
    };
    let points = [Vec3::new(0.0, 0.0, 0.0)];

    let mut engine = HeatmapEngine::new();
    let peak_sharp = engine
        .generate(&points, bounds(), sharp, &NoGeometryProbe)
        .unwrap()
        .color_grid()
        .get(32, 32)
        .r;
    let peak_smoothed = engine
        .generate(&points, bounds(), smoothed, &NoGeometryProbe)
        .unwrap()
        .color_grid()
        .get(32, 32)
        .r;

    assert!(peak_smoothed < peak_sharp);
}
