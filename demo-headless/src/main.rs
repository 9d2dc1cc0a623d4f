use clap::Parser;
use heatmap_core::{
    ColorGradient, HeatmapConfig, HeatmapEngine, MapBounds, NormalizationPolicy, Vec3,
};
use heatmap_core::placement::NoGeometryProbe;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::process::ExitCode;
use std::time::Instant;

/// Heatmap generation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "heatmap-demo")]
#[command(about = "Player position heatmap demo", long_about = None)]
struct Args {
    /// Grid resolution per axis
    #[arg(short, long, default_value_t = 512)]
    resolution: usize,

    /// Gaussian kernel radius in grid cells
    #[arg(short, long, default_value_t = 8.0)]
    kernel_radius: f32,

    /// Number of 3x3 box-blur smoothing passes
    #[arg(short, long, default_value_t = 1)]
    smoothing_passes: u32,

    /// Height above the ground the overlay floats at
    #[arg(long, default_value_t = 0.5)]
    height_offset: f32,

    /// Normalization policy (linear, log)
    #[arg(short, long, default_value = "log")]
    normalization: String,

    /// Square map size in meters
    #[arg(short, long, default_value_t = 200.0)]
    map_size: f32,

    /// Number of synthetic sample positions
    #[arg(short, long, default_value_t = 5000)]
    points: usize,

    /// Number of activity clusters the walk visits
    #[arg(long, default_value_t = 4)]
    clusters: usize,

    /// Random seed for the synthetic walk
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Output PNG path
    #[arg(short, long, default_value = "heatmap.png")]
    output: String,
}

/// Random walk that dwells around a handful of cluster centers, roughly
/// the shape real play-session traces have: long dwell times around
/// objectives with thin trails in between.
fn synthesize_points(args: &Args, half: f32) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let clusters = args.clusters.max(1);

    let centers: Vec<(f32, f32)> = (0..clusters)
        .map(|_| {
            (
                rng.random_range(-half * 0.8..half * 0.8),
                rng.random_range(-half * 0.8..half * 0.8),
            )
        })
        .collect();

    let step = half * 0.02;
    let mut points = Vec::with_capacity(args.points);
    for (i, &(cx, cz)) in centers.iter().enumerate() {
        let count = if i == clusters - 1 {
            args.points - points.len()
        } else {
            args.points / clusters
        };
        let (mut x, mut z) = (cx, cz);
        for _ in 0..count {
            x = (x + rng.random_range(-step..step)).clamp(-half, half);
            z = (z + rng.random_range(-step..step)).clamp(-half, half);
            points.push(Vec3::new(x, 0.0, z));
        }
    }
    points
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Heatmap Demo ===\n");

    let normalization = match args.normalization.to_lowercase().as_str() {
        "linear" => NormalizationPolicy::Linear,
        "log" | "logarithmic" => NormalizationPolicy::Logarithmic,
        other => {
            println!("Unknown normalization '{}', using logarithmic", other);
            NormalizationPolicy::Logarithmic
        }
    };

    let half = args.map_size / 2.0;
    let bounds = MapBounds::new(-half, half, -half, half, 0.0);
    let points = synthesize_points(&args, half);
    println!(
        "Synthesized {} positions over {:.0}x{:.0}m ({} clusters, seed {})",
        points.len(),
        args.map_size,
        args.map_size,
        args.clusters,
        args.seed
    );

    let config = HeatmapConfig {
        resolution: args.resolution,
        kernel_radius: args.kernel_radius,
        smoothing_passes: args.smoothing_passes,
        height_offset: args.height_offset,
        normalization,
        gradient: ColorGradient::heat(),
    };

    let mut engine = HeatmapEngine::new();
    let start = Instant::now();
    let heatmap = match engine.generate(&points, bounds, config, &NoGeometryProbe) {
        Ok(heatmap) => heatmap,
        Err(error) => {
            eprintln!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };
    let elapsed = start.elapsed();

    let resolution = heatmap.color_grid().resolution();
    println!(
        "Generated {}x{} grid in {:.1} ms ({} passes, {:?})",
        resolution,
        resolution,
        elapsed.as_secs_f64() * 1000.0,
        args.smoothing_passes,
        heatmap.config().normalization
    );

    let placement = heatmap.placement();
    println!(
        "Placement: center ({:.1}, {:.1}, {:.1}), footprint {:.0}x{:.0}m",
        placement.position.x,
        placement.position.y,
        placement.position.z,
        placement.size.0,
        placement.size.1
    );

    let bytes = heatmap.color_grid().to_rgba_bytes();
    let Some(img) = image::RgbaImage::from_raw(resolution as u32, resolution as u32, bytes) else {
        eprintln!("Grid byte length does not match the image dimensions");
        return ExitCode::FAILURE;
    };
    if let Err(error) = img.save(&args.output) {
        eprintln!("Failed to write '{}': {error}", args.output);
        return ExitCode::FAILURE;
    }
    println!("Wrote {}", args.output);

    ExitCode::SUCCESS
}
