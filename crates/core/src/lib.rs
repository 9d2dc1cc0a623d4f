//! Player-position heatmap engine.
//!
//! Turns spatial sample points recorded during play sessions into a
//! color-mapped density grid overlaid on the playing surface. The pipeline
//! maps world-space positions into a fixed-resolution grid, splats a
//! Gaussian kernel per point, normalizes the accumulated density into
//! [0, 1] (linearly or logarithmically), colorizes through a gradient,
//! optionally box-blurs the result, and computes the world-space placement
//! of the finished grid above the real ground surface.
//!
//! The engine consumes typed inputs only: a point list, rectangular
//! bounds, and a [`HeatmapConfig`] snapshot. It produces a [`ColorGrid`]
//! plus a [`PlacementTransform`]; rendering, event capture, and data
//! storage are the caller's concern.

// Shared value types (bounds, colors, gradients)
pub mod core_types;

// Generation configuration and validation
pub mod config;

// Dense grid containers
pub mod grid;

// Density pipeline stages (accumulate, normalize, colorize, smooth)
pub mod pipeline;

// Ground probing and world-space placement
pub mod placement;

// Top-level engine state machine
pub mod engine;

// Re-export core types
pub use config::{ConfigError, HeatmapConfig, NormalizationPolicy, MAX_RESOLUTION};
pub use core_types::{ColorGradient, GradientStop, MapBounds, Rgba, Vec3};
pub use engine::{EngineState, Heatmap, HeatmapEngine};
pub use grid::{ColorGrid, DensityField};
pub use placement::{GroundProbe, PlacementTransform, PROBE_ORIGIN_HEIGHT};
