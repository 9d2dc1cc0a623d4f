//! Shared value types used across the heatmap pipeline.

pub mod bounds;
pub mod color;
pub mod gradient;
pub mod vec3;

pub use bounds::MapBounds;
pub use color::Rgba;
pub use gradient::{ColorGradient, GradientStop};
pub use vec3::Vec3;
