//! Dense square grid containers used by the pipeline.

pub mod color_grid;
pub mod density_field;

pub use color_grid::ColorGrid;
pub use density_field::DensityField;
