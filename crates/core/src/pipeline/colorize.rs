//! Density-to-color mapping through the gradient.

use rayon::prelude::*;

use crate::core_types::ColorGradient;
use crate::grid::{ColorGrid, DensityField};

/// Map each normalized density value through the gradient, one gradient
/// evaluation per cell. Rows are colorized in parallel; evaluation is a
/// pure per-cell read, so the result matches the sequential sweep exactly.
pub fn colorize(field: &DensityField, gradient: &ColorGradient) -> ColorGrid {
    let resolution = field.resolution();
    let mut grid = ColorGrid::new(resolution);

    grid.as_mut_slice()
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = gradient.evaluate(field.get(x, y));
            }
        });

    grid
}
