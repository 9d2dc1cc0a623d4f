//! Density normalization into the [0, 1] color range.

use rayon::prelude::*;
use tracing::debug;

use crate::config::NormalizationPolicy;
use crate::grid::DensityField;

/// Rescale accumulated density into [0, 1] in place.
///
/// An all-zero field short-circuits to all-zero output without dividing,
/// so no NaN or infinity can reach the colorizer. This is the degenerate
/// density case (zero points, or all points splatted outside the grid)
/// and is not an error: downstream it produces an all-baseline grid.
pub fn normalize(field: &mut DensityField, policy: NormalizationPolicy) {
    let max = field.max_value();
    if max <= 0.0 {
        debug!("accumulated density is all-zero, output stays at baseline");
        field.fill(0.0);
        return;
    }

    match policy {
        NormalizationPolicy::Linear => {
            field
                .as_mut_slice()
                .par_iter_mut()
                .for_each(|v| *v /= max);
        }
        NormalizationPolicy::Logarithmic => {
            let log_max = max.ln_1p();
            field
                .as_mut_slice()
                .par_iter_mut()
                .for_each(|v| *v = v.ln_1p() / log_max);
        }
    }
}
