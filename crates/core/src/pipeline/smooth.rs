//! Multi-pass box-blur smoothing of the color grid.

use rayon::prelude::*;

use crate::core_types::Rgba;
use crate::grid::ColorGrid;

/// Apply `passes` sequential 3x3 box-blur sweeps in place.
///
/// Each pass replaces every cell with the average of its existing 3x3
/// neighborhood; neighbors outside the grid are excluded from both sum
/// and count. Edge and corner cells therefore average fewer samples than
/// interior cells, a known and accepted bias of the truncated
/// neighborhood (not compensated by wrapping or padding).
///
/// Every pass reads a frozen snapshot of the previous pass's output, so
/// no partial propagation occurs within a pass. `passes == 0` is a no-op.
pub fn smooth(grid: &mut ColorGrid, passes: u32) {
    if passes == 0 {
        return;
    }

    let resolution = grid.resolution();
    let mut front = grid.as_slice().to_vec();
    let mut back = vec![Rgba::TRANSPARENT; front.len()];

    for _ in 0..passes {
        blur_pass(&front, &mut back, resolution);
        std::mem::swap(&mut front, &mut back);
    }

    grid.as_mut_slice().copy_from_slice(&front);
}

/// One full-grid 3x3 convolution sweep, gathering from `input` into
/// `output`. Rows are independent within a pass, so they run in parallel;
/// the gather-only reads keep the result identical to a sequential sweep.
fn blur_pass(input: &[Rgba], output: &mut [Rgba], resolution: usize) {
    let res = resolution as i32;

    output
        .par_chunks_mut(resolution)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let mut sum = [0.0_f32; 4];
                let mut count = 0u32;

                for dy in -1_i32..=1 {
                    for dx in -1_i32..=1 {
                        let nx = x as i32 + dx;
                        let ny = y as i32 + dy;
                        if nx < 0 || nx >= res || ny < 0 || ny >= res {
                            continue;
                        }
                        let neighbor = input[ny as usize * resolution + nx as usize];
                        sum[0] += neighbor.r;
                        sum[1] += neighbor.g;
                        sum[2] += neighbor.b;
                        sum[3] += neighbor.a;
                        count += 1;
                    }
                }

                let inv = 1.0 / count as f32;
                *cell = Rgba::new(sum[0] * inv, sum[1] * inv, sum[2] * inv, sum[3] * inv);
            }
        });
}
