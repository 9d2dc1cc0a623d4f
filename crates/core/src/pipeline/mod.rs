//! Density pipeline stages.
//!
//! Generation runs the stages in order: [`accumulate`] splats a Gaussian
//! kernel per sample point, [`normalize`] rescales accumulated density
//! into [0, 1], [`colorize`] maps density through the gradient, and
//! [`smooth`] applies the configured box-blur passes. Each stage works on
//! data allocated fresh for the call; nothing is shared across calls.

pub mod accumulate;
pub mod colorize;
pub mod normalize;
pub mod smooth;

pub use accumulate::{accumulate, map_to_cell};
pub use colorize::colorize;
pub use normalize::normalize;
pub use smooth::smooth;
