//! Ordered color ramp evaluated over [0, 1].

use serde::{Deserialize, Serialize};

use crate::core_types::Rgba;

/// A single color stop on a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position of the stop along the ramp (0.0 - 1.0)
    pub position: f32,
    /// Color at this position
    pub color: Rgba,
}

impl GradientStop {
    /// Create a stop at `position` with `color`.
    pub const fn new(position: f32, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Ordered list of color stops defining a continuous color ramp.
///
/// Evaluation clamps below the first stop and above the last stop, and
/// interpolates linearly between the two bracketing stops in between.
/// A gradient must carry at least one stop to be usable; emptiness is
/// rejected by configuration validation before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGradient {
    stops: Vec<GradientStop>,
}

impl ColorGradient {
    /// Create a gradient from stops. Stops are sorted by position, so the
    /// caller does not need to supply them in order.
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }

    /// Create a gradient with evenly spaced stops from first to last color.
    pub fn evenly_spaced(colors: &[Rgba]) -> Self {
        let n = colors.len();
        let stops = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let position = if n <= 1 {
                    0.0
                } else {
                    i as f32 / (n - 1) as f32
                };
                GradientStop::new(position, color)
            })
            .collect();
        Self { stops }
    }

    /// Standard heat ramp: transparent blue through green and yellow to red.
    pub fn heat() -> Self {
        Self::new(vec![
            GradientStop::new(0.0, Rgba::new(0.0, 0.0, 1.0, 0.0)),
            GradientStop::new(0.25, Rgba::new(0.0, 0.0, 1.0, 0.6)),
            GradientStop::new(0.5, Rgba::new(0.0, 1.0, 0.0, 0.8)),
            GradientStop::new(0.75, Rgba::new(1.0, 1.0, 0.0, 0.9)),
            GradientStop::new(1.0, Rgba::new(1.0, 0.0, 0.0, 1.0)),
        ])
    }

    /// Number of stops on the ramp.
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Whether the gradient has no stops (invalid for generation).
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The stops in ascending position order.
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Evaluate the ramp at `t`.
    ///
    /// Below the first stop or above the last, the endpoint color is
    /// returned unchanged. An empty gradient evaluates to transparent;
    /// validated configurations never reach that case.
    pub fn evaluate(&self, t: f32) -> Rgba {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let span = hi.position - lo.position;
                // Coincident stops: take the later one
                if span <= f32::EPSILON {
                    return hi.color;
                }
                let local_t = (t - lo.position) / span;
                return lo.color.lerp(hi.color, local_t);
            }
        }
        last.color
    }
}
