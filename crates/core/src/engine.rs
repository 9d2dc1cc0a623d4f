//! Top-level heatmap engine: generation state machine and reposition path.

use tracing::{debug, info};

use crate::config::{ConfigError, HeatmapConfig};
use crate::core_types::{MapBounds, Vec3};
use crate::grid::ColorGrid;
use crate::pipeline::{accumulate, colorize, normalize, smooth};
use crate::placement::{place, resolve_ground_height, GroundProbe, PlacementTransform};

/// Observable engine state.
///
/// Generation itself is synchronous and all-or-nothing, so there is no
/// externally visible in-between state: a call either returns `Ready`
/// with a finished heatmap or fails leaving the previous state intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No grid has been generated yet
    Idle,
    /// A finished grid and placement are available
    Ready,
}

/// A finished heatmap: the colorized grid, its world-space placement, and
/// the configuration snapshot it was generated under.
#[derive(Debug, Clone)]
pub struct Heatmap {
    color_grid: ColorGrid,
    placement: PlacementTransform,
    bounds: MapBounds,
    ground_height: f32,
    config: HeatmapConfig,
    visible: bool,
}

impl Heatmap {
    /// The colorized, smoothed output grid.
    pub fn color_grid(&self) -> &ColorGrid {
        &self.color_grid
    }

    /// World-space placement for the grid.
    pub fn placement(&self) -> &PlacementTransform {
        &self.placement
    }

    /// Bounds this heatmap was generated over.
    pub fn bounds(&self) -> &MapBounds {
        &self.bounds
    }

    /// Ground height resolved at generation (or last reprobe) time.
    pub fn ground_height(&self) -> f32 {
        self.ground_height
    }

    /// The configuration snapshot captured when this grid was generated.
    /// Later changes to the caller's configuration are not reflected here.
    pub fn config(&self) -> &HeatmapConfig {
        &self.config
    }

    /// Whether the renderer should currently show this heatmap. Purely a
    /// render-boundary flag; it never affects grid contents.
    pub fn visible(&self) -> bool {
        self.visible
    }
}

/// Heatmap generation engine for a single overlay.
///
/// Holds at most one finished [`Heatmap`]. Each `generate` call consumes
/// its inputs into fresh grids; nothing carries over from earlier calls
/// except the visibility flag, so a failed or repeated call can never
/// observe partial state from prior work.
#[derive(Debug, Default)]
pub struct HeatmapEngine {
    ready: Option<Heatmap>,
}

impl HeatmapEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self { ready: None }
    }

    /// Current state.
    pub fn state(&self) -> EngineState {
        if self.ready.is_some() {
            EngineState::Ready
        } else {
            EngineState::Idle
        }
    }

    /// The finished heatmap, if one has been generated.
    pub fn heatmap(&self) -> Option<&Heatmap> {
        self.ready.as_ref()
    }

    /// Run the full pipeline: accumulate, normalize, colorize, smooth,
    /// then resolve the ground height and placement.
    ///
    /// The configuration is captured as an immutable snapshot at entry.
    /// Blocks until the grid and placement are ready; on success the
    /// previous heatmap (if any) is replaced wholesale. An empty point
    /// list is not an error and regenerates an all-baseline grid.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the bounds are degenerate or the
    /// configuration is invalid. No partial grid is produced, and a
    /// previously generated heatmap stays untouched.
    pub fn generate(
        &mut self,
        points: &[Vec3],
        bounds: MapBounds,
        config: HeatmapConfig,
        probe: &dyn GroundProbe,
    ) -> Result<&Heatmap, ConfigError> {
        config.validate(&bounds)?;

        info!(
            points = points.len(),
            resolution = config.resolution,
            passes = config.smoothing_passes,
            "generating heatmap"
        );

        let mut field = accumulate(points, &bounds, config.resolution, config.kernel_radius);
        debug!(max_density = field.max_value(), "accumulation finished");

        normalize(&mut field, config.normalization);
        let mut color_grid = colorize(&field, &config.gradient);
        smooth(&mut color_grid, config.smoothing_passes);

        let ground_height = resolve_ground_height(&bounds, probe);
        let placement = place(&bounds, ground_height, config.height_offset);

        // Visibility survives regeneration; everything else is replaced
        let visible = self.ready.as_ref().is_none_or(|h| h.visible);

        let heatmap = self.ready.insert(Heatmap {
            color_grid,
            placement,
            bounds,
            ground_height,
            config,
            visible,
        });
        info!("heatmap ready");
        Ok(heatmap)
    }

    /// Cheap reposition path: recompute only the placement for a new
    /// height offset, without re-running the density pipeline.
    ///
    /// O(1) and idempotent, safe to call on every configuration tick.
    /// Returns `None` while the engine is idle.
    pub fn reposition(&mut self, height_offset: f32) -> Option<&PlacementTransform> {
        let heatmap = self.ready.as_mut()?;
        heatmap.config.height_offset = height_offset;
        heatmap.placement = place(&heatmap.bounds, heatmap.ground_height, height_offset);
        Some(&heatmap.placement)
    }

    /// Re-resolve the ground height (e.g. after level geometry changed)
    /// and recompute the placement. Leaves the grid untouched.
    ///
    /// Returns `None` while the engine is idle.
    pub fn reprobe_ground(&mut self, probe: &dyn GroundProbe) -> Option<&PlacementTransform> {
        let heatmap = self.ready.as_mut()?;
        heatmap.ground_height = resolve_ground_height(&heatmap.bounds, probe);
        heatmap.placement = place(
            &heatmap.bounds,
            heatmap.ground_height,
            heatmap.config.height_offset,
        );
        Some(&heatmap.placement)
    }

    /// Set the render-boundary visibility flag. Stored with the heatmap
    /// and applied by the renderer; grid generation ignores it entirely.
    pub fn set_visible(&mut self, visible: bool) {
        if let Some(heatmap) = self.ready.as_mut() {
            heatmap.visible = visible;
        }
    }
}
