//! C ABI for the heatmap engine.
//!
//! Exposes heatmap generation to host game engines over a plain C
//! interface: an opaque instance handle, plain-old-data mirror structs
//! for points, bounds, and configuration, an optional ground-probe
//! callback, and thread-local last-error reporting. The generated header
//! (`HeatmapFFI.h`) is produced by cbindgen at build time.

use std::os::raw::c_void;
use std::ptr;

use heatmap_core::placement::NoGeometryProbe;
use heatmap_core::{
    ColorGradient, EngineState, GradientStop, GroundProbe, HeatmapConfig, MapBounds,
    NormalizationPolicy, Rgba, Vec3,
};

mod error;
mod helpers;
mod instance;

pub use error::{heatmap_get_last_error, heatmap_get_last_error_code, HeatmapErrorCode};
pub use instance::{heatmap_destroy, heatmap_new, HeatmapInstance};

pub(crate) use error::DefaultHeatmapError;

use helpers::clear_last_error;
use instance::{with_engine_read, with_engine_write};

// ============================================================================
// C MIRROR TYPES
// ============================================================================

/// A recorded sample position in world space.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SamplePoint3 {
    /// World-space X
    pub x: f32,
    /// World-space Y (ignored by the density pipeline)
    pub y: f32,
    /// World-space Z
    pub z: f32,
}

/// Axis-aligned world-space bounds of the playing surface.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WorldBounds {
    /// Minimum X extent
    pub min_x: f32,
    /// Maximum X extent
    pub max_x: f32,
    /// Minimum Z extent
    pub min_z: f32,
    /// Maximum Z extent
    pub max_z: f32,
    /// Vertical floor, used when the ground probe misses
    pub min_y: f32,
}

/// Density-to-color compression policy.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationMode {
    /// Divide by the grid maximum
    Linear = 0,
    /// Compress with `ln(1 + v) / ln(1 + max)`
    Logarithmic = 1,
}

/// Generation parameters, captured as an immutable snapshot per call.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    /// Grid resolution per axis (1 to 2048)
    pub resolution: u32,
    /// Gaussian kernel radius in grid cells, must be positive
    pub kernel_radius: f32,
    /// Number of 3x3 box-blur passes
    pub smoothing_passes: u32,
    /// Height above the detected ground
    pub height_offset: f32,
    /// Density compression policy
    pub normalization: NormalizationMode,
}

/// A single gradient color stop.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    /// Position along the ramp (0.0 - 1.0)
    pub position: f32,
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
    /// Alpha channel (0.0 - 1.0)
    pub a: f32,
}

/// World-space placement of the generated grid. The grid lies flat,
/// facing up, centered on `position`, covering `width` by `depth`.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Placement {
    /// Center X of the bounds
    pub position_x: f32,
    /// Ground height plus the configured height offset
    pub position_y: f32,
    /// Center Z of the bounds
    pub position_z: f32,
    /// Footprint width along X
    pub width: f32,
    /// Footprint depth along Z
    pub depth: f32,
}

/// Ground probe callback. Called with the downward ray origin; on a hit
/// the host writes the ground height to `out_height` and returns `true`.
/// `user_data` is passed through unchanged.
pub type GroundProbeCallback = Option<
    unsafe extern "C" fn(
        origin_x: f32,
        origin_y: f32,
        origin_z: f32,
        user_data: *mut c_void,
        out_height: *mut f32,
    ) -> bool,
>;

/// Adapter exposing a host callback as the core's `GroundProbe` capability.
struct CallbackProbe {
    callback: unsafe extern "C" fn(f32, f32, f32, *mut c_void, *mut f32) -> bool,
    user_data: *mut c_void,
}

// SAFETY: the FFI contract requires the callback and its user_data to be
// callable from the thread invoking `heatmap_generate`; the probe is only
// used within that call and never stored.
unsafe impl Send for CallbackProbe {}
unsafe impl Sync for CallbackProbe {}

impl GroundProbe for CallbackProbe {
    fn cast_down(&self, origin: Vec3) -> Option<f32> {
        let mut height = 0.0_f32;
        let hit = unsafe {
            (self.callback)(origin.x, origin.y, origin.z, self.user_data, &mut height)
        };
        hit.then_some(height)
    }
}

fn convert_bounds(bounds: &WorldBounds) -> MapBounds {
    MapBounds::new(
        bounds.min_x,
        bounds.max_x,
        bounds.min_z,
        bounds.max_z,
        bounds.min_y,
    )
}

fn convert_config(config: &GenerationConfig, stops: &[ColorStop]) -> HeatmapConfig {
    let gradient = ColorGradient::new(
        stops
            .iter()
            .map(|s| GradientStop::new(s.position, Rgba::new(s.r, s.g, s.b, s.a)))
            .collect(),
    );
    HeatmapConfig {
        resolution: config.resolution as usize,
        kernel_radius: config.kernel_radius,
        smoothing_passes: config.smoothing_passes,
        height_offset: config.height_offset,
        normalization: match config.normalization {
            NormalizationMode::Linear => NormalizationPolicy::Linear,
            NormalizationMode::Logarithmic => NormalizationPolicy::Logarithmic,
        },
        gradient,
    }
}

// ============================================================================
// GENERATION AND REPOSITIONING
// ============================================================================

/// Generate (or regenerate) the heatmap from sample positions.
///
/// Runs the full pipeline synchronously: density splatting,
/// normalization, colorization, smoothing, and placement. On success the
/// previous grid (if any) is replaced wholesale. An empty point list is
/// valid and produces an all-baseline grid.
///
/// Parameters
/// - `points`: array of `point_count` sample positions; may be null only
///   when `point_count` is 0.
/// - `stops`: array of `stop_count` gradient stops; at least one stop is
///   required.
/// - `probe` / `probe_user_data`: optional ground probe callback. When
///   null, placement falls back to `bounds.min_y`.
///
/// Returns `HeatmapErrorCode::Ok` on success; on failure the previous
/// heatmap (if any) is left untouched and `heatmap_get_last_error()`
/// describes the problem.
///
/// # Safety
///
/// - `instance` must be a valid pointer from `heatmap_new`.
/// - `points` must point to `point_count` readable `SamplePoint3` values
///   (or be null with `point_count == 0`); same for `stops`/`stop_count`.
/// - If `probe` is non-null it must be callable from this thread with
///   `probe_user_data`.
#[no_mangle]
pub unsafe extern "C" fn heatmap_generate(
    instance: *mut HeatmapInstance,
    points: *const SamplePoint3,
    point_count: usize,
    bounds: WorldBounds,
    config: GenerationConfig,
    stops: *const ColorStop,
    stop_count: usize,
    probe: GroundProbeCallback,
    probe_user_data: *mut c_void,
) -> HeatmapErrorCode {
    if points.is_null() && point_count > 0 {
        return helpers::track_error(&DefaultHeatmapError::null_pointer("points"));
    }
    if stops.is_null() && stop_count > 0 {
        return helpers::track_error(&DefaultHeatmapError::null_pointer("stops"));
    }

    let point_slice = if point_count == 0 {
        &[]
    } else {
        // SAFETY: non-null with point_count readable values per contract
        unsafe { std::slice::from_raw_parts(points, point_count) }
    };
    let stop_slice = if stop_count == 0 {
        &[]
    } else {
        // SAFETY: non-null with stop_count readable values per contract
        unsafe { std::slice::from_raw_parts(stops, stop_count) }
    };

    let sample_points: Vec<Vec3> = point_slice
        .iter()
        .map(|p| Vec3::new(p.x, p.y, p.z))
        .collect();
    let core_bounds = convert_bounds(&bounds);
    let core_config = convert_config(&config, stop_slice);

    let ground_probe: Box<dyn GroundProbe> = match probe {
        Some(callback) => Box::new(CallbackProbe {
            callback,
            user_data: probe_user_data,
        }),
        None => Box::new(NoGeometryProbe),
    };

    with_engine_write(instance, |engine| {
        match engine.generate(&sample_points, core_bounds, core_config, &*ground_probe) {
            Ok(_) => {
                clear_last_error();
                HeatmapErrorCode::Ok
            }
            Err(config_error) => {
                helpers::track_error(&DefaultHeatmapError::invalid_configuration(&config_error))
            }
        }
    })
}

/// Move the heatmap to a new height offset without regenerating the grid.
///
/// O(1) and idempotent; intended to run on every host-side configuration
/// change tick. Returns `HeatmapErrorCode::NotGenerated` while no heatmap
/// exists.
///
/// # Safety
///
/// `instance` must be a valid pointer from `heatmap_new`.
#[no_mangle]
pub unsafe extern "C" fn heatmap_reposition(
    instance: *mut HeatmapInstance,
    height_offset: f32,
) -> HeatmapErrorCode {
    with_engine_write(instance, |engine| {
        if engine.reposition(height_offset).is_some() {
            clear_last_error();
            HeatmapErrorCode::Ok
        } else {
            helpers::track_error(&DefaultHeatmapError::not_generated())
        }
    })
}

/// Re-resolve the ground height through the probe and recompute the
/// placement, leaving the grid untouched. Useful after level geometry
/// changes under an already-generated heatmap.
///
/// # Safety
///
/// `instance` must be a valid pointer from `heatmap_new`; if `probe` is
/// non-null it must be callable from this thread with `probe_user_data`.
#[no_mangle]
pub unsafe extern "C" fn heatmap_reprobe_ground(
    instance: *mut HeatmapInstance,
    probe: GroundProbeCallback,
    probe_user_data: *mut c_void,
) -> HeatmapErrorCode {
    let ground_probe: Box<dyn GroundProbe> = match probe {
        Some(callback) => Box::new(CallbackProbe {
            callback,
            user_data: probe_user_data,
        }),
        None => Box::new(NoGeometryProbe),
    };

    with_engine_write(instance, |engine| {
        if engine.reprobe_ground(&*ground_probe).is_some() {
            clear_last_error();
            HeatmapErrorCode::Ok
        } else {
            helpers::track_error(&DefaultHeatmapError::not_generated())
        }
    })
}

/// Set the render-boundary visibility flag. Generation ignores this flag;
/// it only tells the host renderer whether to show the overlay.
///
/// # Safety
///
/// `instance` must be a valid pointer from `heatmap_new`.
#[no_mangle]
pub unsafe extern "C" fn heatmap_set_visible(
    instance: *mut HeatmapInstance,
    visible: bool,
) -> HeatmapErrorCode {
    with_engine_write(instance, |engine| {
        if engine.state() == EngineState::Idle {
            return helpers::track_error(&DefaultHeatmapError::not_generated());
        }
        engine.set_visible(visible);
        clear_last_error();
        HeatmapErrorCode::Ok
    })
}

// ============================================================================
// QUERIES
// ============================================================================

/// Query the resolution of the generated grid.
///
/// # Safety
///
/// `instance` must be a valid pointer from `heatmap_new`;
/// `out_resolution` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn heatmap_resolution(
    instance: *const HeatmapInstance,
    out_resolution: *mut u32,
) -> HeatmapErrorCode {
    if out_resolution.is_null() {
        return helpers::track_error(&DefaultHeatmapError::null_pointer("out_resolution"));
    }
    with_engine_read(instance, |engine| match engine.heatmap() {
        Some(heatmap) => {
            // SAFETY: out_resolution checked non-null above
            unsafe {
                *out_resolution = heatmap.color_grid().resolution() as u32;
            }
            clear_last_error();
            HeatmapErrorCode::Ok
        }
        None => helpers::track_error(&DefaultHeatmapError::not_generated()),
    })
}

/// Copy the generated grid as RGBA8 texture data (row-major, 4 bytes per
/// cell, `resolution * resolution * 4` bytes total).
///
/// `out_written` (optional) receives the number of bytes copied.
///
/// # Safety
///
/// - `instance` must be a valid pointer from `heatmap_new`.
/// - `out_buffer` must point to at least `buffer_len` writable bytes.
/// - `out_written` may be null, otherwise it must be writable.
#[no_mangle]
pub unsafe extern "C" fn heatmap_texture_rgba8(
    instance: *const HeatmapInstance,
    out_buffer: *mut u8,
    buffer_len: usize,
    out_written: *mut usize,
) -> HeatmapErrorCode {
    if out_buffer.is_null() {
        return helpers::track_error(&DefaultHeatmapError::null_pointer("out_buffer"));
    }
    with_engine_read(instance, |engine| match engine.heatmap() {
        Some(heatmap) => {
            let bytes = heatmap.color_grid().to_rgba_bytes();
            if bytes.len() > buffer_len {
                return helpers::track_error(&DefaultHeatmapError::buffer_too_small(
                    bytes.len(),
                    buffer_len,
                ));
            }
            // SAFETY: out_buffer holds at least buffer_len >= bytes.len()
            // writable bytes per contract
            unsafe {
                ptr::copy_nonoverlapping(bytes.as_ptr(), out_buffer, bytes.len());
                if !out_written.is_null() {
                    *out_written = bytes.len();
                }
            }
            clear_last_error();
            HeatmapErrorCode::Ok
        }
        None => helpers::track_error(&DefaultHeatmapError::not_generated()),
    })
}

/// Query the world-space placement of the generated grid.
///
/// # Safety
///
/// `instance` must be a valid pointer from `heatmap_new`;
/// `out_placement` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn heatmap_get_placement(
    instance: *const HeatmapInstance,
    out_placement: *mut Placement,
) -> HeatmapErrorCode {
    if out_placement.is_null() {
        return helpers::track_error(&DefaultHeatmapError::null_pointer("out_placement"));
    }
    with_engine_read(instance, |engine| match engine.heatmap() {
        Some(heatmap) => {
            let placement = heatmap.placement();
            // SAFETY: out_placement checked non-null above
            unsafe {
                *out_placement = Placement {
                    position_x: placement.position.x,
                    position_y: placement.position.y,
                    position_z: placement.position.z,
                    width: placement.size.0,
                    depth: placement.size.1,
                };
            }
            clear_last_error();
            HeatmapErrorCode::Ok
        }
        None => helpers::track_error(&DefaultHeatmapError::not_generated()),
    })
}

/// Query the render-boundary visibility flag.
///
/// # Safety
///
/// `instance` must be a valid pointer from `heatmap_new`;
/// `out_visible` must be non-null and writable.
#[no_mangle]
pub unsafe extern "C" fn heatmap_is_visible(
    instance: *const HeatmapInstance,
    out_visible: *mut bool,
) -> HeatmapErrorCode {
    if out_visible.is_null() {
        return helpers::track_error(&DefaultHeatmapError::null_pointer("out_visible"));
    }
    with_engine_read(instance, |engine| match engine.heatmap() {
        Some(heatmap) => {
            // SAFETY: out_visible checked non-null above
            unsafe {
                *out_visible = heatmap.visible();
            }
            clear_last_error();
            HeatmapErrorCode::Ok
        }
        None => helpers::track_error(&DefaultHeatmapError::not_generated()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: [ColorStop; 2] = [
        ColorStop {
            position: 0.0,
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 0.0,
        },
        ColorStop {
            position: 1.0,
            r: 1.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        },
    ];

    fn test_bounds() -> WorldBounds {
        WorldBounds {
            min_x: -10.0,
            max_x: 10.0,
            min_z: -10.0,
            max_z: 10.0,
            min_y: -2.0,
        }
    }

    fn test_config() -> GenerationConfig {
        GenerationConfig {
            resolution: 33,
            kernel_radius: 3.0,
            smoothing_passes: 1,
            height_offset: 0.5,
            normalization: NormalizationMode::Logarithmic,
        }
    }

    unsafe extern "C" fn flat_ground(
        _x: f32,
        _y: f32,
        _z: f32,
        _user_data: *mut c_void,
        out_height: *mut f32,
    ) -> bool {
        unsafe {
            *out_height = 4.0;
        }
        true
    }

    fn new_instance() -> *mut HeatmapInstance {
        let mut raw: *mut HeatmapInstance = ptr::null_mut();
        assert_eq!(unsafe { heatmap_new(&mut raw) }, HeatmapErrorCode::Ok);
        raw
    }

    #[test]
    fn test_generate_texture_and_placement_round_trip() {
        let inst = new_instance();
        let points = [SamplePoint3 {
            x: 0.0,
            y: 1.0,
            z: 0.0,
        }];

        let code = unsafe {
            heatmap_generate(
                inst,
                points.as_ptr(),
                points.len(),
                test_bounds(),
                test_config(),
                STOPS.as_ptr(),
                STOPS.len(),
                Some(flat_ground),
                ptr::null_mut(),
            )
        };
        assert_eq!(code, HeatmapErrorCode::Ok);

        let mut resolution = 0u32;
        assert_eq!(
            unsafe { heatmap_resolution(inst, &mut resolution) },
            HeatmapErrorCode::Ok
        );
        assert_eq!(resolution, 33);

        let mut buffer = vec![0u8; 33 * 33 * 4];
        let mut written = 0usize;
        assert_eq!(
            unsafe { heatmap_texture_rgba8(inst, buffer.as_mut_ptr(), buffer.len(), &mut written) },
            HeatmapErrorCode::Ok
        );
        assert_eq!(written, buffer.len());
        // The center cell normalized to 1.0 and is fully red
        let center = (16 * 33 + 16) * 4;
        assert_eq!(buffer[center], 255);

        let mut placement = Placement {
            position_x: 0.0,
            position_y: 0.0,
            position_z: 0.0,
            width: 0.0,
            depth: 0.0,
        };
        assert_eq!(
            unsafe { heatmap_get_placement(inst, &mut placement) },
            HeatmapErrorCode::Ok
        );
        // Probe hit at 4.0 plus the 0.5 offset
        assert!((placement.position_y - 4.5).abs() < 1e-6);
        assert!((placement.width - 20.0).abs() < 1e-6);

        unsafe { heatmap_destroy(inst) };
    }

    #[test]
    fn test_invalid_configuration_is_reported() {
        let inst = new_instance();
        let mut config = test_config();
        config.kernel_radius = -1.0;

        let code = unsafe {
            heatmap_generate(
                inst,
                ptr::null(),
                0,
                test_bounds(),
                config,
                STOPS.as_ptr(),
                STOPS.len(),
                None,
                ptr::null_mut(),
            )
        };
        assert_eq!(code, HeatmapErrorCode::InvalidConfiguration);
        assert_eq!(
            heatmap_get_last_error_code(),
            HeatmapErrorCode::InvalidConfiguration
        );
        assert!(!heatmap_get_last_error().is_null());

        unsafe { heatmap_destroy(inst) };
    }

    #[test]
    fn test_queries_before_generation_report_not_generated() {
        let inst = new_instance();
        let mut resolution = 0u32;
        assert_eq!(
            unsafe { heatmap_resolution(inst, &mut resolution) },
            HeatmapErrorCode::NotGenerated
        );
        assert_eq!(
            unsafe { heatmap_reposition(inst, 1.0) },
            HeatmapErrorCode::NotGenerated
        );
        unsafe { heatmap_destroy(inst) };
    }

    #[test]
    fn test_texture_buffer_too_small() {
        let inst = new_instance();
        let code = unsafe {
            heatmap_generate(
                inst,
                ptr::null(),
                0,
                test_bounds(),
                test_config(),
                STOPS.as_ptr(),
                STOPS.len(),
                None,
                ptr::null_mut(),
            )
        };
        assert_eq!(code, HeatmapErrorCode::Ok);

        let mut tiny = [0u8; 16];
        assert_eq!(
            unsafe { heatmap_texture_rgba8(inst, tiny.as_mut_ptr(), tiny.len(), ptr::null_mut()) },
            HeatmapErrorCode::BufferTooSmall
        );
        unsafe { heatmap_destroy(inst) };
    }
}
