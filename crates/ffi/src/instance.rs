use std::sync::RwLock;

use heatmap_core::HeatmapEngine;

use crate::error::HeatmapErrorCode;
use crate::helpers::{clear_last_error, track_error};
use crate::DefaultHeatmapError;

/// The main heatmap engine context.
/// Holds the engine state (idle or a finished grid plus placement).
///
/// # Thread Safety
/// `HeatmapInstance` is thread-safe and can be shared across threads in a
/// host engine. The inner engine is protected by an `RwLock`, allowing:
/// - **Multiple concurrent readers** (texture and placement queries): `.read()` lock
/// - **Exclusive writer** (generation, reposition, visibility): `.write()` lock
///
/// Generation is synchronous: `heatmap_generate` holds the write lock for
/// the duration of the pipeline, so readers never observe a partial grid.
pub struct HeatmapInstance {
    pub(crate) engine: RwLock<HeatmapEngine>,
}

impl HeatmapInstance {
    pub(crate) fn new() -> Box<Self> {
        Box::new(Self {
            engine: RwLock::new(HeatmapEngine::new()),
        })
    }
}

/// Create a new idle heatmap instance and return it via out-parameter.
///
/// This function follows standard C error handling conventions:
/// - Returns `HeatmapErrorCode::Ok` (0) on success with a valid instance in `out_instance`
/// - Returns non-zero error code on failure with `out_instance` set to null
///
/// The instance starts idle; call `heatmap_generate` to produce a grid.
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller takes ownership of the returned instance and MUST call
///   `heatmap_destroy` exactly once to avoid memory leaks.
#[no_mangle]
pub unsafe extern "C" fn heatmap_new(out_instance: *mut *mut HeatmapInstance) -> HeatmapErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultHeatmapError::null_pointer("out_instance"));
    }

    let instance = HeatmapInstance::new();
    unsafe {
        *out_instance = Box::into_raw(instance);
    }
    clear_last_error();
    HeatmapErrorCode::Ok
}

/// Destroys a heatmap instance previously created by `heatmap_new`.
///
/// Behavior:
/// - If `ptr` is null, this function is a no-op.
/// - Otherwise the instance and its grid are dropped and the allocation freed.
///
/// # Safety
/// - The pointer MUST have been created by `heatmap_new`.
/// - The pointer MUST NOT have been freed already or otherwise invalidated.
/// - After calling this function, the caller must not use the pointer again.
#[no_mangle]
pub unsafe extern "C" fn heatmap_destroy(ptr: *mut HeatmapInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: The pointer must have been created by `Box::into_raw` in
    // `heatmap_new` and not freed elsewhere. Null is checked above.
    // `Box::from_raw` reclaims ownership and drops the instance.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}

/// Shared read access to the engine behind a raw instance pointer.
/// Returns the appropriate error code for null pointers and poisoned locks.
pub(crate) fn with_engine_read<F>(instance: *const HeatmapInstance, func: F) -> HeatmapErrorCode
where
    F: FnOnce(&HeatmapEngine) -> HeatmapErrorCode,
{
    let Some(instance) = (unsafe { instance.as_ref() }) else {
        return track_error(&DefaultHeatmapError::null_pointer("instance"));
    };
    match instance.engine.read() {
        Ok(engine) => func(&engine),
        Err(_) => track_error(&DefaultHeatmapError::lock_poisoned("RwLock")),
    }
}

/// Exclusive write access to the engine behind a raw instance pointer.
pub(crate) fn with_engine_write<F>(instance: *mut HeatmapInstance, func: F) -> HeatmapErrorCode
where
    F: FnOnce(&mut HeatmapEngine) -> HeatmapErrorCode,
{
    let Some(instance) = (unsafe { instance.as_ref() }) else {
        return track_error(&DefaultHeatmapError::null_pointer("instance"));
    };
    match instance.engine.write() {
        Ok(mut engine) => func(&mut engine),
        Err(_) => track_error(&DefaultHeatmapError::lock_poisoned("RwLock")),
    }
}
