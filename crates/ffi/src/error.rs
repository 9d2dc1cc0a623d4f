use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use heatmap_core::ConfigError;

/// Common interface for FFI error types.
///
/// This trait provides a unified way to handle errors across the FFI boundary,
/// allowing both simple error codes and custom error messages.
///
/// # Design
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait HeatmapFfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> HeatmapErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `HeatmapFfiError` for common FFI error scenarios.
///
/// This struct wraps a `HeatmapErrorCode` and provides convenient constructors
/// for each error type (except Ok, which represents success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultHeatmapError {
    code: HeatmapErrorCode,
    msg: String,
}

impl DefaultHeatmapError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: HeatmapErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    ///
    /// # Arguments
    /// * `lock_name` - The name of the lock that was poisoned (e.g., `"RwLock"`)
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: HeatmapErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an invalid generation configuration, carrying the
    /// core validation message across the boundary.
    pub fn invalid_configuration(error: &ConfigError) -> Self {
        Self {
            code: HeatmapErrorCode::InvalidConfiguration,
            msg: error.to_string(),
        }
    }

    /// Create error for operations that require a generated heatmap while
    /// the engine is still idle.
    pub fn not_generated() -> Self {
        Self {
            code: HeatmapErrorCode::NotGenerated,
            msg: "No heatmap has been generated yet".to_string(),
        }
    }

    /// Create error for an output buffer smaller than the data to copy.
    ///
    /// # Arguments
    /// * `needed` - Required buffer size in bytes
    /// * `got` - Size of the buffer the caller supplied
    pub fn buffer_too_small(needed: usize, got: usize) -> Self {
        Self {
            code: HeatmapErrorCode::BufferTooSmall,
            msg: format!("Output buffer too small: need {needed} bytes, got {got}"),
        }
    }
}

impl HeatmapFfiError for DefaultHeatmapError {
    fn code(&self) -> HeatmapErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by heatmap functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatmapErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid configuration: degenerate bounds, resolution out of range,
    /// non-positive kernel radius, or empty gradient.
    InvalidConfiguration = 3,

    /// Operation requires a generated heatmap, but none exists yet.
    NotGenerated = 4,

    /// Caller-supplied output buffer is too small for the data.
    BufferTooSmall = 5,
}

impl From<DefaultHeatmapError> for HeatmapErrorCode {
    fn from(error: DefaultHeatmapError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// Allows callers to retrieve diagnostic information after a failed operation.
    /// The CString is stored to prevent memory leaks when returning raw pointers via FFI.
    static LAST_ERROR: RefCell<(Option<CString>, HeatmapErrorCode)> = const { RefCell::new((None, HeatmapErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, HeatmapErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, HeatmapErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if no error has occurred or the error message cannot be converted to C string.
///
/// # Thread Safety
/// Error messages are stored per-thread (thread-local storage), so this is thread-safe.
/// Each thread has its own independent error state.
///
/// # Lifetime
/// The returned pointer is valid until:
/// - The next FFI call on this thread that sets or clears the error
/// - The thread terminates
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
#[no_mangle]
pub extern "C" fn heatmap_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code.
///
/// Returns:
/// - `HeatmapErrorCode::Ok` (0) if no error has occurred
/// - The specific error code from the last failed operation
///
/// # Thread Safety
/// Error codes are stored per-thread (thread-local storage), so this is thread-safe.
/// Each thread has its own independent error state.
#[no_mangle]
pub extern "C" fn heatmap_get_last_error_code() -> HeatmapErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
