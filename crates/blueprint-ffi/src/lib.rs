//! C ABI bindings for blueprint-core.
//!
//! A caller creates a [`Blueprint`] handle, runs any number of verifications
//! through it, reads the diagnostic of the most recent one, and destroys it:
//!
//! ```c
//! #include "blueprint.h"
//!
//! Blueprint *bp = blueprint_create();
//! if (!blueprint_verify(bp, schema_text, data_text)) {
//!     fprintf(stderr, "%s\n", blueprint_error(bp));
//! }
//! blueprint_destroy(bp);
//! ```
//!
//! The pointer returned by [`blueprint_error`] is owned by the handle and
//! stays valid until the next [`blueprint_verify`] or [`blueprint_destroy`]
//! on that handle. Handles are not synchronized; use one per thread.

use std::ffi::{c_char, CStr, CString};
use std::panic::{self, AssertUnwindSafe};

const VERSION: &CStr = c"0.1.0";
const INVALID_HANDLE: &CStr = c"invalid handle: null pointer";

/// Opaque verifier handle holding the last diagnostic.
#[derive(Debug, Default)]
pub struct Blueprint {
    last_error: CString,
}

impl Blueprint {
    fn record(&mut self, outcome: Result<(), String>) -> bool {
        match outcome {
            Ok(()) => {
                self.last_error = CString::default();
                true
            }
            Err(message) => {
                tracing::debug!(error = %message, "verification failed");
                // Interior NULs cannot cross the boundary.
                self.last_error = CString::new(message.replace('\0', "")).unwrap_or_default();
                false
            }
        }
    }
}

/// Return the library version as a static NUL-terminated string.
#[no_mangle]
pub extern "C" fn blueprint_version() -> *const c_char {
    VERSION.as_ptr()
}

/// Allocate a new handle. Release it with [`blueprint_destroy`].
#[no_mangle]
pub extern "C" fn blueprint_create() -> *mut Blueprint {
    Box::into_raw(Box::default())
}

/// Release a handle. A null pointer is ignored.
///
/// # Safety
/// `handle` must be null or a pointer returned by [`blueprint_create`] that
/// has not already been destroyed.
#[no_mangle]
pub unsafe extern "C" fn blueprint_destroy(handle: *mut Blueprint) {
    if handle.is_null() {
        return;
    }
    drop(Box::from_raw(handle));
}

/// Verify `data` against `schema`. Returns `false` on a null handle, on
/// unreadable text, on malformed JSON, or on a failed constraint; in all but
/// the first case the diagnostic is available from [`blueprint_error`].
///
/// # Safety
/// `handle` must be null or a live handle from [`blueprint_create`].
/// `schema` and `data` must each be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn blueprint_verify(
    handle: *mut Blueprint,
    schema: *const c_char,
    data: *const c_char,
) -> bool {
    let Some(handle) = handle.as_mut() else {
        return false;
    };

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let schema = read_text(schema, "schema")?;
        let data = read_text(data, "data")?;
        blueprint_core::verify(schema, data).map_err(|e| e.to_string())
    }))
    .unwrap_or_else(|_| Err("internal error: verification panicked".to_string()));

    handle.record(outcome)
}

/// Return the diagnostic of the most recent [`blueprint_verify`] on this
/// handle, or an empty string if it succeeded (or none has run yet).
///
/// # Safety
/// `handle` must be null or a live handle from [`blueprint_create`].
#[no_mangle]
pub unsafe extern "C" fn blueprint_error(handle: *const Blueprint) -> *const c_char {
    match handle.as_ref() {
        Some(handle) => handle.last_error.as_ptr(),
        None => INVALID_HANDLE.as_ptr(),
    }
}

unsafe fn read_text<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{what} text is a null pointer"));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|e| format!("{what} text is not valid UTF-8: {e}"))
}
