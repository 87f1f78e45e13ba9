//! C-linkage exports
//!
//! Everything here is resolved by symbol name from the host runtime, so the
//! names follow the host's camelCase convention instead of Rust's.
//! Use the safe functions in the parent module from Rust code.

#![allow(non_snake_case)]

use std::ffi::{c_char, c_int, CStr};
use std::slice;
use std::sync::Once;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::ShimError;

pub const RAPTOR_SUCCESS: c_int = 0;
pub const RAPTOR_ERROR_NULL_BUFFER: c_int = 1;
pub const RAPTOR_ERROR_ZERO_CAPACITY: c_int = 2;
pub const RAPTOR_ERROR_CAPACITY_EXCEEDED: c_int = 3;

static VERSION: &CStr = match CStr::from_bytes_with_nul(
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes(),
) {
    Ok(version) => version,
    Err(_) => panic!("package version contains a NUL byte"),
};

/// Installs a stdout log subscriber for this library's own events, filtered
/// by `RUST_LOG` (default `raptor_native=debug`). Only the first call has
/// any effect.
///
/// A host loading the `cdylib` gets a separate copy of the tracing
/// dispatcher, so without this the Greeter diagnostics are discarded.
#[no_mangle]
pub extern "C" fn raptorNativeInitLogging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("raptor_native=debug"));
        // another subscriber already installed is fine
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
}

/// Returns `a + b`, wrapping on overflow.
#[no_mangle]
pub extern "C" fn addNumbers(a: c_int, b: c_int) -> c_int {
    crate::add_numbers(a, b)
}

/// Copies the greeting into `buffer`, truncated to `capacity - 1` bytes and
/// always NUL-terminated. A null `buffer` or zero `capacity` writes nothing.
///
/// # Safety
///
/// `buffer` must be null or point to at least `capacity` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn fillString(buffer: *mut c_char, capacity: usize) {
    if buffer.is_null() || capacity == 0 {
        warn!(capacity, "fillString called without a usable buffer");
        return;
    }

    let buffer = slice::from_raw_parts_mut(buffer.cast::<u8>(), capacity);
    // capacity is non-zero, so this cannot fail
    let _ = crate::fill_greeting(buffer);
}

/// Copies the whole greeting into `buffer` and returns `RAPTOR_SUCCESS`, or
/// an error code if it does not fit. On `RAPTOR_ERROR_CAPACITY_EXCEEDED` the
/// buffer holds an empty string.
///
/// # Safety
///
/// `buffer` must be null or point to at least `capacity` writable bytes.
#[no_mangle]
pub unsafe extern "C" fn fillStringChecked(buffer: *mut c_char, capacity: usize) -> c_int {
    if buffer.is_null() {
        return ShimError::NullBuffer.code();
    }
    if capacity == 0 {
        return ShimError::ZeroCapacity.code();
    }

    let buffer = slice::from_raw_parts_mut(buffer.cast::<u8>(), capacity);
    match crate::fill_greeting_exact(buffer) {
        Ok(_) => RAPTOR_SUCCESS,
        Err(e) => e.code(),
    }
}

/// Byte length of the greeting, without a terminator.
#[no_mangle]
pub extern "C" fn getMessageLength() -> usize {
    crate::greeting_length()
}

/// Static NUL-terminated version string. The caller must not free it.
#[no_mangle]
pub extern "C" fn raptorNativeVersion() -> *const c_char {
    VERSION.as_ptr()
}
