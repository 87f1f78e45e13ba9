//! raptor-native - C-linkage export shim for a foreign host runtime
//!
//! This crate builds a shared library (`cdylib`) whose flat C functions can be
//! resolved by name from another runtime, and the same logic as a safe Rust
//! API (`rlib`).
//!
//! # Exported symbols
//!
//! - `addNumbers(int, int) -> int`
//! - `fillString(char*, size_t)`: truncating copy of the greeting
//! - `fillStringChecked(char*, size_t) -> int`: non-truncating copy with a status code
//! - `getMessageLength() -> size_t`
//! - `raptorNativeVersion() -> const char*`
//! - `raptorNativeInitLogging()`: print this library's diagnostics to stdout
//!
//! A C header for these is generated at build time into
//! `$OUT_DIR/raptor_native.h`.
//!
//! # Examples
//!
//! ```
//! use raptor_native::{add_numbers, fill_greeting, greeting_length};
//!
//! assert_eq!(add_numbers(2, 3), 5);
//!
//! let mut buffer = [0u8; 20];
//! let written = fill_greeting(&mut buffer).expect("buffer is not empty");
//! assert_eq!(written, greeting_length());
//! assert_eq!(&buffer[..=written], b"Hello from C++\0");
//! ```

mod error;
pub mod ffi;

pub use error::{Result, ShimError};

use tracing::debug;

/// The text held by every [`Greeter`]
pub const GREETING: &str = "Hello from C++";

/// Value type holding the fixed greeting.
///
/// A fresh `Greeter` is built for every string call and dropped when the
/// call returns; both events are reported as `debug` tracing events.
#[derive(Debug)]
pub struct Greeter {
    message: &'static str,
}

impl Greeter {
    /// Create a new greeter
    pub fn new() -> Self {
        debug!("Constructor called");
        Greeter { message: GREETING }
    }

    /// The greeting text
    pub fn text(&self) -> &str {
        self.message
    }

    /// Byte length of the greeting, without a terminator
    pub fn len(&self) -> usize {
        self.message.len()
    }

    /// Whether the greeting has no text
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

impl Default for Greeter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Greeter {
    fn drop(&mut self) {
        debug!("Destructor called");
    }
}

/// Add two integers, wrapping on overflow
pub fn add_numbers(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

/// Byte length of the greeting, without a terminator
pub fn greeting_length() -> usize {
    let greeter = Greeter::new();
    greeter.len()
}

/// Copy the greeting into `buffer`, truncating to fit.
///
/// The result is always NUL-terminated. If the greeting and its terminator
/// fit, the whole greeting is copied; otherwise the first
/// `buffer.len() - 1` bytes are copied and the terminator goes in the last
/// slot. Bytes past the terminator are left untouched.
///
/// Returns the number of text bytes written, excluding the terminator.
///
/// # Errors
///
/// [`ShimError::ZeroCapacity`] if `buffer` is empty; nothing is written.
pub fn fill_greeting(buffer: &mut [u8]) -> Result<usize> {
    let greeter = Greeter::new();
    write_truncated(greeter.text().as_bytes(), buffer)
}

/// Copy the whole greeting into `buffer` or fail.
///
/// # Errors
///
/// - [`ShimError::ZeroCapacity`] if `buffer` is empty.
/// - [`ShimError::CapacityExceeded`] if the greeting plus terminator does
///   not fit. The buffer is left holding an empty string.
pub fn fill_greeting_exact(buffer: &mut [u8]) -> Result<usize> {
    let greeter = Greeter::new();
    write_exact(greeter.text().as_bytes(), buffer)
}

/// Version of this crate, also exported as `raptorNativeVersion`
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

fn write_truncated(text: &[u8], buffer: &mut [u8]) -> Result<usize> {
    let room = buffer.len().checked_sub(1).ok_or(ShimError::ZeroCapacity)?;
    let count = text.len().min(room);

    buffer[..count].copy_from_slice(&text[..count]);
    buffer[count] = 0;

    Ok(count)
}

fn write_exact(text: &[u8], buffer: &mut [u8]) -> Result<usize> {
    let required = text.len() + 1;
    let capacity = buffer.len();

    if capacity == 0 {
        return Err(ShimError::ZeroCapacity);
    }
    if required > capacity {
        buffer[0] = 0;
        return Err(ShimError::CapacityExceeded { required, capacity });
    }

    write_truncated(text, buffer)
}
