//! raptor-other - companion shared library
//!
//! The host loads this library before `raptor-native` and resolves `addOne`
//! from it.

#![allow(non_snake_case)]

use std::ffi::c_int;

use tracing::trace;

/// Returns `x + 1`, wrapping on overflow
pub fn add_one(x: i32) -> i32 {
    x.wrapping_add(1)
}

#[no_mangle]
pub extern "C" fn addOne(x: c_int) -> c_int {
    trace!(x, "addOne");
    add_one(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_one() {
        assert_eq!(add_one(10), 11);
        assert_eq!(add_one(-1), 0);
        assert_eq!(add_one(i32::MAX), i32::MIN);
    }

    #[test]
    fn test_export_matches_safe_fn() {
        for x in [-5, 0, 10, 41] {
            assert_eq!(addOne(x), add_one(x));
        }
    }
}
