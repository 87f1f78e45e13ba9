//! Error types for the raptor-native shim

use thiserror::Error;

use crate::ffi::{
    RAPTOR_ERROR_CAPACITY_EXCEEDED, RAPTOR_ERROR_NULL_BUFFER, RAPTOR_ERROR_ZERO_CAPACITY,
};

/// Errors that can occur when copying the greeting out of the shim
#[derive(Error, Debug)]
pub enum ShimError {
    #[error("Null buffer pointer")]
    NullBuffer,

    #[error("Buffer capacity is zero, no room for the terminator")]
    ZeroCapacity,

    #[error("Buffer too small: {required} bytes required, {capacity} available")]
    CapacityExceeded { required: usize, capacity: usize },

    #[error("Unknown status code: {0}")]
    Unknown(i32),
}

impl ShimError {
    /// Status code reported across the C boundary for this error
    pub fn code(&self) -> i32 {
        match self {
            ShimError::NullBuffer => RAPTOR_ERROR_NULL_BUFFER,
            ShimError::ZeroCapacity => RAPTOR_ERROR_ZERO_CAPACITY,
            ShimError::CapacityExceeded { .. } => RAPTOR_ERROR_CAPACITY_EXCEEDED,
            ShimError::Unknown(code) => *code,
        }
    }

    /// Convert a non-success status code back into an error.
    ///
    /// `CapacityExceeded` loses its sizes on the way through the C API, so
    /// they come back as zero.
    pub fn from_code(code: i32) -> Self {
        match code {
            RAPTOR_ERROR_NULL_BUFFER => ShimError::NullBuffer,
            RAPTOR_ERROR_ZERO_CAPACITY => ShimError::ZeroCapacity,
            RAPTOR_ERROR_CAPACITY_EXCEEDED => ShimError::CapacityExceeded {
                required: 0,
                capacity: 0,
            },
            _ => ShimError::Unknown(code),
        }
    }
}

/// Result type alias for shim operations
pub type Result<T> = std::result::Result<T, ShimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for err in [
            ShimError::NullBuffer,
            ShimError::ZeroCapacity,
            ShimError::CapacityExceeded {
                required: 15,
                capacity: 4,
            },
        ] {
            assert_eq!(ShimError::from_code(err.code()).code(), err.code());
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        let err = ShimError::from_code(42);
        assert!(matches!(err, ShimError::Unknown(42)));
        assert_eq!(err.code(), 42);
    }

    #[test]
    fn test_capacity_message() {
        let err = ShimError::CapacityExceeded {
            required: 15,
            capacity: 5,
        };
        assert_eq!(
            err.to_string(),
            "Buffer too small: 15 bytes required, 5 available"
        );
    }
}
