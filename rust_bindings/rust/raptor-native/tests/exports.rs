//! Calls the exported C functions the way a foreign host does: raw pointers,
//! explicit capacities, NUL-terminated results.

use std::ffi::{c_char, CStr};

use raptor_native::ffi::{
    addNumbers, fillString, fillStringChecked, getMessageLength, raptorNativeVersion,
    RAPTOR_ERROR_CAPACITY_EXCEEDED, RAPTOR_ERROR_NULL_BUFFER, RAPTOR_ERROR_ZERO_CAPACITY,
    RAPTOR_SUCCESS,
};

fn fill(capacity: usize) -> Vec<u8> {
    let mut buffer = vec![0x7Fu8; capacity];
    unsafe { fillString(buffer.as_mut_ptr().cast::<c_char>(), buffer.len()) };
    buffer
}

#[test]
fn add_numbers_export() {
    assert_eq!(addNumbers(2, 3), 5);
    assert_eq!(addNumbers(-1, 1), 0);
    assert_eq!(addNumbers(10, 15), 25);
}

#[test]
fn message_length_export() {
    assert_eq!(getMessageLength(), 14);
}

#[test]
fn fill_string_with_room_to_spare() {
    let buffer = fill(20);
    let text = CStr::from_bytes_until_nul(&buffer).unwrap();
    assert_eq!(text.to_str().unwrap(), "Hello from C++");
}

#[test]
fn fill_string_truncates() {
    assert_eq!(fill(5), b"Hell\0");
}

#[test]
fn fill_string_boundary_capacity() {
    assert_eq!(fill(15), b"Hello from C++\0");
}

#[test]
fn fill_string_sized_like_the_host() {
    // the host allocates getMessageLength() + 1 bytes
    let buffer = fill(getMessageLength() + 1);
    assert_eq!(buffer.last(), Some(&0));
    assert_eq!(&buffer[..buffer.len() - 1], b"Hello from C++");
}

#[test]
fn fill_string_zero_capacity_writes_nothing() {
    let mut sentinel = [0x7Fu8; 4];
    unsafe { fillString(sentinel.as_mut_ptr().cast::<c_char>(), 0) };
    assert_eq!(sentinel, [0x7F; 4]);
}

#[test]
fn fill_string_checked_codes() {
    let mut buffer = [0x7Fu8; 20];
    let ptr = buffer.as_mut_ptr().cast::<c_char>();

    assert_eq!(unsafe { fillStringChecked(ptr, 20) }, RAPTOR_SUCCESS);
    assert_eq!(&buffer[..15], b"Hello from C++\0");

    assert_eq!(unsafe { fillStringChecked(ptr, 0) }, RAPTOR_ERROR_ZERO_CAPACITY);
    assert_eq!(
        unsafe { fillStringChecked(std::ptr::null_mut(), 20) },
        RAPTOR_ERROR_NULL_BUFFER
    );

    assert_eq!(
        unsafe { fillStringChecked(ptr, 14) },
        RAPTOR_ERROR_CAPACITY_EXCEEDED
    );
    assert_eq!(buffer[0], 0);
}

#[test]
fn repeated_calls_do_not_change() {
    for _ in 0..3 {
        assert_eq!(fill(20)[..15], fill(20)[..15]);
        assert_eq!(getMessageLength(), 14);
    }
}

#[test]
fn version_export_matches_crate() {
    let version = unsafe { CStr::from_ptr(raptorNativeVersion()) };
    assert_eq!(version.to_str().unwrap(), raptor_native::version());
}
