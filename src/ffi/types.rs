//! C-compatible type definitions
//!
//! Opaque handles passed across the C FFI boundary. C code only ever sees
//! pointers to these types; the layout behind them is Rust-owned.

use crate::PhoneNumbers;
use std::ffi::CString;
use std::os::raw::c_char;

/// Opaque handle for a forwarding registry
#[repr(C)]
pub struct CPhoneForward {
    _private: [u8; 0],
}

/// Opaque handle for a query result
#[repr(C)]
pub struct CPhoneNumbers {
    _private: [u8; 0],
}

/// Query result with NUL-terminated copies of each number
///
/// Pointers returned by [`as_ptr`](Self::as_ptr) stay valid until the
/// sequence is dropped.
#[derive(Debug, Default)]
pub struct CNumberSequence {
    numbers: Vec<CString>,
}

impl CNumberSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// Pointer to the entry at `idx`, or null when out of range
    pub fn as_ptr(&self, idx: usize) -> *const c_char {
        self.numbers
            .get(idx)
            .map_or(std::ptr::null(), |number| number.as_ptr())
    }
}

impl From<PhoneNumbers> for CNumberSequence {
    fn from(numbers: PhoneNumbers) -> Self {
        // Valid numbers never contain NUL, so nothing is dropped here.
        Self {
            numbers: numbers
                .into_iter()
                .filter_map(|number| CString::new(number).ok())
                .collect(),
        }
    }
}
