//! C FFI compatibility layer
//!
//! Exposes the registry through the `phfwd_*` and `phnum_*` functions so
//! existing C callers can link against this crate as a drop-in library.

pub mod c_api;
pub mod types;

// Re-export main C API
pub use c_api::*;
pub use types::{CPhoneForward, CPhoneNumbers};
