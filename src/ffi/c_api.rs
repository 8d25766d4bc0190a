//! Main C API interface
//!
//! `phfwd_*` functions operate on a registry handle, `phnum_*` functions on
//! query results. Every handle returned here must be released with the
//! matching delete function. Null handles are accepted everywhere and turn
//! the call into a no-op.

use super::types::{CNumberSequence, CPhoneForward, CPhoneNumbers};
use crate::{PhoneForward, PhoneNumbers};
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = RefCell::new(None);
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|error| {
        *error.borrow_mut() = CString::new(msg).ok();
    });
}

/// Borrow a C string as `&str`, `None` when null or not UTF-8
///
/// Callers map `None` to the same outcome as an invalid number.
unsafe fn number_arg<'a>(num: *const c_char) -> Option<&'a str> {
    if num.is_null() {
        return None;
    }
    // SAFETY: caller guarantees `num` points to a NUL-terminated string.
    unsafe { CStr::from_ptr(num) }.to_str().ok()
}

unsafe fn registry<'a>(pf: *const CPhoneForward) -> Option<&'a PhoneForward> {
    // SAFETY: non-null handles come from `phfwd_new`.
    unsafe { (pf as *const PhoneForward).as_ref() }
}

unsafe fn registry_mut<'a>(pf: *mut CPhoneForward) -> Option<&'a mut PhoneForward> {
    // SAFETY: non-null handles come from `phfwd_new`.
    unsafe { (pf as *mut PhoneForward).as_mut() }
}

fn into_handle(numbers: PhoneNumbers) -> *mut CPhoneNumbers {
    Box::into_raw(Box::new(CNumberSequence::from(numbers))) as *mut CPhoneNumbers
}

/// Run a query, returning null for a null registry and an empty result for
/// a null or non-UTF-8 number
unsafe fn query(
    pf: *const CPhoneForward,
    num: *const c_char,
    op: impl FnOnce(&PhoneForward, &str) -> PhoneNumbers,
) -> *mut CPhoneNumbers {
    let Some(pf) = (unsafe { registry(pf) }) else {
        return ptr::null_mut();
    };
    match unsafe { number_arg(num) } {
        Some(num) => into_handle(op(pf, num)),
        None => into_handle(PhoneNumbers::new()),
    }
}

/// Get library version string
///
/// # Safety
///
/// The returned pointer is static and must not be freed.
#[no_mangle]
pub unsafe extern "C" fn phone_forward_version() -> *const c_char {
    static VERSION_CSTR: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION_CSTR.as_ptr() as *const c_char
}

/// Create an empty registry
///
/// # Safety
///
/// The returned pointer must be freed with `phfwd_delete`.
#[no_mangle]
pub unsafe extern "C" fn phfwd_new() -> *mut CPhoneForward {
    Box::into_raw(Box::new(PhoneForward::new())) as *mut CPhoneForward
}

/// Free a registry
///
/// # Safety
///
/// The pointer must be null or come from `phfwd_new`, and becomes invalid
/// after this call.
#[no_mangle]
pub unsafe extern "C" fn phfwd_delete(pf: *mut CPhoneForward) {
    if !pf.is_null() {
        // SAFETY: `pf` was produced by `Box::into_raw` in `phfwd_new`.
        drop(unsafe { Box::from_raw(pf as *mut PhoneForward) });
    }
}

/// Forward every number starting with `num1` onto `num2`
///
/// Returns `false` on a null handle, invalid numbers, identical numbers or
/// allocation failure; the registry is unchanged in every such case.
///
/// # Safety
///
/// `pf` must be null or a live registry handle. `num1` and `num2` must be
/// null or NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn phfwd_add(
    pf: *mut CPhoneForward,
    num1: *const c_char,
    num2: *const c_char,
) -> bool {
    let Some(pf) = (unsafe { registry_mut(pf) }) else {
        set_last_error("null registry handle");
        return false;
    };
    let (Some(source), Some(target)) = (unsafe { number_arg(num1) }, unsafe { number_arg(num2) })
    else {
        set_last_error("number is null or not valid UTF-8");
        return false;
    };
    match pf.add(source, target) {
        Ok(()) => true,
        Err(e) => {
            set_last_error(&e.to_string());
            false
        }
    }
}

/// Remove every forwarding whose source starts with `num`
///
/// # Safety
///
/// `pf` must be null or a live registry handle. `num` must be null or a
/// NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn phfwd_remove(pf: *mut CPhoneForward, num: *const c_char) {
    if let (Some(pf), Some(prefix)) = (unsafe { registry_mut(pf) }, unsafe { number_arg(num) }) {
        pf.remove(prefix);
    }
}

/// Forward `num`
///
/// # Safety
///
/// `pf` must be null or a live registry handle. `num` must be null or a
/// NUL-terminated string. A non-null result must be freed with
/// `phnum_delete`.
#[no_mangle]
pub unsafe extern "C" fn phfwd_get(pf: *const CPhoneForward, num: *const c_char) -> *mut CPhoneNumbers {
    unsafe { query(pf, num, PhoneForward::get) }
}

/// Candidates that may forward onto `num`
///
/// # Safety
///
/// Same contract as `phfwd_get`.
#[no_mangle]
pub unsafe extern "C" fn phfwd_reverse(pf: *const CPhoneForward, num: *const c_char) -> *mut CPhoneNumbers {
    unsafe { query(pf, num, PhoneForward::reverse) }
}

/// Numbers that forward exactly onto `num`
///
/// # Safety
///
/// Same contract as `phfwd_get`.
#[no_mangle]
pub unsafe extern "C" fn phfwd_get_reverse(
    pf: *const CPhoneForward,
    num: *const c_char,
) -> *mut CPhoneNumbers {
    unsafe { query(pf, num, PhoneForward::get_reverse) }
}

/// Number at `idx`, or null when `pnum` is null or `idx` is out of range
///
/// # Safety
///
/// `pnum` must be null or a live result handle. The returned string is owned
/// by `pnum` and valid until `phnum_delete`.
#[no_mangle]
pub unsafe extern "C" fn phnum_get(pnum: *const CPhoneNumbers, idx: usize) -> *const c_char {
    // SAFETY: non-null handles come from the query functions above.
    match unsafe { (pnum as *const CNumberSequence).as_ref() } {
        Some(seq) => seq.as_ptr(idx),
        None => ptr::null(),
    }
}

/// Number of entries in `pnum`, 0 for a null handle
///
/// # Safety
///
/// `pnum` must be null or a live result handle.
#[no_mangle]
pub unsafe extern "C" fn phnum_len(pnum: *const CPhoneNumbers) -> usize {
    // SAFETY: non-null handles come from the query functions above.
    unsafe { (pnum as *const CNumberSequence).as_ref() }.map_or(0, CNumberSequence::len)
}

/// Free a result
///
/// # Safety
///
/// The pointer must be null or come from a query function, and becomes
/// invalid after this call.
#[no_mangle]
pub unsafe extern "C" fn phnum_delete(pnum: *mut CPhoneNumbers) {
    if !pnum.is_null() {
        // SAFETY: `pnum` was produced by `Box::into_raw` in `into_handle`.
        drop(unsafe { Box::from_raw(pnum as *mut CNumberSequence) });
    }
}

/// Message of the last failed `phfwd_add` on this thread
///
/// # Safety
///
/// The returned string is valid until the next failure on this thread.
/// The caller should not free the returned pointer.
#[no_mangle]
pub unsafe extern "C" fn phfwd_last_error() -> *const c_char {
    LAST_ERROR.with(|error| match error.borrow().as_ref() {
        Some(cstring) => cstring.as_ptr(),
        None => {
            static NO_ERROR_MSG: &[u8] = b"No error information available\0";
            NO_ERROR_MSG.as_ptr() as *const c_char
        }
    })
}
