//! C-ABI wrapper around `duckduck-core`.
//!
//! # Overview
//! Exposes the I/O-free half of the client through `extern "C"` functions:
//! the C caller builds the request path here, performs the GET itself, and
//! hands the body back for decoding into normalized JSON.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiDecodeResult` envelope conveys success payloads and errors
//!   uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `ddg_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use duckduck_core::{build_path, decode_body, Hook, RequestFlags};

use types::*;

/// Borrow a C string as `&str`, or `None` when null or not UTF-8.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that outlives the
/// returned reference.
unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Build the request path (`/?q=...&format=json...`) for `query`.
///
/// Returns null if `query` is null or not UTF-8.
/// The caller must free the returned string with `ddg_free_string`.
#[unsafe(no_mangle)]
pub extern "C" fn ddg_build_path(
    query: *const c_char,
    no_redirect: bool,
    no_html: bool,
    skip_disambig: bool,
) -> *mut c_char {
    catch_unwind(|| {
        let Some(query) = (unsafe { borrow_str(query) }) else {
            return std::ptr::null_mut();
        };
        let flags = RequestFlags {
            no_redirect,
            no_html,
            skip_disambig,
        };
        to_c_string(&build_path(query, flags))
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

/// Decode a response body with the named container (`"record"` or `"map"`).
///
/// `body` is the raw response text. An unknown container is an `Argument`
/// error in strict mode; in lenient mode the body is decoded without key
/// normalization.
#[unsafe(no_mangle)]
pub extern "C" fn ddg_decode_body(
    body: *const c_char,
    container: *const c_char,
    strict: bool,
) -> *mut FfiDecodeResult {
    catch_unwind(|| {
        if body.is_null() {
            return FfiDecodeResult::null_arg("body");
        }
        let Some(container) = (unsafe { borrow_str(container) }) else {
            return FfiDecodeResult::null_arg("container");
        };
        let body = unsafe { CStr::from_ptr(body) }.to_bytes();

        let hook = match Hook::named(container, strict) {
            Ok(hook) => hook,
            Err(e) => return FfiDecodeResult::from_error(e),
        };
        match decode_body(body, hook.as_ref()) {
            Ok(value) => FfiDecodeResult::ok(value),
            Err(e) => FfiDecodeResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiDecodeResult::panic("panic in ddg_decode_body"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiDecodeResult` returned by `ddg_decode_body`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ddg_free_result(result: *mut FfiDecodeResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        for s in [result.error_message, result.json, result.shape] {
            if !s.is_null() {
                drop(unsafe { CString::from_raw(s) });
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn ddg_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
