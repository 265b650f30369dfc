//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Decoded values cross the boundary as normalized JSON text rather than a
//! mirrored C struct tree: typed records serialize to objects keyed by their
//! snake-case field names, so the C side sees the same structure either way.
//! Conversion functions live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use duckduck_core::{ApiError, Value};

/// Error codes returned in `FfiDecodeResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Argument = 1,
    Connection = 2,
    Deserialization = 3,
    Panic = 4,
    NullArg = 5,
}

/// Result envelope for `ddg_decode_body`.
///
/// On success `error_code` is `Ok`, `error_message` is null, `json` holds the
/// normalized document and `shape` names the top-level record (null when the
/// document is not a typed record).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `json` and `shape` are null.
#[repr(C)]
pub struct FfiDecodeResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub json: *mut c_char,
    pub shape: *mut c_char,
}

impl FfiDecodeResult {
    /// Build a success result from a decoded value.
    pub(crate) fn ok(value: Value) -> *mut Self {
        let text = match serde_json::to_string(&value) {
            Ok(text) => text,
            Err(e) => return Self::error(FfiErrorCode::Deserialization, &e.to_string()),
        };
        let shape = match value.shape() {
            Some(shape) => to_c_string(shape.name()),
            None => std::ptr::null_mut(),
        };
        Box::into_raw(Box::new(FfiDecodeResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            json: to_c_string(&text),
            shape,
        }))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::Argument(_) => FfiErrorCode::Argument,
            ApiError::Connection(_) => FfiErrorCode::Connection,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
        };
        Self::error(code, &err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }

    fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiDecodeResult {
            error_code,
            error_message: to_c_string(msg),
            json: std::ptr::null_mut(),
            shape: std::ptr::null_mut(),
        }))
    }
}

/// Allocate a C string. Interior NULs (possible in JSON-escaped text only as
/// `\u0000`, never raw) are stripped rather than failing.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s)
        .unwrap_or_else(|_| CString::new(s.replace('\0', "")).unwrap_or_default())
        .into_raw()
}
