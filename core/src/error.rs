//! Error types for the instant answer client.
//!
//! # Design
//! Three failure categories reach the caller: a bad argument (rejected before
//! any I/O), a transport failure, and a body that could not be turned into a
//! value. Each carries the reason as text so it survives the FFI boundary.

use thiserror::Error;

/// Errors returned by the query, decode and request-building operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// An argument was rejected before any network activity, e.g. an unknown
    /// container name.
    #[error("invalid argument: {0}")]
    Argument(String),

    /// Host resolution or another transport-level failure.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The body was not UTF-8 or not JSON, or (strict mode) an object matched
    /// no known shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
