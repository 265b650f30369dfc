//! HTTP transport contract.
//!
//! # Design
//! Requests and responses are plain data, as in the host-does-IO half of the
//! crate: `build_request` produces an `HttpRequest` and `parse_response`
//! consumes an `HttpResponse` without touching the network. `query` ties
//! the two together through a `Transport`, which only has to open a
//! connection to a host, send one GET and support an explicit close.
//!
//! All fields use owned types so values can cross the FFI boundary without
//! lifetime concerns.

use crate::error::ApiError;

/// A GET request described as plain data. `path` starts with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub path: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data. The body is raw bytes; it is
/// decoded as UTF-8 by the deserialization step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

/// Opens connections to a host, plain or TLS-encrypted.
pub trait Transport {
    type Conn: Connection;

    fn connect(&self, host: &str, secure: bool) -> Result<Self::Conn, ApiError>;
}

/// One open connection. Failures of `send` are transport failures; the HTTP
/// status is reported in the response, never as an error.
pub trait Connection {
    fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;

    fn close(&mut self);
}

/// Owns a connection for the duration of one call and closes it exactly
/// once, on `close` or on drop, whichever comes first.
pub struct ScopedConnection<C: Connection> {
    inner: C,
    closed: bool,
}

impl<C: Connection> ScopedConnection<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            closed: false,
        }
    }

    pub fn send(&mut self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        if self.closed {
            return Err(ApiError::Connection("connection already closed".to_string()));
        }
        self.inner.send(request)
    }

    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.inner.close();
        }
    }
}

impl<C: Connection> Drop for ScopedConnection<C> {
    fn drop(&mut self) {
        self.close();
    }
}
