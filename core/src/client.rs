//! Query orchestration for the instant answer API.
//!
//! # Design
//! `build_request` and `parse_response` are pure: the first produces an
//! `HttpRequest`, the second consumes an `HttpResponse`. `query` runs the
//! round-trip between them over a `Transport`, owning exactly one connection
//! and closing it before decoding the body or propagating a failure. There
//! is no retry: one failed attempt is a failed call.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::hook::{decode_body, Container, Hook};
use crate::http::{HttpRequest, HttpResponse, ScopedConnection, Transport};
use crate::request::{build_path, RequestFlags};
use crate::value::Value;

/// Host serving the instant answer API.
pub const SERVER_HOST: &str = "api.duckduckgo.com";

/// Default `User-Agent` header.
pub const USER_AGENT: &str = concat!("duckduck-rs/", env!("CARGO_PKG_VERSION"));

/// Everything a query needs besides the query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Use TLS. Off by default; `secure_query` forces it on.
    pub secure: bool,
    pub container: Container,
    /// Fail on capitalized objects that match no shape instead of returning
    /// them as generic mappings.
    pub strict: bool,
    pub user_agent: String,
    pub flags: RequestFlags,
    pub host: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            secure: false,
            container: Container::default(),
            strict: false,
            user_agent: USER_AGENT.to_string(),
            flags: RequestFlags::default(),
            host: SERVER_HOST.to_string(),
        }
    }
}

impl QueryOptions {
    /// Select the container by name; unknown names are an argument error.
    pub fn with_container_name(mut self, name: &str) -> Result<Self, ApiError> {
        self.container = name.parse()?;
        Ok(self)
    }

    fn hook(&self) -> Hook {
        Hook::new(self.container, self.strict)
    }
}

/// Build the GET request for `query_text`.
pub fn build_request(query_text: &str, options: &QueryOptions) -> HttpRequest {
    HttpRequest {
        path: build_path(query_text, options.flags),
        headers: vec![("User-Agent".to_string(), options.user_agent.clone())],
    }
}

/// Decode a response body into a value tree. The HTTP status is not
/// interpreted; a non-JSON error page fails as a deserialization error.
pub fn parse_response(response: &HttpResponse, options: &QueryOptions) -> Result<Value, ApiError> {
    if !(200..300).contains(&response.status) {
        warn!(status = response.status, "unexpected HTTP status, decoding body anyway");
    }
    decode_body(&response.body, Some(&options.hook()))
}

/// Send `query_text` to the API and decode the answer.
pub fn query<T: Transport>(
    transport: &T,
    query_text: &str,
    options: &QueryOptions,
) -> Result<Value, ApiError> {
    let request = build_request(query_text, options);
    debug!(
        host = %options.host,
        secure = options.secure,
        path = %request.path,
        "sending query"
    );

    let mut conn = ScopedConnection::new(transport.connect(&options.host, options.secure)?);
    let sent = conn.send(&request);
    conn.close();
    let response = sent?;

    parse_response(&response, options)
}

/// `query` over TLS regardless of `options.secure`.
pub fn secure_query<T: Transport>(
    transport: &T,
    query_text: &str,
    options: &QueryOptions,
) -> Result<Value, ApiError> {
    let options = QueryOptions {
        secure: true,
        ..options.clone()
    };
    query(transport, query_text, &options)
}
