//! Client core for the DuckDuckGo instant answer API.
//!
//! # Overview
//! One GET request per query returns a JSON document. Decoding normalizes
//! every key from camel case to snake case and turns objects whose wire key
//! set matches a known shape into typed records (`Icon`, `SearchResult`,
//! `Response`, ...). Objects that match nothing stay generic mappings, or are
//! rejected in strict mode when they still carry capitalized keys.
//!
//! # Design
//! - `build_request` / `parse_response` are pure and usable without any
//!   I/O (host-does-IO); the FFI crate is built on them.
//! - `query` drives one round-trip over a `Transport`. With the default
//!   `ureq` feature, `UreqTransport` is the blocking HTTP implementation.
//! - The shape registry is the only process-wide state and is read-only.

pub mod client;
pub mod error;
pub mod hook;
pub mod http;
pub mod normalize;
pub mod request;
pub mod shapes;
#[cfg(feature = "ureq")]
pub mod transport;
pub mod types;
pub mod value;

pub use client::{
    build_request, parse_response, query, secure_query, QueryOptions, SERVER_HOST, USER_AGENT,
};
pub use error::ApiError;
pub use hook::{decode_body, Container, Hook};
pub use http::{Connection, HttpRequest, HttpResponse, ScopedConnection, Transport};
pub use normalize::camel_to_snake_case;
pub use request::{build_path, RequestFlags};
pub use shapes::Shape;
#[cfg(feature = "ureq")]
pub use transport::{UreqConnection, UreqTransport};
pub use types::{Content, Icon, Infobox, MetaField, Record, RelatedTopic, Response, SearchResult};
pub use value::{Map, Value};
