//! Shape-dispatching deserialization hook.
//!
//! # Design
//! The body is parsed into a `serde_json::Value` first, then walked
//! post-order: every object's children are converted before the object
//! itself, so a parent sees typed records where its nested objects matched a
//! shape. Shape matching always uses the keys as they arrived on the wire;
//! only the output carries normalized keys.

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::error::ApiError;
use crate::normalize::camel_to_snake_case;
use crate::shapes::Shape;
use crate::types::Record;
use crate::value::{Map, Value};

/// How matched objects are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Container {
    /// Build a typed [`Record`] for every object that matches a shape.
    #[default]
    Record,
    /// Return key-normalized generic mappings only.
    Map,
}

impl Container {
    pub const NAMES: [&'static str; 2] = ["record", "map"];

    pub fn name(self) -> &'static str {
        match self {
            Container::Record => "record",
            Container::Map => "map",
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Container {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "record" => Ok(Container::Record),
            "map" => Ok(Container::Map),
            other => Err(ApiError::Argument(format!(
                "container '{other}' must be one of: {}",
                Container::NAMES.join(", ")
            ))),
        }
    }
}

/// Per-object transform applied while decoding a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hook {
    container: Container,
    strict: bool,
}

impl Hook {
    pub fn new(container: Container, strict: bool) -> Self {
        Self { container, strict }
    }

    /// Resolve a container by name. An unknown name is an error in strict
    /// mode; in lenient mode it yields no hook, and the document is decoded
    /// without key normalization or records.
    pub fn named(name: &str, strict: bool) -> Result<Option<Self>, ApiError> {
        match name.parse::<Container>() {
            Ok(container) => Ok(Some(Self::new(container, strict))),
            Err(err) if strict => Err(err),
            Err(_) => Ok(None),
        }
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Transform one object whose values are already decoded.
    pub fn transform(&self, object: Map) -> Result<Value, ApiError> {
        if object.is_empty() {
            return Ok(Value::Object(Map::new()));
        }

        let shape = Shape::lookup(object.keys().map(String::as_str));
        let has_capitalized_key = object.keys().any(|k| starts_uppercase(k));

        let normalized: Map = object
            .into_iter()
            .map(|(key, value)| (camel_to_snake_case(&key), value))
            .collect();

        match shape {
            Some(shape) => {
                trace!(%shape, container = %self.container, "matched shape");
                match self.container {
                    Container::Record => Ok(Value::from(Record::build(shape, normalized))),
                    Container::Map => Ok(Value::Object(normalized)),
                }
            }
            None if self.strict && has_capitalized_key => Err(ApiError::Deserialization(
                "unable to deserialize object: no matching shape".to_string(),
            )),
            None => Ok(Value::Object(normalized)),
        }
    }

    /// Convert a parsed tree bottom-up, transforming every object.
    pub fn apply(&self, raw: serde_json::Value) -> Result<Value, ApiError> {
        match raw {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| self.apply(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            serde_json::Value::Object(object) => {
                let mut children = Map::new();
                for (key, value) in object {
                    children.insert(key, self.apply(value)?);
                }
                self.transform(children)
            }
            scalar => Ok(Value::from(scalar)),
        }
    }
}

fn starts_uppercase(key: &str) -> bool {
    key.chars().next().is_some_and(char::is_uppercase)
}

/// Decode a response body: UTF-8, then JSON, then the hook. With no hook the
/// JSON tree is returned as-is.
pub fn decode_body(body: &[u8], hook: Option<&Hook>) -> Result<Value, ApiError> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ApiError::Deserialization(format!("response is not UTF-8: {e}")))?;
    let raw: serde_json::Value = serde_json::from_str(text).map_err(|e| {
        ApiError::Deserialization(format!("unable to deserialize response to an object: {e}"))
    })?;
    match hook {
        Some(hook) => hook.apply(raw),
        None => Ok(Value::from(raw)),
    }
}
