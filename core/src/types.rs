//! Typed records for the known response shapes.
//!
//! # Design
//! Field names are the snake-case forms of the wire keys. Every field holds
//! a `Value` rather than a concrete scalar: the API sends `""` or a number
//! for the same field depending on the query, and nested objects may or may
//! not match a shape themselves. Records are built from an already
//! key-normalized mapping whose wire key set matched the shape exactly,
//! so every field is present.

use serde::Serialize;

use crate::shapes::Shape;
use crate::value::{Map, Value};

/// Image attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Icon {
    pub url: Value,
    pub width: Value,
    pub height: Value,
}

/// One entry of `Results` or `RelatedTopics` (wire shape "Result").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub first_url: Value,
    pub icon: Value,
    pub result: Value,
    pub text: Value,
}

/// A row of infobox content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub data_type: Value,
    pub label: Value,
    pub sort_order: Value,
    pub value: Value,
    pub wiki_order: Value,
}

/// A field-level infobox meta entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetaField {
    pub data_type: Value,
    pub label: Value,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Infobox {
    pub content: Value,
    pub meta: Value,
}

/// A named group of related topics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedTopic {
    pub name: Value,
    pub topics: Value,
}

/// The top-level instant answer document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub r#abstract: Value,
    pub abstract_source: Value,
    pub abstract_text: Value,
    pub abstract_url: Value,
    pub answer: Value,
    pub answer_type: Value,
    pub definition: Value,
    pub definition_source: Value,
    pub definition_url: Value,
    pub entity: Value,
    pub heading: Value,
    pub image: Value,
    pub image_height: Value,
    pub image_is_logo: Value,
    pub image_width: Value,
    pub infobox: Value,
    pub redirect: Value,
    pub related_topics: Value,
    pub results: Value,
    pub r#type: Value,
    /// Provider metadata; only present when the wire object carried `meta`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Closed sum over every registered shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Icon(Icon),
    Result(SearchResult),
    Content(Content),
    Meta(MetaField),
    Infobox(Infobox),
    RelatedTopic(RelatedTopic),
    Response(Box<Response>),
}

impl Record {
    /// Build the record for `shape` from a key-normalized mapping.
    pub fn build(shape: Shape, mut fields: Map) -> Self {
        let f = &mut fields;
        match shape {
            Shape::Icon => Record::Icon(Icon {
                url: take(f, "url"),
                width: take(f, "width"),
                height: take(f, "height"),
            }),
            Shape::Result => Record::Result(SearchResult {
                first_url: take(f, "first_url"),
                icon: take(f, "icon"),
                result: take(f, "result"),
                text: take(f, "text"),
            }),
            Shape::Content => Record::Content(Content {
                data_type: take(f, "data_type"),
                label: take(f, "label"),
                sort_order: take(f, "sort_order"),
                value: take(f, "value"),
                wiki_order: take(f, "wiki_order"),
            }),
            Shape::Meta => Record::Meta(MetaField {
                data_type: take(f, "data_type"),
                label: take(f, "label"),
                value: take(f, "value"),
            }),
            Shape::Infobox => Record::Infobox(Infobox {
                content: take(f, "content"),
                meta: take(f, "meta"),
            }),
            Shape::RelatedTopic => Record::RelatedTopic(RelatedTopic {
                name: take(f, "name"),
                topics: take(f, "topics"),
            }),
            Shape::Response => Record::Response(Box::new(Response {
                r#abstract: take(f, "abstract"),
                abstract_source: take(f, "abstract_source"),
                abstract_text: take(f, "abstract_text"),
                abstract_url: take(f, "abstract_url"),
                answer: take(f, "answer"),
                answer_type: take(f, "answer_type"),
                definition: take(f, "definition"),
                definition_source: take(f, "definition_source"),
                definition_url: take(f, "definition_url"),
                entity: take(f, "entity"),
                heading: take(f, "heading"),
                image: take(f, "image"),
                image_height: take(f, "image_height"),
                image_is_logo: take(f, "image_is_logo"),
                image_width: take(f, "image_width"),
                infobox: take(f, "infobox"),
                redirect: take(f, "redirect"),
                related_topics: take(f, "related_topics"),
                results: take(f, "results"),
                r#type: take(f, "type"),
                meta: f.remove("meta"),
            })),
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            Record::Icon(_) => Shape::Icon,
            Record::Result(_) => Shape::Result,
            Record::Content(_) => Shape::Content,
            Record::Meta(_) => Shape::Meta,
            Record::Infobox(_) => Shape::Infobox,
            Record::RelatedTopic(_) => Shape::RelatedTopic,
            Record::Response(_) => Shape::Response,
        }
    }
}

fn take(fields: &mut Map, name: &str) -> Value {
    fields.remove(name).unwrap_or(Value::Null)
}
