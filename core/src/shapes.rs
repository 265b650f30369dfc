//! Registry of known response shapes.
//!
//! A shape is identified only by the exact set of keys an object carries on
//! the wire, before normalization. No type tag is transmitted.

use std::fmt;
use std::sync::OnceLock;

/// One variant per record type in [`crate::types::Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Icon,
    Result,
    Content,
    Meta,
    Infobox,
    RelatedTopic,
    Response,
}

const ICON_KEYS: &[&str] = &["URL", "Width", "Height"];
const RESULT_KEYS: &[&str] = &["FirstURL", "Icon", "Result", "Text"];
const CONTENT_KEYS: &[&str] = &["data_type", "label", "sort_order", "value", "wiki_order"];
const META_KEYS: &[&str] = &["data_type", "label", "value"];
const INFOBOX_KEYS: &[&str] = &["content", "meta"];
const RELATED_TOPIC_KEYS: &[&str] = &["Name", "Topics"];
const RESPONSE_KEYS: &[&str] = &[
    "Redirect",
    "Definition",
    "ImageWidth",
    "Infobox",
    "RelatedTopics",
    "ImageHeight",
    "Heading",
    "Answer",
    "AbstractText",
    "Type",
    "ImageIsLogo",
    "DefinitionSource",
    "AbstractURL",
    "Abstract",
    "DefinitionURL",
    "Results",
    "Entity",
    "AnswerType",
    "AbstractSource",
    "Image",
];
/// Optional extra key accepted on the top-level response.
const RESPONSE_META_KEY: &str = "meta";

/// Sorted key sets paired with the shape they identify. Response appears
/// twice, with and without `meta`.
fn registry() -> &'static [(Vec<&'static str>, Shape)] {
    static REGISTRY: OnceLock<Vec<(Vec<&'static str>, Shape)>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut with_meta = RESPONSE_KEYS.to_vec();
        with_meta.push(RESPONSE_META_KEY);
        [
            (ICON_KEYS.to_vec(), Shape::Icon),
            (RESULT_KEYS.to_vec(), Shape::Result),
            (CONTENT_KEYS.to_vec(), Shape::Content),
            (META_KEYS.to_vec(), Shape::Meta),
            (INFOBOX_KEYS.to_vec(), Shape::Infobox),
            (RELATED_TOPIC_KEYS.to_vec(), Shape::RelatedTopic),
            (RESPONSE_KEYS.to_vec(), Shape::Response),
            (with_meta, Shape::Response),
        ]
        .into_iter()
        .map(|(mut keys, shape)| {
            keys.sort_unstable();
            (keys, shape)
        })
        .collect()
    })
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::Icon,
        Shape::Result,
        Shape::Content,
        Shape::Meta,
        Shape::Infobox,
        Shape::RelatedTopic,
        Shape::Response,
    ];

    /// The identifying wire keys. For `Response` this excludes the optional
    /// `meta` key.
    pub fn keys(self) -> &'static [&'static str] {
        match self {
            Shape::Icon => ICON_KEYS,
            Shape::Result => RESULT_KEYS,
            Shape::Content => CONTENT_KEYS,
            Shape::Meta => META_KEYS,
            Shape::Infobox => INFOBOX_KEYS,
            Shape::RelatedTopic => RELATED_TOPIC_KEYS,
            Shape::Response => RESPONSE_KEYS,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Shape::Icon => "Icon",
            Shape::Result => "Result",
            Shape::Content => "Content",
            Shape::Meta => "Meta",
            Shape::Infobox => "Infobox",
            Shape::RelatedTopic => "RelatedTopic",
            Shape::Response => "Response",
        }
    }

    /// Find the shape whose key set equals `keys` exactly. Order and
    /// duplicates in `keys` do not matter; the empty set matches nothing.
    pub fn lookup<'a, I>(keys: I) -> Option<Shape>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut sorted: Vec<&str> = keys.into_iter().collect();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.is_empty() {
            return None;
        }
        registry()
            .iter()
            .find(|(registered, _)| registered.as_slice() == sorted.as_slice())
            .map(|(_, shape)| *shape)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_is_found_by_its_keys() {
        for shape in Shape::ALL {
            assert_eq!(Shape::lookup(shape.keys().iter().copied()), Some(shape), "{shape}");
        }
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(Shape::lookup(["Width", "Height", "URL"]), Some(Shape::Icon));
    }

    #[test]
    fn response_with_meta_is_recognized() {
        let keys = RESPONSE_KEYS.iter().copied().chain(["meta"]);
        assert_eq!(Shape::lookup(keys), Some(Shape::Response));
    }

    #[test]
    fn subsets_and_supersets_do_not_match() {
        assert_eq!(Shape::lookup(["URL", "Width"]), None);
        assert_eq!(Shape::lookup(["URL", "Width", "Height", "Alt"]), None);
        assert_eq!(Shape::lookup(["url", "width", "height"]), None);
    }

    #[test]
    fn empty_set_matches_nothing() {
        assert_eq!(Shape::lookup(std::iter::empty()), None);
    }
}
