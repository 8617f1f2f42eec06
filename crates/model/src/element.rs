//! Element definitions for page documents
//!
//! This module contains the closed set of element kinds, the typed property
//! record of each kind, and the `Element` node itself. Every kind has a fixed
//! schema (its ordered property names) and a default property set; a typed
//! record can never carry a key outside its schema or miss one.

use crate::serialization::WireElement;
use pagecraft_core::{
    Align, ButtonVariant, Choice, EditorError, EditorResult, ElementId, HeadingLevel,
    Identifiable, LineStyle, PropertyValue,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

// ============================================================================
// Defaults
// ============================================================================

/// Default text of a new heading
pub const DEFAULT_HEADING_TEXT: &str = "Your Heading";

/// Default text of a new paragraph
pub const DEFAULT_PARAGRAPH_TEXT: &str =
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit.";

/// Placeholder source of a new image
pub const PLACEHOLDER_IMAGE_URL: &str = "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=1200&q=80&auto=format&fit=crop";

/// Default alt text of a new image
pub const DEFAULT_IMAGE_ALT: &str = "Image";

/// Default width of a new image
pub const DEFAULT_IMAGE_WIDTH: &str = "100%";

/// Default label of a new button
pub const DEFAULT_BUTTON_LABEL: &str = "Click Me";

/// Default link target of a new button
pub const DEFAULT_BUTTON_HREF: &str = "#";

const HEADING_SCHEMA: &[&str] = &["text", "level", "align"];
const PARAGRAPH_SCHEMA: &[&str] = &["text", "align"];
const IMAGE_SCHEMA: &[&str] = &["src", "alt", "width"];
const BUTTON_SCHEMA: &[&str] = &["label", "href", "variant", "align"];
const SEPARATOR_SCHEMA: &[&str] = &["style"];

// ============================================================================
// ElementKind
// ============================================================================

/// The kind of a document element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Heading,
    #[serde(alias = "text")]
    Paragraph,
    Image,
    Button,
    #[serde(alias = "divider")]
    Separator,
}

impl ElementKind {
    /// Every kind, in palette order
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Heading,
        ElementKind::Paragraph,
        ElementKind::Image,
        ElementKind::Button,
        ElementKind::Separator,
    ];

    /// Wire tag of this kind
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Heading => "heading",
            ElementKind::Paragraph => "paragraph",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Separator => "separator",
        }
    }

    /// Palette label of this kind
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Heading => "Heading",
            ElementKind::Paragraph => "Text",
            ElementKind::Image => "Image",
            ElementKind::Button => "Button",
            ElementKind::Separator => "Divider",
        }
    }

    /// Ordered property names of this kind
    pub fn schema(&self) -> &'static [&'static str] {
        match self {
            ElementKind::Heading => HEADING_SCHEMA,
            ElementKind::Paragraph => PARAGRAPH_SCHEMA,
            ElementKind::Image => IMAGE_SCHEMA,
            ElementKind::Button => BUTTON_SCHEMA,
            ElementKind::Separator => SEPARATOR_SCHEMA,
        }
    }

    /// Check whether `key` belongs to this kind's schema
    pub fn has_property(&self, key: &str) -> bool {
        self.schema().contains(&key)
    }

    /// Default property set for this kind
    pub fn default_props(&self) -> ElementProps {
        match self {
            ElementKind::Heading => ElementProps::Heading(HeadingProps::default()),
            ElementKind::Paragraph => ElementProps::Paragraph(ParagraphProps::default()),
            ElementKind::Image => ElementProps::Image(ImageProps::default()),
            ElementKind::Button => ElementProps::Button(ButtonProps::default()),
            ElementKind::Separator => ElementProps::Separator(SeparatorProps::default()),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ElementKind {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heading" => Ok(ElementKind::Heading),
            "paragraph" | "text" => Ok(ElementKind::Paragraph),
            "image" => Ok(ElementKind::Image),
            "button" => Ok(ElementKind::Button),
            "separator" | "divider" => Ok(ElementKind::Separator),
            other => Err(EditorError::UnknownElementKind(other.to_string())),
        }
    }
}

// ============================================================================
// Property Records
// ============================================================================

/// Properties of a heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingProps {
    pub text: String,
    pub level: HeadingLevel,
    pub align: Align,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: DEFAULT_HEADING_TEXT.to_string(),
            level: HeadingLevel::H2,
            align: Align::Left,
        }
    }
}

/// Properties of a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphProps {
    pub text: String,
    pub align: Align,
}

impl Default for ParagraphProps {
    fn default() -> Self {
        Self {
            text: DEFAULT_PARAGRAPH_TEXT.to_string(),
            align: Align::Left,
        }
    }
}

/// Properties of an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    /// CSS width, e.g. `100%` or `600px`
    pub width: String,
}

impl Default for ImageProps {
    fn default() -> Self {
        Self {
            src: PLACEHOLDER_IMAGE_URL.to_string(),
            alt: DEFAULT_IMAGE_ALT.to_string(),
            width: DEFAULT_IMAGE_WIDTH.to_string(),
        }
    }
}

/// Properties of a button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonProps {
    pub label: String,
    pub href: String,
    pub variant: ButtonVariant,
    pub align: Align,
}

impl Default for ButtonProps {
    fn default() -> Self {
        Self {
            label: DEFAULT_BUTTON_LABEL.to_string(),
            href: DEFAULT_BUTTON_HREF.to_string(),
            variant: ButtonVariant::Primary,
            align: Align::Left,
        }
    }
}

/// Properties of a separator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeparatorProps {
    pub style: LineStyle,
}

// ============================================================================
// ElementProps
// ============================================================================

/// The property record of an element, discriminated by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementProps {
    Heading(HeadingProps),
    Paragraph(ParagraphProps),
    Image(ImageProps),
    Button(ButtonProps),
    Separator(SeparatorProps),
}

impl ElementProps {
    /// The kind this record belongs to
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementProps::Heading(_) => ElementKind::Heading,
            ElementProps::Paragraph(_) => ElementKind::Paragraph,
            ElementProps::Image(_) => ElementKind::Image,
            ElementProps::Button(_) => ElementKind::Button,
            ElementProps::Separator(_) => ElementKind::Separator,
        }
    }

    /// Ordered property names of this record
    pub fn keys(&self) -> &'static [&'static str] {
        self.kind().schema()
    }

    /// Read one property by name
    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        let value: PropertyValue = match (self, key) {
            (ElementProps::Heading(p), "text") => p.text.clone().into(),
            (ElementProps::Heading(p), "level") => p.level.number().into(),
            (ElementProps::Heading(p), "align") => p.align.as_str().into(),
            (ElementProps::Paragraph(p), "text") => p.text.clone().into(),
            (ElementProps::Paragraph(p), "align") => p.align.as_str().into(),
            (ElementProps::Image(p), "src") => p.src.clone().into(),
            (ElementProps::Image(p), "alt") => p.alt.clone().into(),
            (ElementProps::Image(p), "width") => p.width.clone().into(),
            (ElementProps::Button(p), "label") => p.label.clone().into(),
            (ElementProps::Button(p), "href") => p.href.clone().into(),
            (ElementProps::Button(p), "variant") => p.variant.as_str().into(),
            (ElementProps::Button(p), "align") => p.align.as_str().into(),
            (ElementProps::Separator(p), "style") => p.style.as_str().into(),
            _ => return None,
        };
        Some(value)
    }

    /// Copy of this record with one property replaced
    ///
    /// Fails without producing anything when `key` is not in the schema or
    /// `value` does not fit the property's type.
    pub fn with_value(&self, key: &str, value: PropertyValue) -> EditorResult<Self> {
        let kind = self.kind();
        let mut next = self.clone();
        match (&mut next, key) {
            (ElementProps::Heading(p), "text") => p.text = text_value(kind, key, value)?,
            (ElementProps::Heading(p), "level") => p.level = level_value(kind, key, value)?,
            (ElementProps::Heading(p), "align") => p.align = choice_value(kind, key, value)?,
            (ElementProps::Paragraph(p), "text") => p.text = text_value(kind, key, value)?,
            (ElementProps::Paragraph(p), "align") => p.align = choice_value(kind, key, value)?,
            (ElementProps::Image(p), "src") => p.src = text_value(kind, key, value)?,
            (ElementProps::Image(p), "alt") => p.alt = text_value(kind, key, value)?,
            (ElementProps::Image(p), "width") => p.width = text_value(kind, key, value)?,
            (ElementProps::Button(p), "label") => p.label = text_value(kind, key, value)?,
            (ElementProps::Button(p), "href") => p.href = text_value(kind, key, value)?,
            (ElementProps::Button(p), "variant") => p.variant = choice_value(kind, key, value)?,
            (ElementProps::Button(p), "align") => p.align = choice_value(kind, key, value)?,
            (ElementProps::Separator(p), "style") => p.style = choice_value(kind, key, value)?,
            _ => return Err(EditorError::unknown_property(kind.tag(), key)),
        }
        Ok(next)
    }

    /// Flat key-value form used on the wire
    pub fn to_map(&self) -> Map<String, Value> {
        self.keys()
            .iter()
            .filter_map(|key| self.get(key).map(|v| (key.to_string(), property_to_json(v))))
            .collect()
    }

    /// Build a record from its flat key-value form
    ///
    /// The map must hold exactly the keys of `kind`'s schema.
    pub fn from_map(kind: ElementKind, map: &Map<String, Value>) -> EditorResult<Self> {
        if let Some(extra) = map.keys().find(|k| !kind.has_property(k)) {
            return Err(EditorError::unknown_property(kind.tag(), extra.as_str()));
        }

        let mut props = kind.default_props();
        for key in kind.schema() {
            let raw = map.get(*key).ok_or_else(|| EditorError::MissingProperty {
                kind: kind.tag().to_string(),
                property: key.to_string(),
            })?;
            props = props.with_value(key, json_to_property(kind, key, raw)?)?;
        }
        Ok(props)
    }

    /// Build a record from stored data, repairing what does not fit
    ///
    /// Missing or unreadable values fall back to the kind's defaults, numbers
    /// stored in text properties become text, and unknown keys are dropped.
    pub fn from_map_lenient(kind: ElementKind, map: &Map<String, Value>) -> Self {
        for extra in map.keys().filter(|k| !kind.has_property(k)) {
            warn!(kind = %kind, property = %extra, "Dropping unknown property");
        }

        let mut props = kind.default_props();
        for key in kind.schema() {
            let Some(raw) = map.get(*key) else {
                debug!(kind = %kind, property = key, "Filling missing property");
                continue;
            };

            let repaired = json_to_property(kind, key, raw)
                .and_then(|value| props.with_value(key, value))
                .or_else(|e| match raw {
                    Value::Number(n) => props.with_value(key, PropertyValue::Text(n.to_string())),
                    _ => Err(e),
                });
            match repaired {
                Ok(next) => props = next,
                Err(e) => warn!(
                    kind = %kind,
                    property = key,
                    error = %e,
                    "Keeping default for unreadable property"
                ),
            }
        }
        props
    }
}

fn text_value(kind: ElementKind, key: &str, value: PropertyValue) -> EditorResult<String> {
    match value {
        PropertyValue::Text(s) => Ok(s),
        PropertyValue::Number(n) => Err(EditorError::invalid_value(
            kind.tag(),
            key,
            format!("expected text, got number {}", n),
        )),
    }
}

fn choice_value<C: Choice>(kind: ElementKind, key: &str, value: PropertyValue) -> EditorResult<C> {
    let raw = value.to_string();
    C::parse(&raw).ok_or_else(|| {
        let allowed: Vec<&str> = C::ALL.iter().map(|c| c.as_str()).collect();
        EditorError::invalid_value(
            kind.tag(),
            key,
            format!("'{}' is not one of {}", raw, allowed.join(", ")),
        )
    })
}

fn level_value(kind: ElementKind, key: &str, value: PropertyValue) -> EditorResult<HeadingLevel> {
    let number = match value {
        PropertyValue::Number(n) => n,
        PropertyValue::Text(s) => s.trim().parse::<i64>().map_err(|_| {
            EditorError::invalid_value(kind.tag(), key, format!("'{}' is not a number", s))
        })?,
    };
    HeadingLevel::try_from(number).map_err(|msg| EditorError::invalid_value(kind.tag(), key, msg))
}

fn property_to_json(value: PropertyValue) -> Value {
    match value {
        PropertyValue::Text(s) => Value::String(s),
        PropertyValue::Number(n) => Value::from(n),
    }
}

fn json_to_property(kind: ElementKind, key: &str, raw: &Value) -> EditorResult<PropertyValue> {
    match raw {
        Value::String(s) => Ok(PropertyValue::Text(s.clone())),
        Value::Number(n) => n.as_i64().map(PropertyValue::Number).ok_or_else(|| {
            EditorError::invalid_value(kind.tag(), key, format!("{} is not an integer", n))
        }),
        other => Err(EditorError::invalid_value(
            kind.tag(),
            key,
            format!("expected a string or number, got {}", other),
        )),
    }
}

// ============================================================================
// Element
// ============================================================================

/// A node of a page document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireElement", into = "WireElement")]
pub struct Element {
    id: ElementId,
    props: ElementProps,
}

impl Element {
    /// Create a new element of `kind` with a fresh id and default properties
    pub fn create_default(kind: ElementKind) -> Self {
        Self::with_props(kind.default_props())
    }

    /// Create a new element from a kind tag such as `"heading"`
    pub fn create_from_tag(tag: &str) -> EditorResult<Self> {
        Ok(Self::create_default(tag.parse()?))
    }

    /// Create a new element with a fresh id and the given properties
    pub fn with_props(props: ElementProps) -> Self {
        Self {
            id: ElementId::new(),
            props,
        }
    }

    /// Structural copy with a newly generated id
    pub fn clone_as_new(&self) -> Self {
        Self::with_props(self.props.clone())
    }

    /// Element kind
    pub fn kind(&self) -> ElementKind {
        self.props.kind()
    }

    /// Current properties
    pub fn props(&self) -> &ElementProps {
        &self.props
    }

    /// Replace the property record; the caller guarantees the kind matches
    pub(crate) fn set_props(&mut self, props: ElementProps) {
        debug_assert_eq!(props.kind(), self.kind());
        self.props = props;
    }
}

impl Identifiable for Element {
    fn id(&self) -> ElementId {
        self.id
    }
}

impl TryFrom<WireElement> for Element {
    type Error = EditorError;

    fn try_from(wire: WireElement) -> Result<Self, Self::Error> {
        let id: ElementId = wire.id.parse().map_err(|e| {
            EditorError::InvalidPageFormat(format!("invalid element id '{}': {}", wire.id, e))
        })?;
        let kind: ElementKind = wire.kind.parse()?;
        let props = ElementProps::from_map_lenient(kind, &wire.props);
        Ok(Self { id, props })
    }
}

impl From<Element> for WireElement {
    fn from(element: Element) -> Self {
        WireElement {
            id: element.id.to_string(),
            kind: element.kind().tag().to_string(),
            props: element.props.to_map(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_default_props_match_schema() {
        for kind in ElementKind::ALL {
            let element = Element::create_default(kind);
            let mut keys: Vec<String> = element.props().to_map().keys().cloned().collect();
            keys.sort();
            let mut expected: Vec<String> = kind.schema().iter().map(|k| k.to_string()).collect();
            expected.sort();
            assert_eq!(keys, expected, "schema mismatch for {}", kind);
        }
    }

    #[test]
    fn test_heading_defaults() {
        let element = Element::create_default(ElementKind::Heading);
        let props = element.props();
        assert_eq!(props.get("text"), Some(PropertyValue::from("Your Heading")));
        assert_eq!(props.get("level"), Some(PropertyValue::Number(2)));
        assert_eq!(props.get("align"), Some(PropertyValue::from("left")));
    }

    #[test]
    fn test_other_defaults() {
        let image = ElementKind::Image.default_props();
        assert_eq!(image.get("alt"), Some(PropertyValue::from("Image")));
        assert_eq!(image.get("width"), Some(PropertyValue::from("100%")));

        let button = ElementKind::Button.default_props();
        assert_eq!(button.get("label"), Some(PropertyValue::from("Click Me")));
        assert_eq!(button.get("href"), Some(PropertyValue::from("#")));
        assert_eq!(button.get("variant"), Some(PropertyValue::from("primary")));

        let separator = ElementKind::Separator.default_props();
        assert_eq!(separator.get("style"), Some(PropertyValue::from("solid")));
    }

    #[test]
    fn test_create_from_tag() {
        assert_eq!(
            Element::create_from_tag("text").unwrap().kind(),
            ElementKind::Paragraph
        );
        assert_eq!(
            Element::create_from_tag("divider").unwrap().kind(),
            ElementKind::Separator
        );

        let err = Element::create_from_tag("video").unwrap_err();
        assert!(matches!(err, EditorError::UnknownElementKind(ref k) if k == "video"));
    }

    #[test]
    fn test_clone_as_new() {
        let original = Element::create_default(ElementKind::Button);
        let copy = original.clone_as_new();
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.props(), original.props());
    }

    #[test]
    fn test_with_value_replaces_one_field() {
        let props = ElementKind::Heading.default_props();
        let next = props.with_value("level", PropertyValue::Number(1)).unwrap();
        assert_eq!(next.get("level"), Some(PropertyValue::Number(1)));
        assert_eq!(next.get("text"), props.get("text"));
        assert_eq!(next.keys(), props.keys());
    }

    #[test]
    fn test_with_value_accepts_numeric_text_for_level() {
        let props = ElementKind::Heading.default_props();
        let next = props.with_value("level", PropertyValue::from("3")).unwrap();
        assert_eq!(next.get("level"), Some(PropertyValue::Number(3)));
    }

    #[test]
    fn test_with_value_rejects_bad_input() {
        let props = ElementKind::Heading.default_props();
        assert!(matches!(
            props.with_value("level", PropertyValue::Number(4)),
            Err(EditorError::InvalidPropertyValue { .. })
        ));
        assert!(matches!(
            props.with_value("align", PropertyValue::from("justify")),
            Err(EditorError::InvalidPropertyValue { .. })
        ));
        assert!(matches!(
            props.with_value("src", PropertyValue::from("x.png")),
            Err(EditorError::UnknownProperty { .. })
        ));
        assert!(matches!(
            props.with_value("text", PropertyValue::Number(1)),
            Err(EditorError::InvalidPropertyValue { .. })
        ));
    }

    #[test]
    fn test_from_map_exact_keys() {
        let map = json!({ "style": "dashed" });
        let props =
            ElementProps::from_map(ElementKind::Separator, map.as_object().unwrap()).unwrap();
        assert_eq!(
            props,
            ElementProps::Separator(SeparatorProps {
                style: LineStyle::Dashed
            })
        );

        let extra = json!({ "style": "dashed", "color": "red" });
        assert!(matches!(
            ElementProps::from_map(ElementKind::Separator, extra.as_object().unwrap()),
            Err(EditorError::UnknownProperty { .. })
        ));

        let missing = json!({ "text": "Hi" });
        assert!(matches!(
            ElementProps::from_map(ElementKind::Heading, missing.as_object().unwrap()),
            Err(EditorError::MissingProperty { .. })
        ));
    }

    #[test]
    fn test_from_map_lenient_repairs_stored_props() {
        let button = json!({ "label": "Go", "href": "/start", "variant": "secondary" });
        let props =
            ElementProps::from_map_lenient(ElementKind::Button, button.as_object().unwrap());
        assert_eq!(
            props,
            ElementProps::Button(ButtonProps {
                label: "Go".to_string(),
                href: "/start".to_string(),
                variant: ButtonVariant::Secondary,
                align: Align::Left,
            })
        );

        let image = json!({ "src": "a.png", "alt": "A", "width": 600, "border": 1 });
        let props =
            ElementProps::from_map_lenient(ElementKind::Image, image.as_object().unwrap());
        assert_eq!(props.get("width"), Some(PropertyValue::from("600")));
        assert_eq!(props.to_map().len(), 3);

        let heading = json!({ "text": "Hi", "level": 9, "align": "justify" });
        let props =
            ElementProps::from_map_lenient(ElementKind::Heading, heading.as_object().unwrap());
        assert_eq!(props.get("text"), Some(PropertyValue::from("Hi")));
        assert_eq!(props.get("level"), Some(PropertyValue::Number(2)));
        assert_eq!(props.get("align"), Some(PropertyValue::from("left")));
    }

    #[test]
    fn test_element_without_align_deserializes() {
        let id = ElementId::new();
        let value = json!({
            "id": id.to_string(),
            "type": "button",
            "props": { "label": "Go", "href": "#", "variant": "primary" }
        });
        let element: Element = serde_json::from_value(value).unwrap();
        assert_eq!(element.id(), id);
        assert_eq!(element.props().get("align"), Some(PropertyValue::from("left")));
        assert_eq!(element.props().get("label"), Some(PropertyValue::from("Go")));
    }

    #[test]
    fn test_unreadable_element_is_an_error() {
        let bad_id = json!({ "id": "x", "type": "heading", "props": {} });
        assert!(serde_json::from_value::<Element>(bad_id).is_err());

        let bad_kind = json!({ "id": ElementId::new().to_string(), "type": "video" });
        assert!(serde_json::from_value::<Element>(bad_kind).is_err());
    }

    #[test]
    fn test_element_wire_shape() {
        let element = Element::create_default(ElementKind::Separator);
        let value = serde_json::to_value(&element).unwrap();
        assert_eq!(
            value,
            json!({
                "id": element.id().to_string(),
                "type": "separator",
                "props": { "style": "solid" }
            })
        );

        let back: Element = serde_json::from_value(value).unwrap();
        assert_eq!(back, element);
    }

    #[test]
    fn test_element_accepts_legacy_tags() {
        let id = ElementId::new();
        let value = json!({
            "id": id.to_string(),
            "type": "text",
            "props": { "text": "Hello", "align": "center" }
        });
        let element: Element = serde_json::from_value(value).unwrap();
        assert_eq!(element.id(), id);
        assert_eq!(element.kind(), ElementKind::Paragraph);
        assert_eq!(element.props().get("align"), Some(PropertyValue::from("center")));
    }

    #[test]
    fn test_palette_labels() {
        let labels: Vec<&str> = ElementKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(labels, vec!["Heading", "Text", "Image", "Button", "Divider"]);
    }
}
