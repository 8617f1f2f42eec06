//! Wire payloads for page documents
//!
//! This module defines the flat JSON shapes exchanged with a page store:
//! the element encoding `{id, type, props}`, the page document
//! `{title, layout}`, the save request `{title, layout, status}` and the
//! page listing `{items: [{id, title}]}`.

use crate::element::Element;
use pagecraft_core::{EditorError, EditorResult, Identifiable, PageId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::warn;

// ============================================================================
// Element Encoding
// ============================================================================

/// Canonical wire form of an element
///
/// `kind` is written as `type`; `kind` and `properties` are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireElement {
    pub id: String,

    #[serde(rename = "type", alias = "kind")]
    pub kind: String,

    #[serde(alias = "properties", default)]
    pub props: Map<String, Value>,
}

// ============================================================================
// Page Payloads
// ============================================================================

/// Entry of the page listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    pub id: PageId,

    #[serde(default)]
    pub title: String,
}

/// Response body of a page listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageList {
    #[serde(default)]
    pub items: Vec<PageSummary>,
}

/// A loaded page: its title and ordered element layout
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageDocument {
    pub title: Option<String>,
    pub layout: Vec<Element>,
}

impl PageDocument {
    /// Create a page document
    pub fn new(title: impl Into<String>, layout: Vec<Element>) -> Self {
        Self {
            title: Some(title.into()),
            layout,
        }
    }
}

/// Raw page body; `layout` is kept untyped so a malformed one can be dropped
#[derive(Deserialize)]
struct RawPageDocument {
    #[serde(default)]
    title: Option<Value>,

    #[serde(default)]
    layout: Option<Value>,
}

impl<'de> Deserialize<'de> for PageDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawPageDocument::deserialize(deserializer)?;
        let title = match raw.title {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let layout = raw.layout.map(parse_layout).unwrap_or_default();
        Ok(Self { title, layout })
    }
}

/// Body of a save request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePageRequest {
    pub title: String,
    pub layout: Vec<Element>,
    /// Opaque publication tag, e.g. `draft`; passed through unmodified
    pub status: String,
}

/// Response body of a save request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavePageResponse {
    pub id: PageId,
}

// ============================================================================
// Layout Parsing
// ============================================================================

/// Parse a layout leniently
///
/// A value that is not an array yields an empty layout. Otherwise each entry
/// is read on its own: entries without a valid id or with an unknown kind are
/// skipped, as are repeated ids after their first occurrence.
pub fn parse_layout(value: Value) -> Vec<Element> {
    let Value::Array(entries) = value else {
        warn!("Page layout is not an array; using an empty layout");
        return Vec::new();
    };

    let mut seen = HashSet::with_capacity(entries.len());
    let mut layout = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Element>(entry) {
            Ok(element) if seen.insert(element.id()) => layout.push(element),
            Ok(element) => {
                warn!(index, id = %element.id(), "Skipping element with a repeated id");
            }
            Err(e) => warn!(index, error = %e, "Skipping unreadable element"),
        }
    }
    layout
}

/// Verify that no two elements share an id
pub fn check_unique_ids(layout: &[Element]) -> EditorResult<()> {
    let mut seen = HashSet::with_capacity(layout.len());
    for element in layout {
        if !seen.insert(element.id()) {
            return Err(EditorError::DuplicateElementId(element.id().to_string()));
        }
    }
    Ok(())
}

/// Parse a page document from a JSON string
///
/// Only a body that is not a JSON object at all is an error; a missing or
/// malformed layout degrades to an empty one.
pub fn page_from_str(json: &str) -> EditorResult<PageDocument> {
    serde_json::from_str(json)
        .map_err(|e| EditorError::InvalidPageFormat(format!("Invalid page document: {}", e)))
}

// ============================================================================
// Tests
// ============================================================================
