//! # Pagecraft Model
//!
//! This crate provides the in-memory model of a page document: the element
//! kinds with their property schemas, the ordered document state with its
//! selection, and the wire payloads exchanged with a page store.
//!
//! ## Core Concepts
//!
//! - **Element**: A typed node (heading, paragraph, image, button, separator)
//! - **Document**: The ordered element sequence plus the current selection
//! - **Page payloads**: Flat JSON shapes for listing, loading and saving pages
//!

// Module declarations
pub mod document;
pub mod element;
pub mod serialization;

// Re-export commonly used types at crate root
pub use document::{Document, InsertOrigin};
pub use element::{
    ButtonProps, Element, ElementKind, ElementProps, HeadingProps, ImageProps, ParagraphProps,
    SeparatorProps,
};
pub use serialization::{
    PageDocument, PageList, PageSummary, SavePageRequest, SavePageResponse, WireElement,
    check_unique_ids, page_from_str, parse_layout,
};

// Re-export core types that are commonly used with the model
pub use pagecraft_core::{
    Align, ButtonVariant, EditorError, EditorResult, ElementId, HeadingLevel, Identifiable,
    LineStyle, PageId, PropertyValue,
};

/// Current schema version of persisted page files
pub const SCHEMA_VERSION: u32 = 1;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }
}
