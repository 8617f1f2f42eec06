//! # Pagecraft Core
//!
//! Core types, traits, and error handling for Pagecraft.
//!
//! This crate provides the foundational building blocks used by the
//! element model and the editor, including:
//!
//! - **Types**: Element and page identifiers, enumerated property values
//! - **Traits**: Common behaviors like `Validatable` and `Choice`
//! - **Errors**: Unified error handling with `EditorError` and `EditorResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EditorError, EditorResult, ResultExt};
pub use traits::{Choice, Identifiable, Validatable};
pub use types::{
    Align, ButtonVariant, ElementId, HeadingLevel, LineStyle, PageId, PropertyValue,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
