//! Core traits for Pagecraft
//!
//! This module defines the traits shared by the element model and the
//! editor layer: validation, identity, and enumerated property choices.

use crate::error::EditorResult;
use crate::types::ElementId;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use pagecraft_core::{Validatable, EditorResult, EditorError};
///
/// struct Page {
///     title: String,
/// }
///
/// impl Validatable for Page {
///     fn validate(&self) -> EditorResult<()> {
///         if self.title.is_empty() {
///             return Err(EditorError::validation("Title cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `EditorError` describing the problem.
    fn validate(&self) -> EditorResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Identifiable Trait
// ============================================================================

/// Trait for types that carry an element identifier
pub trait Identifiable {
    /// Get the unique identifier
    fn id(&self) -> ElementId;

    /// Check if this matches another identifier
    fn matches_id(&self, id: ElementId) -> bool {
        self.id() == id
    }
}

// ============================================================================
// Choice Trait
// ============================================================================

/// A closed set of string-tagged options, rendered as a select widget
///
/// `as_str` is the wire value, `label` is what the inspector shows.
pub trait Choice: Copy + PartialEq + Sized + 'static {
    /// Every option, in display order
    const ALL: &'static [Self];

    /// Wire representation
    fn as_str(&self) -> &'static str;

    /// Human-readable label
    fn label(&self) -> &'static str;

    /// Parse from the wire representation
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }

    /// `(value, label)` pairs for every option
    fn options() -> Vec<(&'static str, &'static str)> {
        Self::ALL.iter().map(|c| (c.as_str(), c.label())).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
