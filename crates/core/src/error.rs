//! Error types for Pagecraft
//!
//! This module provides unified error handling across the editor,
//! including schema errors, persistence errors, configuration errors, and more.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Pagecraft
#[derive(Debug, Error)]
pub enum EditorError {
    // ========================================================================
    // Schema / Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The element kind tag is not one of the known kinds
    #[error("Unknown element kind: '{0}'")]
    UnknownElementKind(String),

    /// A property name that the kind's schema does not define
    #[error("Unknown property '{property}' for element kind '{kind}'")]
    UnknownProperty { kind: String, property: String },

    /// A property required by the kind's schema is absent
    #[error("Missing property '{property}' for element kind '{kind}'")]
    MissingProperty { kind: String, property: String },

    /// A property value of the wrong type or outside its allowed set
    #[error("Invalid value for '{kind}.{property}': {message}")]
    InvalidPropertyValue {
        kind: String,
        property: String,
        message: String,
    },

    /// Two elements in one layout share an id
    #[error("Duplicate element id: '{0}'")]
    DuplicateElementId(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Page not found in the store
    #[error("Page not found: {0}")]
    PageNotFound(String),

    // ========================================================================
    // Persistence Errors
    // ========================================================================
    /// The page store rejected or failed an operation
    #[error("Store error: {0}")]
    Store(String),

    /// A save was requested while another one is still in flight
    #[error("A save is already in progress")]
    SaveInFlight,

    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid page payload
    #[error("Invalid page format: {0}")]
    InvalidPageFormat(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl EditorError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        EditorError::Validation(msg.into())
    }

    /// Create an invalid property value error
    pub fn invalid_value(
        kind: impl Into<String>,
        property: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        EditorError::InvalidPropertyValue {
            kind: kind.into(),
            property: property.into(),
            message: msg.into(),
        }
    }

    /// Create an unknown property error
    pub fn unknown_property(kind: impl Into<String>, property: impl Into<String>) -> Self {
        EditorError::UnknownProperty {
            kind: kind.into(),
            property: property.into(),
        }
    }

    /// Create a store error
    pub fn store(msg: impl Into<String>) -> Self {
        EditorError::Store(msg.into())
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        EditorError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a schema or validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            EditorError::Validation(_)
                | EditorError::UnknownElementKind(_)
                | EditorError::UnknownProperty { .. }
                | EditorError::MissingProperty { .. }
                | EditorError::InvalidPropertyValue { .. }
                | EditorError::DuplicateElementId(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, EditorError::PageNotFound(_))
    }

    /// Check if this error came from the persistence layer
    pub fn is_store(&self) -> bool {
        matches!(
            self,
            EditorError::Store(_)
                | EditorError::SaveInFlight
                | EditorError::Io(_)
                | EditorError::FileRead { .. }
                | EditorError::FileWrite { .. }
                | EditorError::DirectoryCreate { .. }
                | EditorError::JsonSerialization(_)
                | EditorError::InvalidPageFormat(_)
                | EditorError::SchemaVersionMismatch { .. }
        )
    }
}

/// Result type alias using EditorError
pub type EditorResult<T> = Result<T, EditorError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> EditorResult<T>;
}

impl<T, E: Into<EditorError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> EditorResult<T> {
        self.map_err(|e| {
            let err: EditorError = e.into();
            EditorError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
