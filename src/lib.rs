//! Pagecraft
//!
//! Document editing engine for a drag-and-drop page builder.
//!
//! This crate re-exports the workspace crates and sets up logging:
//!
//! - [`pagecraft_core`]: identifiers, property enums, errors
//! - [`pagecraft_model`]: elements, the document and page payloads
//! - [`pagecraft_editor`]: drag engine, inspector, page stores and the editing session

pub use pagecraft_core;
pub use pagecraft_editor;
pub use pagecraft_model;

pub use pagecraft_core::{EditorError, EditorResult, ElementId, PageId};
pub use pagecraft_editor::{
    DragEngine, DropTarget, EditorConfig, EditorSession, FilePageStore, InspectorForm,
    MemoryPageStore, PageStore,
};
pub use pagecraft_model::{Document, Element, ElementKind};

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// `RUST_LOG` takes precedence over `level`. Returns `false` if a subscriber
/// was already installed.
pub fn init_logging(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Install logging at the level named by `config`
pub fn init_logging_from_config(config: &EditorConfig) -> bool {
    init_logging(&config.log_level)
}

/// Install logging configured from the environment
pub fn init_logging_from_env() -> bool {
    init_logging_from_config(&EditorConfig::default().with_env_overrides())
}
