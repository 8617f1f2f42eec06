//! # Pagecraft Editor
//!
//! The interactive layer over the page model:
//!
//! - **drag**: turns palette and reorder gestures into document insertions and moves
//! - **inspector**: property forms for the selected element, and edits routed back
//! - **store**: the page store gateway with in-memory and file-backed implementations
//! - **session**: one editing session tying the above together
//! - **config**: editor settings loaded from TOML
//!

pub mod config;
pub mod drag;
pub mod inspector;
pub mod session;
pub mod store;

pub use config::EditorConfig;
pub use drag::{
    DragEngine, DragPayload, DropOutcome, DropTarget, IgnoreReason, apply_drop, drop_zones,
    effective_move_target, zones_around,
};
pub use inspector::{FormField, Inspector, InspectorForm, Widget};
pub use session::{EditorSession, StatusLevel, StatusMessage};
pub use store::{FilePageStore, MemoryPageStore, PageStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
