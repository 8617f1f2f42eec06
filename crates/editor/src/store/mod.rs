//! Page store gateway
//!
//! A [`PageStore`] lists, loads and saves page documents. Every save creates
//! a new page with a freshly assigned id; nothing is ever updated in place.

mod file;
mod memory;

pub use file::{FilePageStore, PAGE_FILE_SUFFIX};
pub use memory::MemoryPageStore;

use async_trait::async_trait;
use pagecraft_core::{EditorResult, PageId};
use pagecraft_model::{PageDocument, PageSummary, SavePageRequest, SavePageResponse};
use uuid::Uuid;

/// Persistence gateway for page documents
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Summaries of every stored page, newest first
    async fn list_pages(&self) -> EditorResult<Vec<PageSummary>>;

    /// Load one page
    ///
    /// A stored layout that is missing or malformed loads as empty.
    async fn load_page(&self, id: &PageId) -> EditorResult<PageDocument>;

    /// Persist a new page and return its id
    async fn save_page(&self, request: &SavePageRequest) -> EditorResult<SavePageResponse>;
}

/// Allocate a fresh page id
pub(crate) fn new_page_id() -> PageId {
    PageId::new(Uuid::new_v4().simple().to_string())
}
