//! In-memory page store

use super::{PageStore, new_page_id};
use async_trait::async_trait;
use pagecraft_core::{EditorError, EditorResult, PageId};
use pagecraft_model::{
    PageDocument, PageSummary, SavePageRequest, SavePageResponse, page_from_str,
};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
struct StoredPage {
    id: PageId,
    title: String,
    status: String,
    body: String,
}

/// Page store holding serialized pages in process memory
///
/// Pages are kept as JSON bodies, so loading goes through the same decoding
/// as a remote response would.
#[derive(Debug, Default)]
pub struct MemoryPageStore {
    pages: RwLock<Vec<StoredPage>>,
}

impl MemoryPageStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw page body under a chosen id, replacing any page with that id
    pub async fn insert_raw(
        &self,
        id: impl Into<PageId>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) {
        let page = StoredPage {
            id: id.into(),
            title: title.into(),
            status: String::new(),
            body: body.into(),
        };
        let mut pages = self.pages.write().await;
        pages.retain(|p| p.id != page.id);
        pages.push(page);
    }

    /// Number of stored pages
    pub async fn len(&self) -> usize {
        self.pages.read().await.len()
    }

    /// Check whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.pages.read().await.is_empty()
    }

    /// Status tag a page was saved with
    pub async fn status_of(&self, id: &PageId) -> Option<String> {
        self.pages
            .read()
            .await
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.status.clone())
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn list_pages(&self) -> EditorResult<Vec<PageSummary>> {
        let pages = self.pages.read().await;
        Ok(pages
            .iter()
            .rev()
            .map(|p| PageSummary {
                id: p.id.clone(),
                title: p.title.clone(),
            })
            .collect())
    }

    async fn load_page(&self, id: &PageId) -> EditorResult<PageDocument> {
        let pages = self.pages.read().await;
        let page = pages
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| EditorError::PageNotFound(id.to_string()))?;
        page_from_str(&page.body)
    }

    async fn save_page(&self, request: &SavePageRequest) -> EditorResult<SavePageResponse> {
        let body = serde_json::to_string(&PageDocument::new(
            request.title.clone(),
            request.layout.clone(),
        ))?;

        let id = new_page_id();
        self.pages.write().await.push(StoredPage {
            id: id.clone(),
            title: request.title.clone(),
            status: request.status.clone(),
            body,
        });

        debug!(%id, elements = request.layout.len(), "Stored page in memory");
        Ok(SavePageResponse { id })
    }
}

// ============================================================================
// Tests
// ============================================================================
