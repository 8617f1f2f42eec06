//! Editing session
//!
//! [`EditorSession`] ties one document to its drag engine, inspector, page
//! title and status line, and talks to a [`PageStore`] for loading and
//! saving. Failures never escape a session operation: they end up in the
//! status message.

use crate::config::EditorConfig;
use crate::drag::{DragEngine, DropOutcome, DropTarget};
use crate::inspector::{Inspector, InspectorForm};
use crate::store::PageStore;
use pagecraft_core::{EditorError, EditorResult, ElementId, Identifiable, PageId};
use pagecraft_model::{
    Document, Element, ElementKind, InsertOrigin, PageDocument, PageSummary, SavePageRequest,
    SavePageResponse,
};
use tracing::{debug, error, info, warn};

/// Status line shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

/// Status message severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One user's editing session over a single page
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    title: String,
    document: Document,
    drag: DragEngine,
    status: Option<StatusMessage>,
    pages: Vec<PageSummary>,
    saving: bool,
}

impl EditorSession {
    /// Start a session on an empty page
    pub fn new(config: EditorConfig) -> Self {
        Self {
            title: config.default_title.clone(),
            config,
            document: Document::new(),
            drag: DragEngine::new(),
            status: None,
            pages: Vec::new(),
            saving: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn drag(&self) -> &DragEngine {
        &self.drag
    }

    pub fn drag_mut(&mut self) -> &mut DragEngine {
        &mut self.drag
    }

    /// Current status message, if any
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Page list from the last refresh
    pub fn pages(&self) -> &[PageSummary] {
        &self.pages
    }

    /// Check whether a save is in flight
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
        });
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status = None;
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Release the pending drag gesture on `target`
    pub fn drop_at(&mut self, target: DropTarget) -> DropOutcome {
        self.drag.drop_at(&mut self.document, target)
    }

    /// A click on an element selects it
    pub fn click_element(&mut self, id: ElementId) {
        if self.document.contains(id) {
            self.document.select(Some(id));
        }
    }

    /// A click on the empty canvas clears the selection
    pub fn click_canvas(&mut self) {
        self.document.clear_selection();
    }

    /// Append a new element from the palette and select it
    pub fn add_element(&mut self, kind: ElementKind) -> Option<ElementId> {
        let element = Element::create_default(kind);
        let id = element.id();
        let len = self.document.len();
        self.document
            .insert(element, len, InsertOrigin::NewElement)
            .map(|_| id)
    }

    /// Inspector form for the current selection
    pub fn inspector_form(&self) -> Option<InspectorForm> {
        InspectorForm::build(&self.document)
    }

    /// Apply raw widget input to one property of the selected element
    ///
    /// A rejected value leaves the element untouched and is reported in the
    /// status line.
    pub fn edit_selected(&mut self, key: &str, input: &str) -> bool {
        match Inspector::edit_str(&mut self.document, key, input) {
            Ok(changed) => changed,
            Err(e) => {
                self.set_status(e.to_string(), StatusLevel::Warning);
                false
            }
        }
    }

    /// Delete the selected element
    pub fn delete_selected(&mut self) -> Option<Element> {
        Inspector::delete(&mut self.document)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Refresh the page list; a failing store yields an empty list
    pub async fn refresh_pages(&mut self, store: &dyn PageStore) -> &[PageSummary] {
        self.pages = match store.list_pages().await {
            Ok(pages) => pages,
            Err(e) => {
                warn!(error = %e, "Failed to list pages");
                Vec::new()
            }
        };
        &self.pages
    }

    /// Replace the document with a stored page
    ///
    /// On failure the document and title are left as they were.
    pub async fn load(&mut self, store: &dyn PageStore, id: &PageId) -> bool {
        let result = store.load_page(id).await;
        self.finish_load(id, result)
    }

    /// Apply the result of a page load
    ///
    /// Callers that keep editing while the load is in flight fetch the page
    /// themselves and hand the result over here. A successful result replaces
    /// the document wholesale, including edits made since the load started.
    pub fn finish_load(&mut self, id: &PageId, result: EditorResult<PageDocument>) -> bool {
        match result {
            Ok(page) => {
                let title = page
                    .title
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| self.config.untitled_title.clone());
                if let Err(e) = self.document.replace_all(page.layout) {
                    error!(%id, error = %e, "Loaded page has an invalid layout");
                    self.set_status("Failed to load page", StatusLevel::Error);
                    return false;
                }
                self.title = title;
                info!(%id, elements = self.document.len(), "Loaded page");
                self.set_status("Loaded", StatusLevel::Success);
                true
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to load page");
                self.set_status("Failed to load page", StatusLevel::Error);
                false
            }
        }
    }

    /// Snapshot the page for saving and mark a save as in flight
    ///
    /// Edits made after this call are not part of the request.
    pub fn begin_save(&mut self) -> EditorResult<SavePageRequest> {
        if self.saving {
            let err = EditorError::SaveInFlight;
            self.set_status(format!("Error: {}", err), StatusLevel::Warning);
            return Err(err);
        }

        self.saving = true;
        self.clear_status();
        debug!(elements = self.document.len(), "Save started");
        Ok(SavePageRequest {
            title: self.title.clone(),
            layout: self.document.elements().to_vec(),
            status: self.config.default_status.clone(),
        })
    }

    /// Record the result of a save started with [`begin_save`](Self::begin_save)
    pub fn finish_save(&mut self, result: EditorResult<SavePageResponse>) -> Option<PageId> {
        self.saving = false;
        match result {
            Ok(response) => {
                info!(id = %response.id, "Saved page");
                self.set_status(format!("Saved ID: {}", response.id), StatusLevel::Success);
                Some(response.id)
            }
            Err(e) => {
                error!(error = %e, "Failed to save page");
                self.set_status(format!("Error: {}", e), StatusLevel::Error);
                None
            }
        }
    }

    /// Save the page as a new stored page and refresh the page list
    pub async fn save(&mut self, store: &dyn PageStore) -> Option<PageId> {
        let request = self.begin_save().ok()?;
        let result = store.save_page(&request).await;
        let id = self.finish_save(result)?;
        self.refresh_pages(store).await;
        Some(id)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
