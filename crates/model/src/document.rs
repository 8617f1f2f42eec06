//! Document state: the ordered element sequence and the current selection
//!
//! `Document` is the only owner of the element list. Every mutation keeps
//! two invariants: no two elements share an id, and the selection is either
//! empty or names an element that is present. Operations on ids that are no
//! longer present are silent no-ops (logged at `warn`), never errors.

use crate::element::{Element, ElementProps};
use crate::serialization::check_unique_ids;
use pagecraft_core::{EditorError, EditorResult, ElementId, Identifiable, Validatable};
use tracing::{debug, warn};

// ============================================================================
// InsertOrigin
// ============================================================================

/// Where an inserted element came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOrigin {
    /// Dropped or clicked from the palette; the new element becomes selected
    NewElement,
    /// Copy of an existing element; selection is left alone
    Duplicate,
}

// ============================================================================
// Document
// ============================================================================

/// An ordered sequence of elements plus the selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
    selected: Option<ElementId>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from an existing layout
    pub fn from_layout(layout: Vec<Element>) -> EditorResult<Self> {
        let mut doc = Self::new();
        doc.replace_all(layout)?;
        Ok(doc)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Elements in render order
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Element ids in render order
    pub fn ids(&self) -> Vec<ElementId> {
        self.elements.iter().map(|e| e.id()).collect()
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the document has no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Find an element by id
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Position of an element by id
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Check whether an element with `id` is present
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Currently selected id
    pub fn selected(&self) -> Option<ElementId> {
        self.selected
    }

    /// Currently selected element
    pub fn selected_element(&self) -> Option<&Element> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Check if `id` is the selected element
    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected == Some(id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Insert `element` at `index`, clamped to `[0, len]`
    ///
    /// Elements at or after the index shift right. Returns the index the
    /// element landed at, or `None` if an element with the same id is
    /// already present.
    pub fn insert(
        &mut self,
        element: Element,
        index: usize,
        origin: InsertOrigin,
    ) -> Option<usize> {
        let id = element.id();
        if self.contains(id) {
            warn!(%id, "Refusing to insert an element whose id is already present");
            return None;
        }

        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        if origin == InsertOrigin::NewElement {
            self.selected = Some(id);
        }

        debug!(%id, index, ?origin, "Inserted element");
        Some(index)
    }

    /// Move an element to `target_index`
    ///
    /// `target_index` is an index into the sequence *after* the element has
    /// been removed, and is clamped to it. Selection is unchanged. Returns
    /// `(from, to)`, or `None` if `id` is not present.
    pub fn move_existing(&mut self, id: ElementId, target_index: usize) -> Option<(usize, usize)> {
        let Some(from) = self.index_of(id) else {
            warn!(%id, "Ignoring move of an element that is not in the document");
            return None;
        };

        let element = self.elements.remove(from);
        let to = target_index.min(self.elements.len());
        self.elements.insert(to, element);

        debug!(%id, from, to, "Moved element");
        Some((from, to))
    }

    /// Replace an element's properties wholesale
    ///
    /// No-op returning `false` if `id` is absent or `props` belongs to a
    /// different kind than the element.
    pub fn replace_properties(&mut self, id: ElementId, props: ElementProps) -> bool {
        let Some(element) = self.elements.iter_mut().find(|e| e.id() == id) else {
            warn!(%id, "Ignoring property update for an element that is not in the document");
            return false;
        };

        if props.kind() != element.kind() {
            warn!(
                %id,
                expected = %element.kind(),
                found = %props.kind(),
                "Ignoring property update with a mismatched element kind"
            );
            return false;
        }

        element.set_props(props);
        debug!(%id, "Replaced element properties");
        true
    }

    /// Remove an element, clearing the selection if it was selected
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let Some(index) = self.index_of(id) else {
            warn!(%id, "Ignoring removal of an element that is not in the document");
            return None;
        };

        let removed = self.elements.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
        }

        debug!(%id, index, "Removed element");
        Some(removed)
    }

    /// Set or clear the selection
    ///
    /// Membership is not checked; callers only select ids that are present.
    pub fn select(&mut self, id: Option<ElementId>) {
        if let Some(id) = id.filter(|id| !self.contains(*id)) {
            warn!(%id, "Selecting an element that is not in the document");
        }
        self.selected = id;
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Insert a copy of an element, with a fresh id, right after it
    ///
    /// Returns the new element's id, or `None` if `id` is not present.
    pub fn duplicate(&mut self, id: ElementId) -> Option<ElementId> {
        let Some(index) = self.index_of(id) else {
            warn!(%id, "Ignoring duplication of an element that is not in the document");
            return None;
        };

        let copy = self.elements[index].clone_as_new();
        let copy_id = copy.id();
        self.insert(copy, index + 1, InsertOrigin::Duplicate)?;
        Some(copy_id)
    }

    /// Replace the whole sequence, clearing the selection
    ///
    /// A layout with duplicate ids is rejected and the document is left unchanged.
    pub fn replace_all(&mut self, layout: Vec<Element>) -> EditorResult<()> {
        check_unique_ids(&layout)?;
        self.elements = layout;
        self.selected = None;
        debug!(len = self.elements.len(), "Replaced document layout");
        Ok(())
    }
}

impl Validatable for Document {
    fn validate(&self) -> EditorResult<()> {
        check_unique_ids(&self.elements)?;

        if let Some(id) = self.selected {
            if !self.contains(id) {
                return Err(EditorError::validation(format!(
                    "Selected element {} is not in the document",
                    id
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
