//! # Drag-Reorder Engine
//!
//! Turns drag gestures into insertions and moves on a [`Document`].
//!
//! A gesture starts either in the palette (`new`, carrying an element kind)
//! or on an existing element (`move`, carrying its id). The engine holds the
//! gesture as a pending value until it is dropped or cancelled; the pending
//! value is cleared on both, whatever the outcome.
//!
//! ## Drop zones
//!
//! A document of `len` elements exposes `len + 1` insertion points: zone `0`
//! before the first element, zone `i` between elements `i - 1` and `i`, and
//! zone `len` after the last. Dropping onto an element itself only selects it.
//!
//! ## Move arithmetic
//!
//! Zones are numbered against the sequence *before* the dragged element is
//! taken out. Removing it shifts every later index down by one, so a drop
//! further down the list lands one slot earlier:
//!
//! ```text
//! [A, B, C, D]   move B (index 1) to zone 3  ->  target 2  ->  [A, C, B, D]
//! [A, B, C, D]   move B (index 1) to zone 0  ->  target 0  ->  [B, A, C, D]
//! ```

use pagecraft_core::{EditorResult, ElementId, Identifiable};
use pagecraft_model::{Document, Element, ElementKind, InsertOrigin};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

// ============================================================================
// Drag Payload
// ============================================================================

/// The intent carried from drag start to drop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DragPayload {
    /// A new element dragged from the palette
    New {
        #[serde(rename = "type")]
        element_kind: ElementKind,
    },
    /// An existing element being reordered
    Move { id: ElementId },
}

impl DragPayload {
    /// Serialize for a drag-transfer channel
    pub fn encode(&self) -> EditorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a transferred payload; anything malformed yields `None`
    pub fn decode(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            return None;
        }
        match serde_json::from_str(raw) {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!(error = %e, "Ignoring malformed drag payload");
                None
            }
        }
    }
}

// ============================================================================
// Drop Targets and Outcomes
// ============================================================================

/// Where a gesture was released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// An insertion point between elements, `0..=len`
    Zone(usize),
    /// The canvas body outside any zone; appends
    Canvas,
    /// Directly onto an element; behaves as a click
    OnElement(ElementId),
}

/// Why a drop changed nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No gesture was pending
    NoGesture,
    /// The transferred payload could not be parsed
    MalformedPayload,
    /// The referenced element is no longer in the document
    StaleElement(ElementId),
    /// The document refused the insertion
    Rejected,
}

/// What a drop did to the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    Inserted { id: ElementId, index: usize },
    Moved { id: ElementId, from: usize, to: usize },
    Selected(ElementId),
    Ignored(IgnoreReason),
}

impl DropOutcome {
    /// Check whether the element order changed or grew
    pub fn mutated(&self) -> bool {
        matches!(self, DropOutcome::Inserted { .. } | DropOutcome::Moved { .. })
    }
}

// ============================================================================
// Index Arithmetic
// ============================================================================

/// Insertion points of a document with `len` elements
pub fn drop_zones(len: usize) -> RangeInclusive<usize> {
    0..=len
}

/// The zones immediately before and after the element at `index`
pub fn zones_around(index: usize) -> (usize, usize) {
    (index, index + 1)
}

/// Target index after removal for an element at `current` dropped at `drop_index`
pub fn effective_move_target(current: usize, drop_index: usize) -> usize {
    if drop_index > current {
        drop_index - 1
    } else {
        drop_index
    }
}

/// Apply a gesture to the document at a raw drop index
///
/// This is the stateless core of a drop; [`DragEngine::drop_at`] wraps it.
pub fn apply_drop(doc: &mut Document, payload: &DragPayload, drop_index: usize) -> DropOutcome {
    match payload {
        DragPayload::New { element_kind } => {
            let element = Element::create_default(*element_kind);
            let id = element.id();
            match doc.insert(element, drop_index, InsertOrigin::NewElement) {
                Some(index) => DropOutcome::Inserted { id, index },
                None => DropOutcome::Ignored(IgnoreReason::Rejected),
            }
        }
        DragPayload::Move { id } => {
            let Some(current) = doc.index_of(*id) else {
                warn!(%id, "Ignoring drop of an element that is no longer in the document");
                return DropOutcome::Ignored(IgnoreReason::StaleElement(*id));
            };

            let target = effective_move_target(current, drop_index);
            match doc.move_existing(*id, target) {
                Some((from, to)) => DropOutcome::Moved { id: *id, from, to },
                None => DropOutcome::Ignored(IgnoreReason::StaleElement(*id)),
            }
        }
    }
}

// ============================================================================
// Drag Engine
// ============================================================================

/// Holds the pending gesture between drag start and drop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragEngine {
    pending: Option<DragPayload>,
    is_over: bool,
}

impl DragEngine {
    /// Create an idle engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture, replacing any pending one
    pub fn begin(&mut self, payload: DragPayload) {
        debug!(?payload, "Drag started");
        self.pending = Some(payload);
    }

    /// Start dragging a new element from the palette
    pub fn begin_new(&mut self, kind: ElementKind) {
        self.begin(DragPayload::New { element_kind: kind });
    }

    /// Start dragging an existing element
    pub fn begin_move(&mut self, id: ElementId) {
        self.begin(DragPayload::Move { id });
    }

    /// Start a gesture from a serialized payload
    ///
    /// Returns `false`, leaving no gesture pending, when the payload is malformed.
    pub fn begin_from_transfer(&mut self, raw: &str) -> bool {
        match DragPayload::decode(raw) {
            Some(payload) => {
                self.begin(payload);
                true
            }
            None => {
                self.pending = None;
                false
            }
        }
    }

    /// The pending gesture, if any
    pub fn pending(&self) -> Option<&DragPayload> {
        self.pending.as_ref()
    }

    /// Check whether a gesture is in progress
    pub fn is_dragging(&self) -> bool {
        self.pending.is_some()
    }

    /// Check whether a gesture is hovering over the canvas
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// The pointer entered or moved over the canvas
    pub fn drag_over(&mut self) {
        self.is_over = true;
    }

    /// The pointer left the canvas
    pub fn drag_leave(&mut self) {
        self.is_over = false;
    }

    /// Abandon the gesture without touching the document
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            debug!("Drag cancelled");
        }
        self.is_over = false;
    }

    /// Release the pending gesture on `target`
    pub fn drop_at(&mut self, doc: &mut Document, target: DropTarget) -> DropOutcome {
        let pending = self.pending.take();
        self.is_over = false;

        let outcome = match (target, pending) {
            (DropTarget::OnElement(id), _) => select_on_drop(doc, id),
            (_, None) => DropOutcome::Ignored(IgnoreReason::NoGesture),
            (DropTarget::Zone(index), Some(payload)) => apply_drop(doc, &payload, index),
            (DropTarget::Canvas, Some(payload)) => apply_drop(doc, &payload, doc.len()),
        };

        debug!(?target, ?outcome, "Drop handled");
        outcome
    }

    /// Release a serialized payload on `target`
    ///
    /// The transferred payload replaces any pending gesture; a malformed one
    /// is ignored entirely.
    pub fn drop_transfer(
        &mut self,
        doc: &mut Document,
        raw: &str,
        target: DropTarget,
    ) -> DropOutcome {
        if let DropTarget::OnElement(_) = target {
            self.pending = None;
            return self.drop_at(doc, target);
        }
        if !self.begin_from_transfer(raw) {
            self.is_over = false;
            return DropOutcome::Ignored(IgnoreReason::MalformedPayload);
        }
        self.drop_at(doc, target)
    }
}

fn select_on_drop(doc: &mut Document, id: ElementId) -> DropOutcome {
    if doc.contains(id) {
        doc.select(Some(id));
        DropOutcome::Selected(id)
    } else {
        DropOutcome::Ignored(IgnoreReason::StaleElement(id))
    }
}

// ============================================================================
// Tests
// ============================================================================
