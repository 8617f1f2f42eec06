//! Property inspector
//!
//! Builds an editable form for the selected element and routes edits back
//! into the [`Document`] as whole-record replacements.

use pagecraft_core::{
    Align, ButtonVariant, Choice, EditorError, EditorResult, ElementId, HeadingLevel,
    Identifiable, LineStyle, PropertyValue,
};
use pagecraft_model::{Document, Element, ElementKind};
use tracing::{debug, warn};

/// Input widget used to edit one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Widget {
    /// Multi-line text
    TextArea,
    /// Single-line text with an optional placeholder
    TextInput { placeholder: Option<&'static str> },
    /// One of a fixed set of `(value, label)` options
    Select {
        options: Vec<(&'static str, &'static str)>,
    },
}

/// One editable property of the selected element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub value: PropertyValue,
}

/// The inspector's view of the selected element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectorForm {
    pub element_id: ElementId,
    pub kind: ElementKind,
    pub title: &'static str,
    pub fields: Vec<FormField>,
    pub can_delete: bool,
}

impl InspectorForm {
    /// Form for the current selection, or `None` when nothing is selected
    pub fn build(doc: &Document) -> Option<Self> {
        doc.selected_element().map(Self::for_element)
    }

    /// Form for a specific element
    pub fn for_element(element: &Element) -> Self {
        let kind = element.kind();
        let props = element.props();
        let fields = kind
            .schema()
            .iter()
            .filter_map(|key| {
                let value = props.get(key)?;
                let (label, widget) = field_layout(kind, key);
                Some(FormField {
                    key,
                    label,
                    widget,
                    value,
                })
            })
            .collect();

        Self {
            element_id: element.id(),
            kind,
            title: kind.label(),
            fields,
            can_delete: true,
        }
    }

    /// Look up a field by property name
    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Property names in display order
    pub fn keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }
}

fn field_layout(kind: ElementKind, key: &str) -> (&'static str, Widget) {
    match (kind, key) {
        (_, "text") => ("Text", Widget::TextArea),
        (_, "level") => ("Level", select::<HeadingLevel>()),
        (_, "align") => ("Align", select::<Align>()),
        (_, "src") => ("Image URL", text_input(Some("https://..."))),
        (_, "alt") => ("Alt", text_input(Some("Description"))),
        (_, "width") => ("Width", text_input(Some("e.g. 100%, 600px"))),
        (_, "label") => ("Label", text_input(None)),
        (_, "href") => ("Link", text_input(None)),
        (ElementKind::Button, "variant") => ("Style", select::<ButtonVariant>()),
        (_, "style") => ("Style", select::<LineStyle>()),
        _ => ("Value", text_input(None)),
    }
}

fn select<C: Choice>() -> Widget {
    Widget::Select {
        options: C::options(),
    }
}

fn text_input(placeholder: Option<&'static str>) -> Widget {
    Widget::TextInput { placeholder }
}

// ============================================================================
// Edits
// ============================================================================

/// Routes inspector actions into the document
pub struct Inspector;

impl Inspector {
    /// Replace one property of the selected element
    ///
    /// The new record is the current one with `key` replaced, and it replaces
    /// the element's properties wholesale. Returns `Ok(false)` when nothing is
    /// selected; an unknown key or ill-typed value leaves the element as is.
    pub fn edit(doc: &mut Document, key: &str, value: PropertyValue) -> EditorResult<bool> {
        let Some(element) = doc.selected_element() else {
            debug!(key, "Ignoring edit with no selection");
            return Ok(false);
        };

        let id = element.id();
        let next = element.props().with_value(key, value).inspect_err(|e| {
            warn!(%id, key, error = %e, "Rejected property edit");
        })?;
        Ok(doc.replace_properties(id, next))
    }

    /// Replace one property from raw widget input
    pub fn edit_str(doc: &mut Document, key: &str, input: &str) -> EditorResult<bool> {
        let value = match doc.selected_element() {
            Some(element) if element.kind() == ElementKind::Heading && key == "level" => {
                parse_level(input)?
            }
            _ => PropertyValue::from(input),
        };
        Self::edit(doc, key, value)
    }

    /// Remove the selected element, if any
    pub fn delete(doc: &mut Document) -> Option<Element> {
        let id = doc.selected()?;
        doc.remove(id)
    }
}

fn parse_level(input: &str) -> EditorResult<PropertyValue> {
    input
        .trim()
        .parse::<i64>()
        .map(PropertyValue::Number)
        .map_err(|_| {
            EditorError::invalid_value(
                ElementKind::Heading.tag(),
                "level",
                format!("'{}' is not a number", input),
            )
        })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ElementProps, InsertOrigin};
    use pretty_assertions::assert_eq;

    fn doc_with(kind: ElementKind) -> (Document, ElementId) {
        let mut doc = Document::new();
        let element = Element::create_default(kind);
        let id = element.id();
        doc.insert(element, 0, InsertOrigin::NewElement);
        (doc, id)
    }

    #[test]
    fn test_no_selection_no_form() {
        let mut doc = Document::new();
        assert!(InspectorForm::build(&doc).is_none());
        assert_eq!(Inspector::edit(&mut doc, "text", "x".into()).unwrap(), false);
        assert!(Inspector::delete(&mut doc).is_none());
    }

    #[test]
    fn test_fields_match_schema() {
        for kind in ElementKind::ALL {
            let (doc, id) = doc_with(kind);
            let form = InspectorForm::build(&doc).unwrap();
            assert_eq!(form.element_id, id);
            assert_eq!(form.keys(), kind.schema().to_vec());
            assert!(form.can_delete);
        }
    }

    #[test]
    fn test_heading_form() {
        let (doc, _) = doc_with(ElementKind::Heading);
        let form = InspectorForm::build(&doc).unwrap();

        let text = form.field("text").unwrap();
        assert_eq!(text.label, "Text");
        assert_eq!(text.widget, Widget::TextArea);
        assert_eq!(text.value, PropertyValue::from("Your Heading"));

        let level = form.field("level").unwrap();
        assert_eq!(level.value, PropertyValue::Number(2));
        assert_eq!(
            level.widget,
            Widget::Select {
                options: vec![("1", "H1"), ("2", "H2"), ("3", "H3")]
            }
        );
    }

    #[test]
    fn test_image_and_button_labels() {
        let (doc, _) = doc_with(ElementKind::Image);
        let form = InspectorForm::build(&doc).unwrap();
        assert_eq!(form.field("src").unwrap().label, "Image URL");
        assert_eq!(
            form.field("width").unwrap().widget,
            Widget::TextInput {
                placeholder: Some("e.g. 100%, 600px")
            }
        );

        let (doc, _) = doc_with(ElementKind::Button);
        let form = InspectorForm::build(&doc).unwrap();
        assert_eq!(form.field("href").unwrap().label, "Link");
        assert_eq!(form.field("variant").unwrap().label, "Style");
    }

    #[test]
    fn test_edit_replaces_whole_record() {
        let (mut doc, id) = doc_with(ElementKind::Paragraph);
        assert!(Inspector::edit(&mut doc, "text", "Hello".into()).unwrap());
        assert!(Inspector::edit_str(&mut doc, "align", "center").unwrap());

        let ElementProps::Paragraph(props) = doc.get(id).unwrap().props() else {
            panic!("expected paragraph props");
        };
        assert_eq!(props.text, "Hello");
        assert_eq!(props.align, Align::Center);
    }

    #[test]
    fn test_edit_level_from_input() {
        let (mut doc, id) = doc_with(ElementKind::Heading);
        assert!(Inspector::edit_str(&mut doc, "level", "3").unwrap());
        assert_eq!(
            doc.get(id).unwrap().props().get("level"),
            Some(PropertyValue::Number(3))
        );

        assert!(Inspector::edit_str(&mut doc, "level", "big").is_err());
        assert!(Inspector::edit_str(&mut doc, "level", "7").is_err());
        assert_eq!(
            doc.get(id).unwrap().props().get("level"),
            Some(PropertyValue::Number(3))
        );
    }

    #[test]
    fn test_invalid_edit_leaves_element() {
        let (mut doc, id) = doc_with(ElementKind::Separator);
        let before = doc.get(id).unwrap().clone();

        assert!(Inspector::edit_str(&mut doc, "style", "wavy").is_err());
        assert!(Inspector::edit_str(&mut doc, "color", "red").is_err());
        assert_eq!(doc.get(id).unwrap(), &before);
    }

    #[test]
    fn test_delete_clears_selection() {
        let (mut doc, id) = doc_with(ElementKind::Button);
        let removed = Inspector::delete(&mut doc).unwrap();
        assert_eq!(removed.id(), id);
        assert!(doc.is_empty());
        assert!(doc.selected().is_none());
        assert!(InspectorForm::build(&doc).is_none());
    }
}
