use pagecraft_model::{
    Document, Element, ElementKind, Identifiable, InsertOrigin, PageDocument, page_from_str,
};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn populated(kinds: &[ElementKind]) -> Document {
    let layout = kinds.iter().map(|k| Element::create_default(*k)).collect();
    Document::from_layout(layout).unwrap()
}

#[test]
fn test_ids_stay_unique_across_inserts_and_duplicates() {
    let mut doc = Document::new();
    for (i, kind) in ElementKind::ALL.iter().cycle().take(20).enumerate() {
        let index = i * 7 % (doc.len() + 1);
        doc.insert(Element::create_default(*kind), index, InsertOrigin::NewElement);
        if let Some(first) = doc.ids().first().copied() {
            doc.duplicate(first);
        }
    }

    let ids = doc.ids();
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.len(), 40);
}

#[test]
fn test_reinserting_present_id_is_refused() {
    let mut doc = populated(&[ElementKind::Heading]);
    let existing = doc.elements()[0].clone();
    assert_eq!(doc.insert(existing, 0, InsertOrigin::NewElement), None);
    assert_eq!(doc.len(), 1);
}

#[test]
fn test_default_props_match_schema_for_every_kind() {
    for kind in ElementKind::ALL {
        let element = Element::create_default(kind);
        let mut keys: Vec<String> = element.props().to_map().keys().cloned().collect();
        let mut schema: Vec<String> = kind.schema().iter().map(|k| k.to_string()).collect();
        keys.sort();
        schema.sort();
        assert_eq!(keys, schema, "schema mismatch for {}", kind);
    }
}

#[test]
fn test_insert_beyond_length_appends() {
    let mut doc = populated(&[ElementKind::Heading, ElementKind::Paragraph]);
    let element = Element::create_default(ElementKind::Image);
    let id = element.id();

    assert_eq!(doc.insert(element, 5, InsertOrigin::NewElement), Some(2));
    assert_eq!(doc.index_of(id), Some(2));
    assert_eq!(doc.selected(), Some(id));
}

#[test]
fn test_selection_clearing_on_remove() {
    let mut doc = populated(&[ElementKind::Heading, ElementKind::Paragraph, ElementKind::Button]);
    let ids = doc.ids();

    doc.select(Some(ids[1]));
    doc.remove(ids[0]);
    assert_eq!(doc.selected(), Some(ids[1]));

    doc.remove(ids[1]);
    assert_eq!(doc.selected(), None);

    assert!(doc.remove(ids[1]).is_none());
    assert_eq!(doc.ids(), vec![ids[2]]);
}

#[test]
fn test_replacing_with_own_props_changes_nothing() {
    let mut doc = populated(&[ElementKind::Heading, ElementKind::Image, ElementKind::Separator]);
    let before = doc.clone();
    let target = doc.ids()[1];
    let props = doc.get(target).unwrap().props().clone();

    assert!(doc.replace_properties(target, props));
    assert_eq!(doc, before);
}

#[test]
fn test_duplicate_lands_right_after_source() {
    let mut doc = populated(&[ElementKind::Heading, ElementKind::Button, ElementKind::Paragraph]);
    let before = doc.clone();
    let source = doc.ids()[1];

    let copy = doc.duplicate(source).unwrap();
    assert_ne!(copy, source);
    assert_eq!(doc.index_of(copy), Some(2));
    assert_eq!(doc.get(copy).unwrap().props(), doc.get(source).unwrap().props());

    for element in before.elements() {
        assert_eq!(doc.get(element.id()), Some(element));
    }
}

#[test]
fn test_page_document_round_trip() {
    let layout: Vec<Element> = ElementKind::ALL
        .iter()
        .map(|k| Element::create_default(*k))
        .collect();
    let page = PageDocument::new("Everything", layout);

    let json = serde_json::to_string(&page).unwrap();
    assert_eq!(page_from_str(&json).unwrap(), page);
}
