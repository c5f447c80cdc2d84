use serde_json::json;

use super::*;
use crate::fields::text::TextFieldAttributes;

fn text_element(id: &str, label: &str) -> ElementInstance {
    ElementInstance::new(
        ElementId::from(id),
        Attributes::TextField(TextFieldAttributes { label: label.into(), ..TextFieldAttributes::default() }),
    )
}

// =============================================================
// Wire shape
// =============================================================

#[test]
fn serializes_as_id_type_attributes() {
    let value = serde_json::to_value(text_element("a", "Name")).unwrap();
    assert_eq!(value["id"], "a");
    assert_eq!(value["type"], "TextField");
    assert_eq!(value["attributes"]["label"], "Name");
    assert_eq!(value["attributes"]["placeHolder"], "value here");
}

#[test]
fn deserialize_round_trips() {
    let original = vec![
        text_element("a", "Name"),
        ElementInstance::new("b".into(), Attributes::default_for(FieldType::TextAreaField)),
        ElementInstance::new("c".into(), Attributes::default_for(FieldType::ParagraphField)),
    ];
    let json = serde_json::to_string(&original).unwrap();
    let back: Vec<ElementInstance> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, original);
}

#[test]
fn missing_attributes_use_defaults() {
    let element: ElementInstance = serde_json::from_value(json!({ "id": "p", "type": "ParagraphField" })).unwrap();
    assert_eq!(element.attributes, Attributes::default_for(FieldType::ParagraphField));
}

#[test]
fn unknown_type_fails_to_decode() {
    let raw: RawElement = serde_json::from_value(json!({ "id": "x", "type": "Signature" })).unwrap();
    let err = ElementInstance::try_from(raw).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownType(RegistryError::UnknownType(ref t)) if t == "Signature"));
}

#[test]
fn bad_attributes_name_the_element() {
    let raw: RawElement =
        serde_json::from_value(json!({ "id": "x", "type": "TextField", "attributes": { "required": "no" } })).unwrap();
    let err = ElementInstance::try_from(raw).unwrap_err();
    assert!(matches!(err, DecodeError::Attributes { ref id, .. } if id.as_str() == "x"));
}

#[test]
fn field_type_follows_attributes() {
    let element = ElementInstance::new("t".into(), Attributes::default_for(FieldType::TextAreaField));
    assert_eq!(element.field_type(), FieldType::TextAreaField);
}

// =============================================================
// Id generation
// =============================================================

#[test]
fn sequential_ids_count_from_one() {
    let mut ids = SequentialIds::new("el");
    assert_eq!(ids.next_id().as_str(), "el-1");
    assert_eq!(ids.next_id().as_str(), "el-2");
}

#[test]
fn uuid_ids_are_distinct() {
    let mut ids = UuidIds;
    let a = ids.next_id();
    let b = ids.next_id();
    assert_ne!(a, b);
    assert!(Uuid::parse_str(a.as_str()).is_ok());
}

#[test]
fn element_id_display() {
    assert_eq!(ElementId::new("abc").to_string(), "abc");
}
