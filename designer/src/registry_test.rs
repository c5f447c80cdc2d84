use super::*;

#[test]
fn builtin_registers_every_type() {
    let registry = FieldRegistry::builtin();
    for field_type in FieldType::ALL {
        assert_eq!(registry.lookup(field_type).unwrap().field_type, field_type);
    }
}

#[test]
fn palette_in_registration_order() {
    let labels: Vec<_> = FieldRegistry::builtin().palette().iter().map(|p| p.label).collect();
    assert_eq!(labels, ["Text Field", "TextArea Field", "Paragraph Field"]);
}

#[test]
fn lookup_missing_type_fails() {
    let registry = FieldRegistry::with([fields::text::descriptor()]);
    let err = registry.lookup(FieldType::ParagraphField).unwrap_err();
    assert_eq!(err, RegistryError::UnknownType("ParagraphField".into()));
    assert!(!registry.contains(FieldType::ParagraphField));
}

#[test]
fn lookup_tag_rejects_unknown() {
    let registry = FieldRegistry::builtin();
    assert!(registry.lookup_tag("TextField").is_ok());
    assert!(matches!(registry.lookup_tag("Nope"), Err(RegistryError::UnknownType(t)) if t == "Nope"));
}

#[test]
fn duplicate_registration_keeps_position() {
    let registry = FieldRegistry::with([
        fields::text::descriptor(),
        fields::paragraph::descriptor(),
        fields::text::descriptor(),
    ]);
    assert_eq!(registry.palette().len(), 2);
    assert_eq!(registry.palette()[0].field_type, FieldType::TextField);
}

#[test]
fn construct_uses_defaults_and_id() {
    let element = FieldRegistry::builtin().construct(FieldType::TextAreaField, "new".into()).unwrap();
    assert_eq!(element.id.as_str(), "new");
    assert_eq!(element.attributes, Attributes::default_for(FieldType::TextAreaField));
}

#[test]
fn decode_list_checks_registry() {
    let registry = FieldRegistry::with([fields::text::descriptor()]);
    let json = r#"[{"id":"a","type":"TextField","attributes":{}},{"id":"b","type":"ParagraphField","attributes":{}}]"#;
    let err = registry.decode_list(json).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownType(RegistryError::UnknownType(t)) if t == "ParagraphField"));
}

#[test]
fn decode_list_malformed_json() {
    assert!(matches!(FieldRegistry::builtin().decode_list("{"), Err(DecodeError::Json(_))));
}

#[test]
fn decode_list_keeps_order() {
    let json = r#"[{"id":"b","type":"ParagraphField"},{"id":"a","type":"TextField","attributes":{"label":"Name"}}]"#;
    let elements = FieldRegistry::builtin().decode_list(json).unwrap();
    let ids: Vec<_> = elements.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["b", "a"]);
}
