use super::*;

fn decode(json: serde_json::Value) -> ElementInstance {
    serde_json::from_value(json).unwrap()
}

#[test]
fn empty_and_missing_attributes_share_defaults() {
    let empty = decode(serde_json::json!({ "id": "t", "type": "TextAreaField", "attributes": {} }));
    let missing = decode(serde_json::json!({ "id": "t", "type": "TextAreaField" }));
    assert_eq!(empty.attributes.get("label"), Some("Text area".into()));
    assert_eq!(empty, missing);
    assert_eq!(empty.attributes, Attributes::default_for(FieldType::TextAreaField));
}

#[test]
fn partial_attributes_keep_other_defaults() {
    let element = decode(serde_json::json!({
        "id": "t",
        "type": "TextAreaField",
        "attributes": { "required": true, "rows": 6 }
    }));
    let Attributes::TextAreaField(a) = &element.attributes else {
        panic!("expected text area attributes");
    };
    assert!(a.base.required);
    assert_eq!(a.rows, 6);
    assert_eq!(a.base.label, "Text area");
    assert_eq!(a.base.place_holder, TextFieldAttributes::default().place_holder);
}

#[test]
fn configured_attributes_survive_encoding() {
    let mut attrs = TextAreaAttributes::default();
    attrs.base.label = "Comments".into();
    attrs.rows = 8;
    let element = ElementInstance::new("t".into(), Attributes::TextAreaField(attrs));
    let json = serde_json::to_value(&element).unwrap();
    assert_eq!(decode(json), element);
}
