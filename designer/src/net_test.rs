use super::*;

#[test]
fn success_body_decodes() {
    let created: CreatedForm = read_response(201, r#"{"id":42}"#).unwrap();
    assert_eq!(created.id, 42);
}

#[test]
fn empty_success_body_is_unit() {
    read_response::<()>(204, "").unwrap();
}

#[test]
fn bad_success_body_is_decode_error() {
    let err = read_response::<CreatedForm>(200, "not json").unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
}

#[test]
fn not_found_maps_with_message() {
    let err = error_from_body(404, r#"{"code":"E_FORM_NOT_FOUND","message":"form 3 not found"}"#);
    assert_eq!(err, BackendError::NotFound("form 3 not found".into()));
}

#[test]
fn publish_state_codes() {
    assert_eq!(error_from_body(409, r#"{"code":"E_NOT_PUBLISHED","message":"x"}"#), BackendError::NotPublished);
    assert_eq!(error_from_body(409, r#"{"code":"E_ALREADY_PUBLISHED","message":"x"}"#), BackendError::AlreadyPublished);
}

#[test]
fn unprocessable_is_rejected() {
    let err = error_from_body(422, r#"{"code":"E_INVALID_CONTENT","message":"unknown field type: X"}"#);
    assert_eq!(
        err,
        BackendError::Rejected { code: "E_INVALID_CONTENT".into(), message: "unknown field type: X".into() }
    );
}

#[test]
fn non_json_error_body_kept_as_message() {
    let err = error_from_body(502, "Bad Gateway");
    assert_eq!(err, BackendError::Status { status: 502, message: "Bad Gateway".into() });
}

#[test]
fn read_response_routes_failures() {
    let err = read_response::<CreatedForm>(500, r#"{"code":"E_DATABASE","message":"db down"}"#).unwrap_err();
    assert_eq!(err, BackendError::Status { status: 500, message: "db down".into() });
}

#[test]
fn new_trims_trailing_slash() {
    let client = HttpFormClient::new("http://localhost:3000/", None).unwrap();
    assert_eq!(client.base_url(), "http://localhost:3000");
}

#[test]
fn submit_body_shape() {
    let mut values = ValueMap::new();
    values.insert("a".into(), "x".into());
    let json = serde_json::to_value(SubmitBody { values }).unwrap();
    assert_eq!(json, serde_json::json!({ "values": { "a": "x" } }));
}
