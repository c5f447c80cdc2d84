use super::*;
use crate::element::ElementInstance;
use crate::field::FieldType;

fn setup() -> (ElementStore, FieldRegistry) {
    let store = ElementStore::from_elements(vec![
        ElementInstance::new("a".into(), Attributes::default_for(FieldType::TextField)),
        ElementInstance::new("b".into(), Attributes::default_for(FieldType::TextAreaField)),
    ])
    .unwrap();
    (store, FieldRegistry::builtin())
}

fn label_of(store: &ElementStore, id: &str) -> Option<PropertyValue> {
    store.get(&id.into()).and_then(|e| e.attributes.get("label"))
}

// =============================================================
// Selection
// =============================================================

#[test]
fn select_seeds_draft() {
    let (store, _) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"b".into()).unwrap();
    assert_eq!(binder.selected().map(ElementId::as_str), Some("b"));
    assert_eq!(binder.draft(), Some(&Attributes::default_for(FieldType::TextAreaField)));
    assert!(!binder.is_dirty());
}

#[test]
fn select_missing_keeps_previous() {
    let (store, _) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    assert!(matches!(binder.select(&store, &"zz".into()), Err(BinderError::NotFound(_))));
    assert_eq!(binder.selected().map(ElementId::as_str), Some("a"));
}

#[test]
fn set_without_selection() {
    let mut binder = PropertiesBinder::new();
    assert!(matches!(binder.set("label", "x".into()), Err(BinderError::NothingSelected)));
}

#[test]
fn set_unknown_key_rejected() {
    let (store, _) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    assert!(matches!(binder.set("rows", 4_i64.into()), Err(BinderError::Property(_))));
}

// =============================================================
// Deferred commit
// =============================================================

#[test]
fn edits_do_not_touch_store_until_commit() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "Full name".into()).unwrap();
    assert!(binder.is_dirty());
    assert_eq!(label_of(&store, "a"), Some("Text field".into()));

    assert_eq!(binder.commit(&mut store, &registry).unwrap(), CommitOutcome::Applied);
    assert_eq!(label_of(&store, "a"), Some("Full name".into()));
    assert!(!binder.is_dirty());
}

#[test]
fn invalid_draft_is_rejected_and_kept() {
    let (mut store, registry) = setup();
    let before = store.clone();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "".into()).unwrap();

    let CommitOutcome::Rejected(errors) = binder.commit(&mut store, &registry).unwrap() else {
        panic!("expected rejection");
    };
    assert!(errors.contains("label"));
    assert_eq!(store, before);
    assert_eq!(binder.draft().and_then(|d| d.get("label")), Some("".into()));
    assert!(binder.errors().contains("label"));
}

#[test]
fn fixing_draft_clears_errors_and_commits() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "".into()).unwrap();
    binder.commit(&mut store, &registry).unwrap();

    binder.set("label", "Ok".into()).unwrap();
    assert_eq!(binder.commit(&mut store, &registry).unwrap(), CommitOutcome::Applied);
    assert!(binder.errors().is_empty());
    assert_eq!(label_of(&store, "a"), Some("Ok".into()));
}

#[test]
fn commit_unchanged_draft() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    assert_eq!(binder.commit(&mut store, &registry).unwrap(), CommitOutcome::Unchanged);
}

#[test]
fn commit_without_selection() {
    let (mut store, registry) = setup();
    assert_eq!(PropertiesBinder::new().commit(&mut store, &registry).unwrap(), CommitOutcome::NothingSelected);
}

#[test]
fn commit_after_element_removed_is_not_found() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "Name".into()).unwrap();
    store.remove_by_id(&"a".into());
    assert!(matches!(binder.commit(&mut store, &registry), Err(BinderError::NotFound(_))));
    assert_eq!(binder.selected(), None);
    assert!(!store.contains(&"a".into()));
}

#[test]
fn commit_after_external_change_keeps_store_and_reseeds() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "Draft label".into()).unwrap();

    let mut external = Attributes::default_for(FieldType::TextField);
    external.set("label", "External label".into()).unwrap();
    store.update_attributes(&"a".into(), external.clone()).unwrap();

    assert_eq!(binder.commit(&mut store, &registry).unwrap(), CommitOutcome::Reseeded);
    assert_eq!(label_of(&store, "a"), Some("External label".into()));
    assert_eq!(binder.draft(), Some(&external));
    assert!(!binder.is_dirty());

    binder.set("label", "Edited again".into()).unwrap();
    assert_eq!(binder.commit(&mut store, &registry).unwrap(), CommitOutcome::Applied);
    assert_eq!(label_of(&store, "a"), Some("Edited again".into()));
}

#[test]
fn reselect_discards_uncommitted_edits() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "Draft only".into()).unwrap();
    binder.select(&store, &"b".into()).unwrap();
    binder.select(&store, &"a".into()).unwrap();
    assert_eq!(binder.draft().and_then(|d| d.get("label")), Some("Text field".into()));
    assert_eq!(binder.commit(&mut store, &registry).unwrap(), CommitOutcome::Unchanged);
}

// =============================================================
// Sync
// =============================================================

#[test]
fn sync_reseeds_on_external_change() {
    let (mut store, _) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "Mine".into()).unwrap();

    let mut external = Attributes::default_for(FieldType::TextField);
    external.set("label", "Theirs".into()).unwrap();
    store.update_attributes(&"a".into(), external.clone()).unwrap();

    assert_eq!(binder.sync(&store), SyncOutcome::Reseeded);
    assert_eq!(binder.draft(), Some(&external));
}

#[test]
fn sync_unchanged_keeps_draft() {
    let (store, _) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"a".into()).unwrap();
    binder.set("label", "Mine".into()).unwrap();
    assert_eq!(binder.sync(&store), SyncOutcome::Unchanged);
    assert!(binder.is_dirty());
}

#[test]
fn sync_deselects_removed_element() {
    let (mut store, _) = setup();
    let mut binder = PropertiesBinder::new();
    binder.select(&store, &"b".into()).unwrap();
    store.remove_by_id(&"b".into());
    assert_eq!(binder.sync(&store), SyncOutcome::Deselected);
    assert_eq!(binder.selected(), None);
}

// =============================================================
// Panel inputs
// =============================================================

#[test]
fn inputs_reflect_draft_and_errors() {
    let (mut store, registry) = setup();
    let mut binder = PropertiesBinder::new();
    assert!(binder.inputs(&registry).unwrap().is_empty());

    binder.select(&store, &"b".into()).unwrap();
    binder.set("rows", 12_i64.into()).unwrap();
    binder.commit(&mut store, &registry).unwrap();
    let inputs = binder.inputs(&registry).unwrap();
    let rows = inputs.iter().find(|i| i.key == "rows").unwrap();
    assert_eq!(rows.value, PropertyValue::Number(12));
    assert_eq!(rows.error.as_deref(), Some("must be between 1 and 10"));
}
