//! End-to-end editing through the public API: build a form by dragging from
//! the palette, reorder it, configure fields, round-trip it through JSON, then
//! fill it in.

use designer::drag::DragSource;
use designer::element::{ElementId, SequentialIds};
use designer::field::FieldType;
use designer::hit::{DropTarget, Half, Point, Rect, ZoneLayout};
use designer::registry::FieldRegistry;
use designer::session::{Action, EditSession, SessionError};
use designer::store::ElementStore;
use designer::submission::{ValueMap, validate_submission};

const ROW_HEIGHT: f64 = 60.0;

/// Stacked layout matching the session's current order.
fn layout_for(session: &EditSession<'_>) -> ZoneLayout {
    ZoneLayout {
        canvas: Rect::new(0.0, 0.0, 500.0, 1000.0),
        elements: session
            .elements()
            .iter()
            .zip(0_u32..)
            .map(|(e, i)| (e.id.clone(), Rect::new(0.0, f64::from(i) * ROW_HEIGHT, 500.0, ROW_HEIGHT)))
            .collect(),
    }
}

/// Pointer position over the given half of row `row`.
fn over(row: u32, half: Half) -> Point {
    let top = f64::from(row) * ROW_HEIGHT;
    match half {
        Half::Top => Point::new(10.0, top + 5.0),
        Half::Bottom => Point::new(10.0, top + ROW_HEIGHT - 5.0),
    }
}

fn drop_new(session: &mut EditSession<'_>, field_type: FieldType, at: Point) -> Result<Vec<Action>, SessionError> {
    session.drag_start(DragSource::NewField(field_type))?;
    let layout = layout_for(session);
    session.drag_hover(at, &layout)?;
    session.drag_drop()
}

fn order(session: &EditSession<'_>) -> Vec<String> {
    session.elements().iter().map(|e| e.id.to_string()).collect()
}

#[test]
fn build_configure_and_fill() {
    let registry = FieldRegistry::builtin();
    let mut session = EditSession::new(1, &registry).with_ids(SequentialIds::new("f"));

    // Empty canvas: the whole canvas is the drop zone.
    drop_new(&mut session, FieldType::TextField, Point::new(50.0, 500.0)).unwrap();
    drop_new(&mut session, FieldType::TextField, over(0, Half::Bottom)).unwrap();
    drop_new(&mut session, FieldType::ParagraphField, over(0, Half::Top)).unwrap();
    assert_eq!(order(&session), ["f-3", "f-1", "f-2"]);

    // With elements present, empty canvas space is not a target.
    session.drag_start(DragSource::NewField(FieldType::TextAreaField)).unwrap();
    let layout = layout_for(&session);
    assert_eq!(session.drag_hover(Point::new(50.0, 900.0), &layout).unwrap(), None);
    assert_eq!(session.drag_drop().unwrap(), vec![Action::RenderNeeded]);
    assert_eq!(session.elements().len(), 3);

    // Move the paragraph to the end.
    session.drag_start(DragSource::Existing("f-3".into())).unwrap();
    let layout = layout_for(&session);
    assert_eq!(
        session.drag_hover(over(2, Half::Bottom), &layout).unwrap(),
        Some(DropTarget::Element { id: "f-2".into(), half: Half::Bottom })
    );
    session.drag_drop().unwrap();
    assert_eq!(order(&session), ["f-1", "f-2", "f-3"]);

    // Make both inputs required; an invalid label is held back.
    for id in ["f-1", "f-2"] {
        session.select(&id.into()).unwrap();
        session.set_property("required", true).unwrap();
        session.set_property("label", "x").unwrap();
        assert!(matches!(session.blur_properties().unwrap()[0], Action::PropertiesRejected(_)));
        session.set_property("label", format!("Question {id}")).unwrap();
        assert_eq!(session.blur_properties().unwrap()[0], Action::ElementUpdated { id: id.into() });
    }

    // Round-trip through the persisted form.
    let json = ElementStore::from_elements(session.elements().to_vec()).unwrap().to_json().unwrap();
    let reloaded = ElementStore::from_json(&registry, &json).unwrap();
    assert_eq!(reloaded.to_ordered_list(), session.elements());

    // Fill-time validation is independent per field.
    let elements = reloaded.to_ordered_list();
    let mut values: ValueMap = [("f-1", "a"), ("f-2", "b")].into_iter().map(|(k, v)| (k.into(), v.into())).collect();
    assert!(validate_submission(&registry, elements, &values).unwrap().allowed);
    values.insert(ElementId::from("f-2"), String::new());
    let report = validate_submission(&registry, elements, &values).unwrap();
    assert!(!report.allowed);
    assert_eq!(report.errors.into_iter().collect::<Vec<_>>(), [ElementId::from("f-2")]);
}
