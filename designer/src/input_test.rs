use super::*;

fn at(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Constraints
// =============================================================

#[test]
fn default_constraints() {
    assert_eq!(ActivationConstraint::for_pointer(PointerKind::Mouse), ActivationConstraint::Distance { px: 10.0 });
    assert_eq!(
        ActivationConstraint::for_pointer(PointerKind::Touch),
        ActivationConstraint::Delay { ms: 300, tolerance_px: 5.0 }
    );
}

// =============================================================
// Mouse
// =============================================================

#[test]
fn mouse_activates_at_ten_pixels() {
    let mut sensor = PointerSensor::new();
    assert_eq!(sensor.press(PointerKind::Mouse, at(0.0, 0.0), 0), SensorOutcome::Pending);
    assert_eq!(sensor.motion(at(6.0, 0.0), 5), SensorOutcome::Pending);
    assert_eq!(sensor.motion(at(6.0, 8.0), 10), SensorOutcome::Activated);
    assert_eq!(sensor.motion(at(50.0, 50.0), 20), SensorOutcome::Active);
    assert!(sensor.is_active());
}

#[test]
fn mouse_ignores_time() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Mouse, at(0.0, 0.0), 0);
    assert_eq!(sensor.tick(10_000), SensorOutcome::Pending);
}

#[test]
fn release_before_activation_is_click() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Mouse, at(0.0, 0.0), 0);
    sensor.motion(at(3.0, 0.0), 5);
    assert!(!sensor.release());
    assert_eq!(sensor.motion(at(100.0, 0.0), 10), SensorOutcome::Idle);
}

#[test]
fn release_after_activation_drops() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Mouse, at(0.0, 0.0), 0);
    sensor.motion(at(20.0, 0.0), 5);
    assert!(sensor.release());
    assert!(!sensor.is_active());
}

// =============================================================
// Touch
// =============================================================

#[test]
fn touch_activates_after_delay() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Touch, at(0.0, 0.0), 1_000);
    assert_eq!(sensor.tick(1_299), SensorOutcome::Pending);
    assert_eq!(sensor.tick(1_300), SensorOutcome::Activated);
}

#[test]
fn touch_small_wobble_still_activates() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Touch, at(0.0, 0.0), 0);
    assert_eq!(sensor.motion(at(3.0, 4.0), 100), SensorOutcome::Pending);
    assert_eq!(sensor.motion(at(3.0, 4.0), 300), SensorOutcome::Activated);
}

#[test]
fn touch_moving_too_far_aborts() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Touch, at(0.0, 0.0), 0);
    assert_eq!(sensor.motion(at(6.0, 0.0), 100), SensorOutcome::Aborted);
    assert_eq!(sensor.tick(400), SensorOutcome::Idle);
}

#[test]
fn touch_free_movement_once_active() {
    let mut sensor = PointerSensor::new();
    sensor.press(PointerKind::Touch, at(0.0, 0.0), 0);
    sensor.tick(300);
    assert_eq!(sensor.motion(at(200.0, 0.0), 350), SensorOutcome::Active);
}

#[test]
fn custom_constraint() {
    let mut sensor = PointerSensor::new();
    sensor.press_with(ActivationConstraint::Distance { px: 2.0 }, at(0.0, 0.0), 0);
    assert_eq!(sensor.motion(at(2.0, 0.0), 1), SensorOutcome::Activated);
}
