//! Pointer activation sensors.
//!
//! A press does not start a drag by itself. Mouse presses activate once the
//! pointer has travelled far enough; touch presses activate after being held
//! long enough without wandering, so scrolling a form on a phone does not pick
//! up fields. The host feeds raw pointer events (with its own millisecond
//! clock) into a [`PointerSensor`] and starts a drag on `Activated`.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::{MOUSE_ACTIVATION_DISTANCE_PX, TOUCH_ACTIVATION_DELAY_MS, TOUCH_ACTIVATION_TOLERANCE_PX};
use crate::hit::Point;

/// Device that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Condition a press must meet before it becomes a drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivationConstraint {
    /// Activate once the pointer has moved at least `px` from the press.
    Distance { px: f64 },
    /// Activate after `ms` held; moving more than `tolerance_px` first aborts.
    Delay { ms: u64, tolerance_px: f64 },
}

impl ActivationConstraint {
    /// Default constraint for `kind`.
    #[must_use]
    pub fn for_pointer(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Mouse => Self::Distance { px: MOUSE_ACTIVATION_DISTANCE_PX },
            PointerKind::Touch => Self::Delay { ms: TOUCH_ACTIVATION_DELAY_MS, tolerance_px: TOUCH_ACTIVATION_TOLERANCE_PX },
        }
    }
}

/// What the sensor concluded from the latest event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorOutcome {
    /// No press is being tracked.
    Idle,
    /// Press tracked, constraint not met yet.
    Pending,
    /// The constraint was met by this event. Start the drag now.
    Activated,
    /// Already activated earlier; keep dragging.
    Active,
    /// The press can no longer become a drag.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum SensorState {
    #[default]
    Idle,
    Pressed {
        origin: Point,
        pressed_at_ms: u64,
        constraint: ActivationConstraint,
    },
    Active,
}

/// Tracks one pointer from press to release.
#[derive(Debug, Clone, Default)]
pub struct PointerSensor {
    state: SensorState,
}

impl PointerSensor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a press with the default constraint for `kind`.
    pub fn press(&mut self, kind: PointerKind, at: Point, at_ms: u64) -> SensorOutcome {
        self.press_with(ActivationConstraint::for_pointer(kind), at, at_ms)
    }

    /// Start tracking a press with an explicit constraint. Replaces any press
    /// already being tracked.
    pub fn press_with(&mut self, constraint: ActivationConstraint, at: Point, at_ms: u64) -> SensorOutcome {
        self.state = SensorState::Pressed { origin: at, pressed_at_ms: at_ms, constraint };
        SensorOutcome::Pending
    }

    /// Pointer moved to `to` at `at_ms`.
    pub fn motion(&mut self, to: Point, at_ms: u64) -> SensorOutcome {
        match self.state {
            SensorState::Idle => SensorOutcome::Idle,
            SensorState::Active => SensorOutcome::Active,
            SensorState::Pressed { origin, pressed_at_ms, constraint } => {
                let moved = origin.distance(to);
                match constraint {
                    ActivationConstraint::Distance { px } => {
                        if moved >= px { self.activate() } else { SensorOutcome::Pending }
                    }
                    ActivationConstraint::Delay { ms, tolerance_px } => {
                        if moved > tolerance_px {
                            self.state = SensorState::Idle;
                            SensorOutcome::Aborted
                        } else if at_ms.saturating_sub(pressed_at_ms) >= ms {
                            self.activate()
                        } else {
                            SensorOutcome::Pending
                        }
                    }
                }
            }
        }
    }

    /// Clock tick without movement. Only delay constraints can activate here.
    pub fn tick(&mut self, at_ms: u64) -> SensorOutcome {
        match self.state {
            SensorState::Idle => SensorOutcome::Idle,
            SensorState::Active => SensorOutcome::Active,
            SensorState::Pressed { pressed_at_ms, constraint, .. } => match constraint {
                ActivationConstraint::Delay { ms, .. } if at_ms.saturating_sub(pressed_at_ms) >= ms => self.activate(),
                _ => SensorOutcome::Pending,
            },
        }
    }

    /// Pointer released. Returns whether a drag was active, in which case the
    /// host should drop.
    pub fn release(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = SensorState::Idle;
        was_active
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SensorState::Active
    }

    fn activate(&mut self) -> SensorOutcome {
        self.state = SensorState::Active;
        SensorOutcome::Activated
    }
}
