//! Drag session state machine.
//!
//! `Idle -> Dragging -> {dropped, cancelled} -> Idle`. One session at a time.
//! The controller never touches the store while hovering; the store is only
//! mutated on drop, and only when the session has a hover target. A cancel
//! (or a drop over nothing) leaves the store exactly as it was.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::mem;

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementInstance, IdGenerator};
use crate::field::FieldType;
use crate::hit::{DropTarget, Point, ZoneLayout, hit_test};
use crate::registry::{FieldRegistry, RegistryError};
use crate::store::{ElementStore, StoreError};

/// What is being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DragSource {
    /// A palette button: dropping creates a new element of this type.
    NewField(FieldType),
    /// An element already on the canvas: dropping reorders it.
    Existing(ElementId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub source: DragSource,
    pub hover_target: Option<DropTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Drag lifecycle event as sent by a host drag library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEvent {
    pub phase: DragPhase,
    pub source: DragSource,
    pub hover_target: Option<DropTarget>,
}

/// Result of ending a drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Inserted { element: ElementInstance, index: usize },
    Moved { id: ElementId, from: usize, to: usize },
    /// Nothing changed: cancelled, dropped over nothing, or dropped onto the
    /// dragged element itself.
    Cancelled,
}

/// Result of feeding a [`DragEvent`] to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragResponse {
    Started,
    Hovering(Option<DropTarget>),
    Dropped(DropOutcome),
}

#[derive(Debug, thiserror::Error)]
pub enum DragError {
    #[error("a drag is already in progress")]
    AlreadyDragging,
    #[error("no drag in progress")]
    NotDragging,
    #[error("dragged element {0} is not in the store")]
    MissingSource(ElementId),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Id of the canvas element being dragged, if any. The host hides it
    /// while the drag is in progress.
    #[must_use]
    pub fn dragged_element(&self) -> Option<&ElementId> {
        match &self.state {
            DragState::Dragging(DragSession { source: DragSource::Existing(id), .. }) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn hover_target(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging(session) => session.hover_target.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Begin a drag of `source`.
    ///
    /// # Errors
    ///
    /// `AlreadyDragging` if a session is active; the active session is kept.
    pub fn start(&mut self, source: DragSource) -> Result<(), DragError> {
        if self.is_dragging() {
            tracing::warn!(?source, "drag start rejected: already dragging");
            return Err(DragError::AlreadyDragging);
        }
        tracing::debug!(?source, "drag start");
        self.state = DragState::Dragging(DragSession { source, hover_target: None });
        Ok(())
    }

    /// Record the zone currently under the pointer.
    ///
    /// # Errors
    ///
    /// `NotDragging` when idle.
    pub fn hover(&mut self, target: Option<DropTarget>) -> Result<(), DragError> {
        match &mut self.state {
            DragState::Dragging(session) => {
                session.hover_target = target;
                Ok(())
            }
            DragState::Idle => Err(DragError::NotDragging),
        }
    }

    /// Hit-test `point` against `layout` and record the result.
    ///
    /// # Errors
    ///
    /// `NotDragging` when idle.
    pub fn hover_at(&mut self, point: Point, layout: &ZoneLayout, store: &ElementStore) -> Result<Option<DropTarget>, DragError> {
        let target = hit_test(point, layout, store, self.dragged_element());
        self.hover(target.clone())?;
        Ok(target)
    }

    /// Abandon the drag. The store is never touched.
    pub fn cancel(&mut self) -> DropOutcome {
        if let DragState::Dragging(session) = mem::take(&mut self.state) {
            tracing::debug!(source = ?session.source, "drag cancelled");
        }
        DropOutcome::Cancelled
    }

    /// End the drag and apply it to `store`.
    ///
    /// The session ends whether or not the drop succeeds.
    ///
    /// # Errors
    ///
    /// `NotDragging` when idle, `MissingSource` if the dragged element left
    /// the store mid-drag, and registry/store failures. The store is
    /// unchanged on every error.
    pub fn drop(
        &mut self,
        store: &mut ElementStore,
        registry: &FieldRegistry,
        ids: &mut dyn IdGenerator,
    ) -> Result<DropOutcome, DragError> {
        let DragState::Dragging(session) = mem::take(&mut self.state) else {
            return Err(DragError::NotDragging);
        };
        let Some(target) = session.hover_target else {
            tracing::debug!(source = ?session.source, "drop without target");
            return Ok(DropOutcome::Cancelled);
        };
        match session.source {
            DragSource::NewField(field_type) => {
                let index = store.resolve_index(&target)?;
                let element = registry.construct(field_type, ids.next_id())?;
                store.insert_at(index, element.clone())?;
                tracing::debug!(%field_type, id = %element.id, index, "drop inserted element");
                Ok(DropOutcome::Inserted { element, index })
            }
            DragSource::Existing(id) => {
                if !store.contains(&id) {
                    return Err(DragError::MissingSource(id));
                }
                if matches!(&target, DropTarget::Element { id: target_id, .. } if *target_id == id) {
                    return Ok(DropOutcome::Cancelled);
                }
                let moved = store.move_to(&id, &target)?;
                tracing::debug!(%id, from = moved.from, to = moved.to, "drop moved element");
                Ok(DropOutcome::Moved { id, from: moved.from, to: moved.to })
            }
        }
    }

    /// Drive the controller from a host [`DragEvent`].
    ///
    /// # Errors
    ///
    /// As the underlying `start`/`hover`/`drop` call.
    pub fn handle(
        &mut self,
        event: DragEvent,
        store: &mut ElementStore,
        registry: &FieldRegistry,
        ids: &mut dyn IdGenerator,
    ) -> Result<DragResponse, DragError> {
        match event.phase {
            DragPhase::Start => {
                self.start(event.source)?;
                self.hover(event.hover_target)?;
                Ok(DragResponse::Started)
            }
            DragPhase::Move => {
                self.hover(event.hover_target.clone())?;
                Ok(DragResponse::Hovering(event.hover_target))
            }
            DragPhase::End => {
                self.hover(event.hover_target)?;
                Ok(DragResponse::Dropped(self.drop(store, registry, ids)?))
            }
            DragPhase::Cancel => Ok(DragResponse::Dropped(self.cancel())),
        }
    }
}
