//! Edit and fill sessions: the host-facing entry points.
//!
//! DESIGN
//! ======
//! An [`EditSession`] owns the one [`ElementStore`] being edited and hands it
//! by `&mut` to the drag controller and the properties binder, the only two
//! mutators. Every mutating call returns the [`Action`]s the host must apply
//! to its view; the host never reads the store to discover what changed.
//!
//! A [`FillSession`] is the visitor side: the published element list plus a
//! [`SubmissionRecord`]. It only reads the registry.
//!
//! ERROR HANDLING
//! ==============
//! Structural failures (unknown ids, drags in the wrong state) are returned as
//! `Err`. Schema failures are data (`PropertiesRejected`, `SubmitOutcome::Invalid`).
//! Backend failures are reported to the [`Notifier`] and returned; in-memory
//! state is left exactly as it was before the call.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::BTreeSet;

use crate::backend::{BackendError, FormBackend, FormId, Notification, Notifier};
use crate::drag::{DragController, DragError, DragEvent, DragPhase, DragResponse, DragSource, DropOutcome};
use crate::element::{ElementId, ElementInstance, IdGenerator, UuidIds};
use crate::field::{FieldErrors, PropertyValue};
use crate::hit::{DropTarget, Point, ZoneLayout};
use crate::properties::{BinderError, CommitOutcome, PropertiesBinder, SyncOutcome};
use crate::registry::{FieldRegistry, RegistryError};
use crate::store::{ElementStore, StoreError};
use crate::submission::{SubmissionRecord, ValueMap};
use crate::view::{FieldView, FillState, PaletteEntry, PropertyInput};

/// Change the host must reflect in its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ElementAdded { element: ElementInstance, index: usize },
    ElementMoved { id: ElementId, from: usize, to: usize },
    ElementUpdated { id: ElementId },
    ElementRemoved { id: ElementId, index: usize },
    SelectionChanged(Option<ElementId>),
    PropertiesRejected(FieldErrors),
    RenderNeeded,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Drag(#[from] DragError),
    #[error(transparent)]
    Properties(#[from] BinderError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("element {0} is not part of this form")]
    UnknownElement(ElementId),
    #[error("form already submitted")]
    AlreadySubmitted,
}

// =============================================================================
// EDIT SESSION
// =============================================================================

pub struct EditSession<'r> {
    form_id: FormId,
    registry: &'r FieldRegistry,
    store: ElementStore,
    drag: DragController,
    properties: PropertiesBinder,
    ids: Box<dyn IdGenerator>,
    dirty: bool,
}

impl<'r> EditSession<'r> {
    /// Session over an empty form.
    #[must_use]
    pub fn new(form_id: FormId, registry: &'r FieldRegistry) -> Self {
        Self {
            form_id,
            registry,
            store: ElementStore::new(),
            drag: DragController::new(),
            properties: PropertiesBinder::new(),
            ids: Box::new(UuidIds),
            dirty: false,
        }
    }

    /// Session seeded with a previously saved element list.
    ///
    /// # Errors
    ///
    /// `DuplicateId` when the saved list repeats an id.
    pub fn load(form_id: FormId, registry: &'r FieldRegistry, elements: Vec<ElementInstance>) -> Result<Self, SessionError> {
        let mut session = Self::new(form_id, registry);
        session.store = ElementStore::from_elements(elements)?;
        Ok(session)
    }

    /// Replace the id source for new elements.
    #[must_use]
    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    // --- Queries ---

    #[must_use]
    pub fn form_id(&self) -> FormId {
        self.form_id
    }

    #[must_use]
    pub fn elements(&self) -> &[ElementInstance] {
        self.store.to_ordered_list()
    }

    #[must_use]
    pub fn store(&self) -> &ElementStore {
        &self.store
    }

    /// Whether the store changed since the last successful save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.properties.selected()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    #[must_use]
    pub fn hover_target(&self) -> Option<&DropTarget> {
        self.drag.hover_target()
    }

    #[must_use]
    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.registry.palette()
    }

    /// Canvas views in order. The element being dragged is left out.
    ///
    /// # Errors
    ///
    /// `Registry` for an element whose type is not registered.
    pub fn designer_views(&self) -> Result<Vec<(ElementId, FieldView)>, SessionError> {
        let dragged = self.drag.dragged_element();
        self.store
            .iter()
            .filter(|e| Some(&e.id) != dragged)
            .map(|e| {
                let descriptor = self.registry.lookup(e.field_type())?;
                Ok((e.id.clone(), (descriptor.designer_view)(e)))
            })
            .collect()
    }

    /// Properties panel inputs for the selection, empty when nothing is
    /// selected.
    ///
    /// # Errors
    ///
    /// `Properties` when the draft's type is not registered.
    pub fn property_inputs(&self) -> Result<Vec<PropertyInput>, SessionError> {
        Ok(self.properties.inputs(self.registry)?)
    }

    // --- Drag ---

    /// # Errors
    ///
    /// `AlreadyDragging`, or `UnknownElement` when dragging an id that is not
    /// on the canvas.
    pub fn drag_start(&mut self, source: DragSource) -> Result<Vec<Action>, SessionError> {
        self.ensure_on_canvas(&source)?;
        self.drag.start(source)?;
        Ok(vec![Action::RenderNeeded])
    }

    /// Hit-test the pointer and record the zone under it.
    ///
    /// # Errors
    ///
    /// `NotDragging` when no drag is active.
    pub fn drag_hover(&mut self, point: Point, layout: &ZoneLayout) -> Result<Option<DropTarget>, SessionError> {
        Ok(self.drag.hover_at(point, layout, &self.store)?)
    }

    /// Drop at the current hover target.
    ///
    /// # Errors
    ///
    /// As [`DragController::drop`]. The store is unchanged on error.
    pub fn drag_drop(&mut self) -> Result<Vec<Action>, SessionError> {
        let outcome = self.drag.drop(&mut self.store, self.registry, self.ids.as_mut())?;
        Ok(self.apply_drop(outcome))
    }

    pub fn drag_cancel(&mut self) -> Vec<Action> {
        self.drag.cancel();
        vec![Action::RenderNeeded]
    }

    /// Feed a host drag-library event.
    ///
    /// # Errors
    ///
    /// As the corresponding `drag_*` call.
    pub fn drag_event(&mut self, event: DragEvent) -> Result<Vec<Action>, SessionError> {
        if event.phase == DragPhase::Start {
            self.ensure_on_canvas(&event.source)?;
        }
        match self.drag.handle(event, &mut self.store, self.registry, self.ids.as_mut())? {
            DragResponse::Started => Ok(vec![Action::RenderNeeded]),
            DragResponse::Hovering(_) => Ok(Vec::new()),
            DragResponse::Dropped(outcome) => Ok(self.apply_drop(outcome)),
        }
    }

    fn ensure_on_canvas(&self, source: &DragSource) -> Result<(), SessionError> {
        match source {
            DragSource::Existing(id) if !self.store.contains(id) => Err(SessionError::UnknownElement(id.clone())),
            _ => Ok(()),
        }
    }

    fn apply_drop(&mut self, outcome: DropOutcome) -> Vec<Action> {
        let mut actions = match outcome {
            DropOutcome::Inserted { element, index } => {
                self.dirty = true;
                vec![Action::ElementAdded { element, index }]
            }
            DropOutcome::Moved { id, from, to } => {
                self.dirty |= from != to;
                vec![Action::ElementMoved { id, from, to }]
            }
            DropOutcome::Cancelled => Vec::new(),
        };
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Properties ---

    /// # Errors
    ///
    /// `Properties(NotFound)` when `id` is not on the canvas.
    pub fn select(&mut self, id: &ElementId) -> Result<Vec<Action>, SessionError> {
        if self.properties.selected() == Some(id) {
            return Ok(Vec::new());
        }
        self.properties.select(&self.store, id)?;
        Ok(vec![Action::SelectionChanged(Some(id.clone()))])
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        if self.properties.selected().is_none() {
            return Vec::new();
        }
        self.properties.deselect();
        vec![Action::SelectionChanged(None)]
    }

    /// Edit one draft attribute of the selection.
    ///
    /// # Errors
    ///
    /// `Properties` for no selection, unknown keys, or wrong value kinds.
    pub fn set_property(&mut self, key: &str, value: impl Into<PropertyValue>) -> Result<(), SessionError> {
        Ok(self.properties.set(key, value.into())?)
    }

    /// Commit the draft (the properties panel lost focus).
    ///
    /// # Errors
    ///
    /// Structural binder failures only.
    pub fn blur_properties(&mut self) -> Result<Vec<Action>, SessionError> {
        match self.properties.commit(&mut self.store, self.registry)? {
            CommitOutcome::Applied => {
                self.dirty = true;
                let id = self.properties.selected().cloned();
                Ok(id.map(|id| vec![Action::ElementUpdated { id }, Action::RenderNeeded]).unwrap_or_default())
            }
            CommitOutcome::Rejected(errors) => Ok(vec![Action::PropertiesRejected(errors)]),
            CommitOutcome::Reseeded => Ok(vec![Action::RenderNeeded]),
            CommitOutcome::Unchanged | CommitOutcome::NothingSelected => Ok(Vec::new()),
        }
    }

    /// Delete an element from the canvas. Removing an absent id does nothing.
    pub fn remove_element(&mut self, id: &ElementId) -> Vec<Action> {
        let Some(index) = self.store.index_of(id) else {
            return Vec::new();
        };
        self.store.remove_by_id(id);
        self.dirty = true;
        let mut actions = vec![Action::ElementRemoved { id: id.clone(), index }];
        if self.properties.sync(&self.store) == SyncOutcome::Deselected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Persistence ---

    /// Persist the current element list.
    ///
    /// # Errors
    ///
    /// The backend error, after notifying. The dirty flag stays set.
    pub async fn save(&mut self, backend: &dyn FormBackend, notifier: &dyn Notifier) -> Result<(), SessionError> {
        match backend.save_form_content(self.form_id, self.store.to_ordered_list()).await {
            Ok(()) => {
                self.dirty = false;
                tracing::info!(form_id = self.form_id, count = self.store.len(), "form saved");
                notifier.notify(Notification::success("Success!", "Your form has been saved"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(form_id = self.form_id, error = %e, "form save failed");
                notifier.notify(Notification::error("Error", "Something went wrong, please try again later"));
                Err(e.into())
            }
        }
    }

    /// Save, then publish. Nothing is published if the save fails.
    ///
    /// # Errors
    ///
    /// The first backend error, after notifying.
    pub async fn publish(&mut self, backend: &dyn FormBackend, notifier: &dyn Notifier) -> Result<(), SessionError> {
        match backend.save_form_content(self.form_id, self.store.to_ordered_list()).await {
            Ok(()) => self.dirty = false,
            Err(e) => {
                tracing::warn!(form_id = self.form_id, error = %e, "save before publish failed");
                notifier.notify(Notification::error("Error", "Something went wrong, please try again later"));
                return Err(e.into());
            }
        }
        match backend.publish_form(self.form_id).await {
            Ok(()) => {
                tracing::info!(form_id = self.form_id, "form published");
                notifier.notify(Notification::success("Success!", "Your form is now available to the public"));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(form_id = self.form_id, error = %e, "form publish failed");
                notifier.notify(Notification::error("Error", "Something went wrong, please try again later"));
                Err(e.into())
            }
        }
    }
}

// =============================================================================
// FILL SESSION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted,
    /// Validation failed; nothing was sent.
    Invalid(BTreeSet<ElementId>),
}

pub struct FillSession<'r> {
    registry: &'r FieldRegistry,
    share_token: String,
    elements: Vec<ElementInstance>,
    record: SubmissionRecord,
    submitted: bool,
}

impl<'r> FillSession<'r> {
    #[must_use]
    pub fn new(registry: &'r FieldRegistry, share_token: impl Into<String>, elements: Vec<ElementInstance>) -> Self {
        Self {
            registry,
            share_token: share_token.into(),
            elements,
            record: SubmissionRecord::new(),
            submitted: false,
        }
    }

    /// Record a visit to the shared form and open a session over its
    /// elements.
    ///
    /// # Errors
    ///
    /// The backend error: `NotFound` for an unknown link, `NotPublished` for
    /// a draft.
    pub async fn visit(registry: &'r FieldRegistry, backend: &dyn FormBackend, share_token: &str) -> Result<Self, SessionError> {
        let elements = backend.record_visit(share_token).await?;
        Ok(Self::new(registry, share_token, elements))
    }

    #[must_use]
    pub fn elements(&self) -> &[ElementInstance] {
        &self.elements
    }

    #[must_use]
    pub fn value(&self, id: &ElementId) -> &str {
        self.record.value(id)
    }

    #[must_use]
    pub fn values(&self) -> &ValueMap {
        self.record.values()
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeSet<ElementId> {
        self.record.errors()
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Store the value of `id` and re-check that field. Returns whether it is
    /// valid.
    ///
    /// # Errors
    ///
    /// `UnknownElement` for an id not on this form.
    pub fn blur(&mut self, id: &ElementId, value: impl Into<String>) -> Result<bool, SessionError> {
        let element = self
            .elements
            .iter()
            .find(|e| &e.id == id)
            .ok_or_else(|| SessionError::UnknownElement(id.clone()))?;
        Ok(self.record.blur(self.registry, element, value)?)
    }

    /// Live-form views in order.
    ///
    /// # Errors
    ///
    /// `Registry` for an element whose type is not registered.
    pub fn fill_views(&self) -> Result<Vec<(ElementId, FieldView)>, SessionError> {
        self.elements
            .iter()
            .map(|e| {
                let descriptor = self.registry.lookup(e.field_type())?;
                let state = FillState { value: self.record.value(&e.id), invalid: self.record.is_invalid(&e.id) };
                Ok((e.id.clone(), (descriptor.fill_view)(e, state)))
            })
            .collect()
    }

    /// Validate everything and, if it passes, send the values.
    ///
    /// # Errors
    ///
    /// `AlreadySubmitted` after a successful submit, or the backend error
    /// (values are kept so the visitor can retry).
    pub async fn submit(&mut self, backend: &dyn FormBackend, notifier: &dyn Notifier) -> Result<SubmitOutcome, SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        let report = self.record.validate(self.registry, &self.elements)?;
        if !report.allowed {
            notifier.notify(Notification::error("Error", "Please check the form for errors"));
            return Ok(SubmitOutcome::Invalid(report.errors));
        }
        match backend.record_submission(&self.share_token, self.record.values()).await {
            Ok(()) => {
                self.submitted = true;
                tracing::info!(share_token = %self.share_token, "form submitted");
                Ok(SubmitOutcome::Submitted)
            }
            Err(e) => {
                tracing::warn!(share_token = %self.share_token, error = %e, "submission failed");
                notifier.notify(Notification::error("Error", "Something went wrong"));
                Err(e.into())
            }
        }
    }
}
