//! Deferred-commit properties editor.
//!
//! Selecting an element copies its attributes into a draft. Edits only touch
//! the draft; `commit` (fired on blur) runs the type's schema check over the
//! whole draft and writes it to the store only when it passes. A rejected
//! commit keeps the draft and exposes the field-level errors so the panel can
//! show them next to the offending inputs.

#[cfg(test)]
#[path = "properties_test.rs"]
mod properties_test;

use crate::element::ElementId;
use crate::field::{Attributes, FieldErrors, PropertyError, PropertyValue};
use crate::registry::{FieldRegistry, RegistryError};
use crate::store::{ElementStore, StoreError};
use crate::view::PropertyInput;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    id: ElementId,
    /// Attributes the draft was seeded from, used to spot external changes.
    seeded: Attributes,
    draft: Attributes,
    errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The draft was written to the store.
    Applied,
    /// The draft matches the stored attributes; nothing to write.
    Unchanged,
    /// The draft failed the schema; the store was not touched.
    Rejected(FieldErrors),
    /// The stored attributes changed since the draft was seeded; the draft
    /// was re-seeded from the store and nothing was written.
    Reseeded,
    NothingSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Unchanged,
    /// The stored attributes changed; the draft was re-seeded.
    Reseeded,
    /// The selected element is gone.
    Deselected,
}

#[derive(Debug, thiserror::Error)]
pub enum BinderError {
    #[error("no element selected")]
    NothingSelected,
    #[error("element {0} not found")]
    NotFound(ElementId),
    #[error(transparent)]
    Property(#[from] PropertyError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default)]
pub struct PropertiesBinder {
    selection: Option<Selection>,
}

impl PropertiesBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ElementId> {
        self.selection.as_ref().map(|s| &s.id)
    }

    #[must_use]
    pub fn draft(&self) -> Option<&Attributes> {
        self.selection.as_ref().map(|s| &s.draft)
    }

    /// Errors from the last rejected commit. Empty when nothing is selected.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.selection.as_ref().map(|s| s.errors.clone()).unwrap_or_default()
    }

    /// Whether the draft differs from what is stored.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.selection.as_ref().is_some_and(|s| s.draft != s.seeded)
    }

    /// Select `id` and seed the draft from the store, discarding any
    /// uncommitted edits to the previous selection.
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` is not in the store; the previous selection is
    /// kept in that case.
    pub fn select(&mut self, store: &ElementStore, id: &ElementId) -> Result<(), BinderError> {
        let element = store.get(id).ok_or_else(|| BinderError::NotFound(id.clone()))?;
        self.selection = Some(Selection {
            id: id.clone(),
            seeded: element.attributes.clone(),
            draft: element.attributes.clone(),
            errors: FieldErrors::new(),
        });
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    /// Edit one draft attribute. The store is not touched.
    ///
    /// # Errors
    ///
    /// `NothingSelected`, or `Property` for an unknown key or wrong value
    /// kind.
    pub fn set(&mut self, key: &str, value: PropertyValue) -> Result<(), BinderError> {
        let selection = self.selection.as_mut().ok_or(BinderError::NothingSelected)?;
        selection.draft.set(key, value)?;
        Ok(())
    }

    /// Validate the draft and write it to the store if it passes.
    ///
    /// # Errors
    ///
    /// Structural failures only: unknown type, or `NotFound` when the element
    /// vanished from the store (the selection is cleared). Schema failures
    /// are reported as `Rejected`.
    pub fn commit(&mut self, store: &mut ElementStore, registry: &FieldRegistry) -> Result<CommitOutcome, BinderError> {
        let Some(id) = self.selected().cloned() else {
            return Ok(CommitOutcome::NothingSelected);
        };
        match self.sync(store) {
            SyncOutcome::Deselected => return Err(BinderError::NotFound(id)),
            SyncOutcome::Reseeded => {
                tracing::warn!(%id, "stale properties draft discarded");
                return Ok(CommitOutcome::Reseeded);
            }
            SyncOutcome::Unchanged => {}
        }
        let Some(selection) = self.selection.as_mut() else {
            return Ok(CommitOutcome::NothingSelected);
        };
        let descriptor = registry.lookup(selection.draft.field_type())?;
        if let Err(errors) = (descriptor.check)(&selection.draft) {
            tracing::warn!(id = %selection.id, count = errors.len(), "properties rejected");
            selection.errors = errors.clone();
            return Ok(CommitOutcome::Rejected(errors));
        }
        selection.errors = FieldErrors::new();
        if selection.draft == selection.seeded {
            return Ok(CommitOutcome::Unchanged);
        }
        store.update_attributes(&selection.id, selection.draft.clone())?;
        selection.seeded = selection.draft.clone();
        Ok(CommitOutcome::Applied)
    }

    /// Reconcile with the store after an outside change. Uncommitted edits are
    /// discarded when the stored attributes moved on.
    pub fn sync(&mut self, store: &ElementStore) -> SyncOutcome {
        let Some(selection) = self.selection.as_mut() else {
            return SyncOutcome::Unchanged;
        };
        match store.get(&selection.id) {
            None => {
                self.selection = None;
                SyncOutcome::Deselected
            }
            Some(element) if element.attributes != selection.seeded => {
                selection.seeded = element.attributes.clone();
                selection.draft = element.attributes.clone();
                selection.errors = FieldErrors::new();
                SyncOutcome::Reseeded
            }
            Some(_) => SyncOutcome::Unchanged,
        }
    }

    /// Panel inputs for the current draft.
    ///
    /// # Errors
    ///
    /// `Registry` when the draft's type is not registered.
    pub fn inputs(&self, registry: &FieldRegistry) -> Result<Vec<PropertyInput>, BinderError> {
        let Some(selection) = &self.selection else {
            return Ok(Vec::new());
        };
        let descriptor = registry.lookup(selection.draft.field_type())?;
        Ok((descriptor.properties_view)(&selection.draft, &selection.errors))
    }
}
