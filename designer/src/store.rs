//! Ordered element store.
//!
//! The store owns the form's elements in display order and enforces the two
//! structural invariants everything else relies on: ids are unique, and every
//! mutation leaves a dense, gap-free sequence. Drop targets produced by
//! [`crate::hit`] are resolved to indices here, after any removal, so the
//! position reported back to the host is always an index into the final
//! list.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use crate::element::{DecodeError, ElementId, ElementInstance};
use crate::field::{Attributes, FieldType};
use crate::hit::{DropTarget, Half};
use crate::registry::FieldRegistry;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("element {0} already exists")]
    DuplicateId(ElementId),
    #[error("index {index} out of bounds for {len} elements")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("element {0} not found")]
    NotFound(ElementId),
    #[error("element {id} is a {expected}, got {actual} attributes")]
    TypeMismatch { id: ElementId, expected: FieldType, actual: FieldType },
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Where a moved element came from and where it ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStore {
    elements: Vec<ElementInstance>,
}

impl ElementStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with `elements` in the given order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateId` if two elements share an id.
    pub fn from_elements(elements: Vec<ElementInstance>) -> Result<Self, StoreError> {
        for (i, element) in elements.iter().enumerate() {
            if elements[..i].iter().any(|e| e.id == element.id) {
                return Err(StoreError::DuplicateId(element.id.clone()));
            }
        }
        Ok(Self { elements })
    }

    /// Load a serialized element list, checking every tag against `registry`.
    ///
    /// # Errors
    ///
    /// `Decode` for malformed JSON or unknown tags, `DuplicateId` for
    /// repeated ids.
    pub fn from_json(registry: &FieldRegistry, json: &str) -> Result<Self, StoreError> {
        Self::from_elements(registry.decode_list(json)?)
    }

    /// Serialize the ordered list for persistence.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.elements)
    }

    // --- Queries ---

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&ElementInstance> {
        self.elements.iter().find(|e| &e.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    #[must_use]
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementInstance> {
        self.elements.iter()
    }

    /// Elements in display order.
    #[must_use]
    pub fn to_ordered_list(&self) -> &[ElementInstance] {
        &self.elements
    }

    #[must_use]
    pub fn into_elements(self) -> Vec<ElementInstance> {
        self.elements
    }

    // --- Mutations ---

    /// Insert `element` so that it ends up at `index`.
    ///
    /// # Errors
    ///
    /// `DuplicateId` if the id is taken, `IndexOutOfBounds` if `index > len`.
    pub fn insert_at(&mut self, index: usize, element: ElementInstance) -> Result<(), StoreError> {
        if self.contains(&element.id) {
            return Err(StoreError::DuplicateId(element.id));
        }
        if index > self.elements.len() {
            return Err(StoreError::IndexOutOfBounds { index, len: self.elements.len() });
        }
        tracing::debug!(id = %element.id, index, "insert element");
        self.elements.insert(index, element);
        Ok(())
    }

    /// Remove the element with `id`. Removing an absent id is a no-op.
    pub fn remove_by_id(&mut self, id: &ElementId) -> Option<ElementInstance> {
        let index = self.index_of(id)?;
        tracing::debug!(%id, index, "remove element");
        Some(self.elements.remove(index))
    }

    /// Index at which an element dropped on `target` is inserted, given the
    /// current contents.
    ///
    /// # Errors
    ///
    /// `NotFound` when the target element is not in the store.
    pub fn resolve_index(&self, target: &DropTarget) -> Result<usize, StoreError> {
        match target {
            DropTarget::Canvas => Ok(self.elements.len()),
            DropTarget::Element { id, half } => {
                let index = self.index_of(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
                Ok(match half {
                    Half::Top => index,
                    Half::Bottom => index + 1,
                })
            }
        }
    }

    /// Move `source` directly above or below `target`.
    ///
    /// # Errors
    ///
    /// As [`ElementStore::move_to`].
    pub fn move_relative(&mut self, source: &ElementId, target: &ElementId, half: Half) -> Result<MoveResult, StoreError> {
        self.move_to(source, &DropTarget::Element { id: target.clone(), half })
    }

    /// Move `source` to the slot described by `target`.
    ///
    /// The source is removed first and the target resolved against the
    /// remaining list, so `to` is the element's index in the final order.
    ///
    /// # Errors
    ///
    /// `NotFound` when either element is missing. The store is unchanged on
    /// error.
    pub fn move_to(&mut self, source: &ElementId, target: &DropTarget) -> Result<MoveResult, StoreError> {
        let from = self.index_of(source).ok_or_else(|| StoreError::NotFound(source.clone()))?;
        let element = self.elements.remove(from);
        let to = match self.resolve_index(target) {
            Ok(to) => to,
            Err(e) => {
                self.elements.insert(from, element);
                return Err(e);
            }
        };
        tracing::debug!(id = %source, from, to, "move element");
        self.elements.insert(to, element);
        Ok(MoveResult { from, to })
    }

    /// Replace the attributes of `id`, keeping its position.
    ///
    /// # Errors
    ///
    /// `NotFound` for a missing id, `TypeMismatch` when `attributes` belongs
    /// to a different field type than the element.
    pub fn update_attributes(&mut self, id: &ElementId, attributes: Attributes) -> Result<(), StoreError> {
        let element = self
            .elements
            .iter_mut()
            .find(|e| &e.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        if element.field_type() != attributes.field_type() {
            return Err(StoreError::TypeMismatch {
                id: id.clone(),
                expected: element.field_type(),
                actual: attributes.field_type(),
            });
        }
        tracing::debug!(%id, "update element attributes");
        element.attributes = attributes;
        Ok(())
    }
}
