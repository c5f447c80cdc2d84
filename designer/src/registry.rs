//! Field type registry: maps each type tag to the descriptor that knows how to
//! construct, validate, and present elements of that type.
//!
//! The registry is the single place the rest of the crate goes to for
//! per-type behavior. Lookups are total over [`FieldType`]; tags read off the
//! wire are parsed first, so an unknown tag surfaces as
//! [`RegistryError::UnknownType`] instead of a panic.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use crate::element::{DecodeError, ElementId, ElementInstance, RawElement};
use crate::field::{Attributes, FieldErrors, FieldType};
use crate::fields;
use crate::view::{FieldView, FillState, PaletteEntry, PropertyInput};

pub type ConstructFn = fn(ElementId) -> ElementInstance;
pub type ValidateFn = fn(&ElementInstance, &str) -> bool;
pub type CheckFn = fn(&Attributes) -> Result<(), FieldErrors>;
pub type DesignerViewFn = fn(&ElementInstance) -> FieldView;
pub type FillViewFn = fn(&ElementInstance, FillState<'_>) -> FieldView;
pub type PropertiesViewFn = fn(&Attributes, &FieldErrors) -> Vec<PropertyInput>;

/// Everything the designer needs to know about one field type.
#[derive(Clone, Copy)]
pub struct FieldTypeDescriptor {
    pub field_type: FieldType,
    /// Sidebar button for the type.
    pub palette: PaletteEntry,
    /// Build a new element with default attributes.
    pub construct: ConstructFn,
    /// Fill-time check of one submitted value.
    pub validate: ValidateFn,
    /// Attribute schema check used by the properties editor.
    pub check: CheckFn,
    pub designer_view: DesignerViewFn,
    pub fill_view: FillViewFn,
    pub properties_view: PropertiesViewFn,
}

impl std::fmt::Debug for FieldTypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldTypeDescriptor")
            .field("field_type", &self.field_type)
            .field("palette", &self.palette)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown field type: {0}")]
    UnknownType(String),
}

/// Lookup table from type tag to descriptor, remembering registration order
/// for the palette.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    descriptors: HashMap<FieldType, FieldTypeDescriptor>,
    order: Vec<FieldType>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FieldRegistry {
    /// Registry holding the given descriptors. A later descriptor for the same
    /// tag replaces the earlier one but keeps its palette position.
    pub fn with(descriptors: impl IntoIterator<Item = FieldTypeDescriptor>) -> Self {
        let mut registry = Self { descriptors: HashMap::new(), order: Vec::new() };
        for descriptor in descriptors {
            if registry.descriptors.insert(descriptor.field_type, descriptor).is_none() {
                registry.order.push(descriptor.field_type);
            }
        }
        registry
    }

    /// Registry with every built-in field type.
    #[must_use]
    pub fn builtin() -> Self {
        Self::with(fields::builtin())
    }

    /// Descriptor for `field_type`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` when the registry was built without that type.
    pub fn lookup(&self, field_type: FieldType) -> Result<&FieldTypeDescriptor, RegistryError> {
        self.descriptors
            .get(&field_type)
            .ok_or_else(|| RegistryError::UnknownType(field_type.as_str().to_owned()))
    }

    /// Descriptor for a wire tag such as `"TextField"`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` when the tag is not registered.
    pub fn lookup_tag(&self, tag: &str) -> Result<&FieldTypeDescriptor, RegistryError> {
        self.lookup(tag.parse()?)
    }

    #[must_use]
    pub fn contains(&self, field_type: FieldType) -> bool {
        self.descriptors.contains_key(&field_type)
    }

    /// Palette entries in registration order.
    #[must_use]
    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.order
            .iter()
            .filter_map(|t| self.descriptors.get(t))
            .map(|d| d.palette)
            .collect()
    }

    /// Build a fresh element of `field_type` with default attributes.
    ///
    /// # Errors
    ///
    /// Returns `UnknownType` when the type is not registered.
    pub fn construct(&self, field_type: FieldType, id: ElementId) -> Result<ElementInstance, RegistryError> {
        let descriptor = self.lookup(field_type)?;
        Ok((descriptor.construct)(id))
    }

    /// Turn one raw wire element into an instance, checking its tag against
    /// this registry.
    ///
    /// # Errors
    ///
    /// `UnknownType` for an unregistered tag, `Attributes` when the attribute
    /// object does not fit the type's record.
    pub fn decode(&self, raw: RawElement) -> Result<ElementInstance, DecodeError> {
        self.lookup_tag(&raw.tag)?;
        ElementInstance::try_from(raw)
    }

    /// Decode a serialized element list (the form's `content` column).
    ///
    /// # Errors
    ///
    /// `Json` when the text is not a JSON array of elements, otherwise as
    /// [`FieldRegistry::decode`].
    pub fn decode_list(&self, json: &str) -> Result<Vec<ElementInstance>, DecodeError> {
        let raw: Vec<RawElement> = serde_json::from_str(json)?;
        raw.into_iter().map(|r| self.decode(r)).collect()
    }
}
