//! Element instances, their ids, and the `{id, type, attributes}` wire shape.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::{Attributes, FieldType};
use crate::registry::RegistryError;

/// Stable unique identifier of an element within one form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One configured field placed on the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct ElementInstance {
    pub id: ElementId,
    pub attributes: Attributes,
}

impl ElementInstance {
    #[must_use]
    pub fn new(id: ElementId, attributes: Attributes) -> Self {
        Self { id, attributes }
    }

    /// The element's type tag, derived from its attribute record.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.attributes.field_type()
    }
}

impl Serialize for ElementInstance {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ElementInstance", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("type", self.field_type().as_str())?;
        s.serialize_field("attributes", &self.attributes)?;
        s.end()
    }
}

/// Element as read off the wire, before its tag has been checked.
#[derive(Debug, Clone, Deserialize)]
pub struct RawElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub tag: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
}

/// Failure to turn serialized elements back into instances.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error(transparent)]
    UnknownType(#[from] RegistryError),
    #[error("invalid attributes for element {id}: {source}")]
    Attributes {
        id: ElementId,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed element list: {0}")]
    Json(#[from] serde_json::Error),
}

impl TryFrom<RawElement> for ElementInstance {
    type Error = DecodeError;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let field_type: FieldType = raw.tag.parse()?;
        let attributes = if raw.attributes.is_null() {
            Attributes::default_for(field_type)
        } else {
            Attributes::from_value(field_type, raw.attributes)
                .map_err(|source| DecodeError::Attributes { id: raw.id.clone(), source })?
        };
        Ok(Self { id: raw.id, attributes })
    }
}

// =============================================================================
// ID GENERATION
// =============================================================================

/// Source of fresh element ids. Must never repeat an id within a session.
pub trait IdGenerator {
    fn next_id(&mut self) -> ElementId;
}

/// Random v4 UUID ids. The default for interactive sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> ElementId {
        ElementId(Uuid::new_v4().to_string())
    }
}

/// Deterministic `{prefix}-{n}` ids, counting from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 1 }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> ElementId {
        let id = ElementId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
