//! Field types and their attribute records.
//!
//! `FieldType` is the closed set of type tags a form element can carry. Each
//! tag owns exactly one strongly-typed attribute record; `Attributes` is the
//! tagged union over those records, so code that needs a type's settings
//! matches on the variant instead of probing an untyped bag.
//!
//! Attribute keys use the wire spelling (`helperText`, `placeHolder`) both in
//! JSON and in the string-keyed editing API used by the properties editor.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fields::paragraph::ParagraphAttributes;
use crate::fields::text::TextFieldAttributes;
use crate::fields::text_area::TextAreaAttributes;
use crate::registry::RegistryError;

/// Type tag of a form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldType {
    /// Single-line text input.
    TextField,
    /// Multi-line text input.
    TextAreaField,
    /// Static paragraph of text; collects no value.
    ParagraphField,
}

impl FieldType {
    /// Every tag, in palette order.
    pub const ALL: [FieldType; 3] = [FieldType::TextField, FieldType::TextAreaField, FieldType::ParagraphField];

    /// The tag as written on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextField => "TextField",
            Self::TextAreaField => "TextAreaField",
            Self::ParagraphField => "ParagraphField",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| RegistryError::UnknownType(s.to_owned()))
    }
}

/// A single editable attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Text(String),
    Bool(bool),
    Number(i64),
}

impl PropertyValue {
    /// Human-readable kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// Rejected attribute edit. Raised when the edit itself is malformed, not
/// when the resulting record fails the schema (see [`FieldErrors`]).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropertyError {
    #[error("{field_type} has no property `{key}`")]
    UnknownProperty { field_type: FieldType, key: String },
    #[error("property `{key}` expects a {expected} value, got {actual}")]
    WrongKind { key: String, expected: &'static str, actual: &'static str },
}

/// Field-level schema errors keyed by attribute name.
///
/// Always data, never an `Err` that aborts anything: the properties editor
/// shows these next to the offending inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, message: impl Into<String>) {
        self.0.insert(key.to_owned(), message.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Record a length violation for `value`, counting characters.
    pub(crate) fn check_len(&mut self, key: &str, value: &str, min: usize, max: usize) {
        let len = value.chars().count();
        if len < min {
            self.insert(key, format!("must contain at least {min} character(s)"));
        } else if len > max {
            self.insert(key, format!("must contain at most {max} character(s)"));
        }
    }

    /// Record a range violation for `value`.
    pub(crate) fn check_range(&mut self, key: &str, value: i64, min: i64, max: i64) {
        if !(min..=max).contains(&value) {
            self.insert(key, format!("must be between {min} and {max}"));
        }
    }
}

/// Type-specific attribute record of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attributes {
    TextField(TextFieldAttributes),
    TextAreaField(TextAreaAttributes),
    ParagraphField(ParagraphAttributes),
}

impl Attributes {
    /// Default attributes for a freshly constructed element of `field_type`.
    #[must_use]
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::TextField => Self::TextField(TextFieldAttributes::default()),
            FieldType::TextAreaField => Self::TextAreaField(TextAreaAttributes::default()),
            FieldType::ParagraphField => Self::ParagraphField(ParagraphAttributes::default()),
        }
    }

    /// The tag this record belongs to.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::TextField(_) => FieldType::TextField,
            Self::TextAreaField(_) => FieldType::TextAreaField,
            Self::ParagraphField(_) => FieldType::ParagraphField,
        }
    }

    /// Decode the record for `field_type` from its JSON object.
    ///
    /// # Errors
    ///
    /// Returns the serde error when `value` does not fit the record.
    pub fn from_value(field_type: FieldType, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match field_type {
            FieldType::TextField => Self::TextField(serde_json::from_value(value)?),
            FieldType::TextAreaField => Self::TextAreaField(serde_json::from_value(value)?),
            FieldType::ParagraphField => Self::ParagraphField(serde_json::from_value(value)?),
        })
    }

    /// Read one attribute by its wire name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<PropertyValue> {
        match self {
            Self::TextField(a) => a.get(key),
            Self::TextAreaField(a) => a.get(key),
            Self::ParagraphField(a) => a.get(key),
        }
    }

    /// Overwrite one attribute by its wire name. No schema check happens here.
    ///
    /// # Errors
    ///
    /// Returns `UnknownProperty` for a key the type does not have and
    /// `WrongKind` when the value kind does not match the attribute.
    pub fn set(&mut self, key: &str, value: PropertyValue) -> Result<(), PropertyError> {
        match self {
            Self::TextField(a) => a.set(key, value),
            Self::TextAreaField(a) => a.set(key, value),
            Self::ParagraphField(a) => a.set(key, value),
        }
    }

    /// Whether the field must be filled in at submission time.
    #[must_use]
    pub fn required(&self) -> bool {
        match self {
            Self::TextField(a) => a.required,
            Self::TextAreaField(a) => a.base.required,
            Self::ParagraphField(_) => false,
        }
    }
}

impl Serialize for Attributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::TextField(a) => a.serialize(serializer),
            Self::TextAreaField(a) => a.serialize(serializer),
            Self::ParagraphField(a) => a.serialize(serializer),
        }
    }
}

// Shared helpers for the per-type `set` implementations.

pub(crate) fn expect_text(key: &str, value: PropertyValue) -> Result<String, PropertyError> {
    match value {
        PropertyValue::Text(s) => Ok(s),
        other => Err(PropertyError::WrongKind { key: key.to_owned(), expected: "text", actual: other.kind() }),
    }
}

pub(crate) fn expect_bool(key: &str, value: PropertyValue) -> Result<bool, PropertyError> {
    match value {
        PropertyValue::Bool(b) => Ok(b),
        other => Err(PropertyError::WrongKind { key: key.to_owned(), expected: "bool", actual: other.kind() }),
    }
}

pub(crate) fn expect_number(key: &str, value: PropertyValue) -> Result<i64, PropertyError> {
    match value {
        PropertyValue::Number(n) => Ok(n),
        other => Err(PropertyError::WrongKind { key: key.to_owned(), expected: "number", actual: other.kind() }),
    }
}
