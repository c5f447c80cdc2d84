//! Fill-time validation.
//!
//! [`validate_submission`] is the whole-form check run on submit: every
//! element's rule is applied to its value (missing values count as empty) and
//! the ids that fail are collected. [`SubmissionRecord`] holds the values a
//! visitor has entered so far along with the per-field error markers shown
//! after a blur or a failed submit.

#[cfg(test)]
#[path = "submission_test.rs"]
mod submission_test;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::element::{ElementId, ElementInstance};
use crate::registry::{FieldRegistry, RegistryError};

/// Element id to raw submitted value.
pub type ValueMap = BTreeMap<ElementId, String>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub allowed: bool,
    /// Ids of the elements that failed, empty when `allowed`.
    pub errors: BTreeSet<ElementId>,
}

/// Run each element's rule over `values`.
///
/// # Errors
///
/// `UnknownType` if an element's type is not registered.
pub fn validate_submission(
    registry: &FieldRegistry,
    elements: &[ElementInstance],
    values: &ValueMap,
) -> Result<ValidationReport, RegistryError> {
    let mut errors = BTreeSet::new();
    for element in elements {
        let descriptor = registry.lookup(element.field_type())?;
        let value = values.get(&element.id).map_or("", String::as_str);
        if !(descriptor.validate)(element, value) {
            errors.insert(element.id.clone());
        }
    }
    Ok(ValidationReport { allowed: errors.is_empty(), errors })
}

/// Values and error markers for one fill session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRecord {
    values: ValueMap,
    errors: BTreeSet<ElementId>,
}

impl SubmissionRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `id`, empty when never entered.
    #[must_use]
    pub fn value(&self, id: &ElementId) -> &str {
        self.values.get(id).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        self.values.insert(id, value.into());
    }

    /// Store the value of `element` and re-check just that field.
    ///
    /// Returns whether the field is valid.
    ///
    /// # Errors
    ///
    /// `UnknownType` if the element's type is not registered.
    pub fn blur(&mut self, registry: &FieldRegistry, element: &ElementInstance, value: impl Into<String>) -> Result<bool, RegistryError> {
        let value = value.into();
        let descriptor = registry.lookup(element.field_type())?;
        let valid = (descriptor.validate)(element, &value);
        if valid {
            self.errors.remove(&element.id);
        } else {
            self.errors.insert(element.id.clone());
        }
        self.values.insert(element.id.clone(), value);
        Ok(valid)
    }

    /// Validate the whole form and replace the error markers with the result.
    ///
    /// # Errors
    ///
    /// `UnknownType` if an element's type is not registered.
    pub fn validate(&mut self, registry: &FieldRegistry, elements: &[ElementInstance]) -> Result<ValidationReport, RegistryError> {
        let report = validate_submission(registry, elements, &self.values)?;
        self.errors.clone_from(&report.errors);
        Ok(report)
    }

    #[must_use]
    pub fn errors(&self) -> &BTreeSet<ElementId> {
        &self.errors
    }

    #[must_use]
    pub fn is_invalid(&self, id: &ElementId) -> bool {
        self.errors.contains(id)
    }

    #[must_use]
    pub fn values(&self) -> &ValueMap {
        &self.values
    }
}
