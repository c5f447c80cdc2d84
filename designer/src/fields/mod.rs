//! Built-in field types.
//!
//! Each submodule owns one attribute record and the descriptor that bundles
//! its construct/validate/check/view functions for the registry.

pub mod paragraph;
pub mod text;
pub mod text_area;

use crate::registry::FieldTypeDescriptor;

/// Descriptors for every built-in field type, in palette order.
#[must_use]
pub fn builtin() -> [FieldTypeDescriptor; 3] {
    [text::descriptor(), text_area::descriptor(), paragraph::descriptor()]
}
