//! Render-agnostic view models.
//!
//! Descriptors describe *what* to paint for an element in each context
//! (designer canvas, live form, properties panel); the host decides *how*.

use serde::Serialize;

use crate::field::{FieldType, PropertyValue};

/// Sidebar button used to start a "create new field" drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub field_type: FieldType,
    /// Button caption, e.g. `"Text Field"`.
    pub label: &'static str,
    /// Icon identifier understood by the host's icon set.
    pub icon: &'static str,
}

/// Fill-time state handed to a descriptor's live view.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillState<'a> {
    /// Current value entered by the visitor.
    pub value: &'a str,
    /// Whether the last validation pass flagged this field.
    pub invalid: bool,
}

/// What to show for one element on the canvas or in the live form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub label: Option<String>,
    /// Show the required marker (`*`) next to the label.
    pub required: bool,
    pub placeholder: Option<String>,
    /// Helper text under the input; `None` when empty.
    pub helper_text: Option<String>,
    /// Visible rows for multi-line inputs.
    pub rows: Option<i64>,
    /// Static body text (paragraphs).
    pub text: Option<String>,
    /// Current input value; `None` when the element collects no value.
    pub value: Option<String>,
    /// Highlight as invalid.
    pub invalid: bool,
    /// Inputs are inert on the designer canvas.
    pub read_only: bool,
}

/// Kind of input used to edit one attribute in the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputControl {
    Text,
    TextArea { rows: i64 },
    Switch,
    Slider { min: i64, max: i64, step: i64 },
}

/// One input row of the properties panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyInput {
    /// Attribute wire name.
    pub key: &'static str,
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub control: InputControl,
    /// Current draft value.
    pub value: PropertyValue,
    /// Field-level schema error from the last rejected commit.
    pub error: Option<String>,
}

/// Non-empty string as `Some`, empty as `None`.
pub(crate) fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_owned()) }
}
