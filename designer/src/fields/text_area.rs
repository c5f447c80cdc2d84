//! Multi-line text field. Same settings as a text field plus a row count.

#[cfg(test)]
#[path = "text_area_test.rs"]
mod text_area_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ROWS_MAX, ROWS_MIN};
use crate::element::{ElementId, ElementInstance};
use crate::field::{Attributes, FieldErrors, FieldType, PropertyError, PropertyValue, expect_number};
use crate::fields::text::TextFieldAttributes;
use crate::registry::FieldTypeDescriptor;
use crate::view::{FieldView, FillState, InputControl, PaletteEntry, PropertyInput, non_empty};

const DEFAULT_ROWS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TextAreaWire")]
pub struct TextAreaAttributes {
    #[serde(flatten)]
    pub base: TextFieldAttributes,
    pub rows: i64,
}

/// Decoded shape; missing keys fall back to the text-area defaults rather
/// than the plain text-field ones.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextAreaWire {
    label: Option<String>,
    helper_text: Option<String>,
    required: Option<bool>,
    #[serde(rename = "placeHolder")]
    place_holder: Option<String>,
    rows: Option<i64>,
}

impl From<TextAreaWire> for TextAreaAttributes {
    fn from(wire: TextAreaWire) -> Self {
        let mut attrs = Self::default();
        if let Some(label) = wire.label {
            attrs.base.label = label;
        }
        if let Some(helper_text) = wire.helper_text {
            attrs.base.helper_text = helper_text;
        }
        if let Some(required) = wire.required {
            attrs.base.required = required;
        }
        if let Some(place_holder) = wire.place_holder {
            attrs.base.place_holder = place_holder;
        }
        if let Some(rows) = wire.rows {
            attrs.rows = rows;
        }
        attrs
    }
}

impl Default for TextAreaAttributes {
    fn default() -> Self {
        Self {
            base: TextFieldAttributes { label: "Text area".into(), ..TextFieldAttributes::default() },
            rows: DEFAULT_ROWS,
        }
    }
}

impl TextAreaAttributes {
    pub(crate) fn get(&self, key: &str) -> Option<PropertyValue> {
        match key {
            "rows" => Some(self.rows.into()),
            _ => self.base.get(key),
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: PropertyValue) -> Result<(), PropertyError> {
        match key {
            "rows" => {
                self.rows = expect_number(key, value)?;
                Ok(())
            }
            _ => self.base.set(key, value).map_err(|e| match e {
                PropertyError::UnknownProperty { key, .. } => {
                    PropertyError::UnknownProperty { field_type: FieldType::TextAreaField, key }
                }
                other => other,
            }),
        }
    }
}

/// Registry descriptor for `TextAreaField`.
#[must_use]
pub fn descriptor() -> FieldTypeDescriptor {
    FieldTypeDescriptor {
        field_type: FieldType::TextAreaField,
        palette: PaletteEntry { field_type: FieldType::TextAreaField, label: "TextArea Field", icon: "textarea-resize" },
        construct,
        validate,
        check,
        designer_view,
        fill_view,
        properties_view,
    }
}

fn construct(id: ElementId) -> ElementInstance {
    ElementInstance::new(id, Attributes::TextAreaField(TextAreaAttributes::default()))
}

fn validate(element: &ElementInstance, value: &str) -> bool {
    let Attributes::TextAreaField(a) = &element.attributes else {
        return false;
    };
    !a.base.required || !value.is_empty()
}

fn check(attributes: &Attributes) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    match attributes {
        Attributes::TextAreaField(a) => {
            a.base.check_into(&mut errors);
            errors.check_range("rows", a.rows, ROWS_MIN, ROWS_MAX);
        }
        other => errors.insert("type", format!("expected TextAreaField attributes, got {}", other.field_type())),
    }
    errors.into_result()
}

fn designer_view(element: &ElementInstance) -> FieldView {
    let Attributes::TextAreaField(a) = &element.attributes else {
        return FieldView::default();
    };
    FieldView {
        label: Some(a.base.label.clone()),
        required: a.base.required,
        placeholder: Some(a.base.place_holder.clone()),
        helper_text: non_empty(&a.base.helper_text),
        rows: Some(a.rows),
        read_only: true,
        ..FieldView::default()
    }
}

fn fill_view(element: &ElementInstance, state: FillState<'_>) -> FieldView {
    FieldView {
        value: Some(state.value.to_owned()),
        invalid: state.invalid,
        read_only: false,
        ..designer_view(element)
    }
}

fn properties_view(attributes: &Attributes, errors: &FieldErrors) -> Vec<PropertyInput> {
    let Attributes::TextAreaField(a) = attributes else {
        return Vec::new();
    };
    let mut inputs = a.base.inputs(errors);
    // Rows slider sits above the required switch.
    let at = inputs.len().saturating_sub(1);
    inputs.insert(
        at,
        PropertyInput {
            key: "rows",
            label: "Rows",
            description: None,
            control: InputControl::Slider { min: ROWS_MIN, max: ROWS_MAX, step: 1 },
            value: a.rows.into(),
            error: errors.get("rows").map(str::to_owned),
        },
    );
    inputs
}
