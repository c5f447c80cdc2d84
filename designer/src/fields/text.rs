//! Single-line text field.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde::{Deserialize, Serialize};

use crate::consts::{HELPER_TEXT_MAX_LEN, LABEL_MAX_LEN, LABEL_MIN_LEN, PLACEHOLDER_MAX_LEN};
use crate::element::{ElementId, ElementInstance};
use crate::field::{Attributes, FieldErrors, FieldType, PropertyError, PropertyValue, expect_bool, expect_text};
use crate::registry::FieldTypeDescriptor;
use crate::view::{FieldView, FillState, InputControl, PaletteEntry, PropertyInput, non_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextFieldAttributes {
    pub label: String,
    pub helper_text: String,
    pub required: bool,
    #[serde(rename = "placeHolder")]
    pub place_holder: String,
}

impl Default for TextFieldAttributes {
    fn default() -> Self {
        Self {
            label: "Text field".into(),
            helper_text: "Helper text".into(),
            required: false,
            place_holder: "value here".into(),
        }
    }
}

impl TextFieldAttributes {
    pub(crate) fn get(&self, key: &str) -> Option<PropertyValue> {
        match key {
            "label" => Some(self.label.clone().into()),
            "helperText" => Some(self.helper_text.clone().into()),
            "required" => Some(self.required.into()),
            "placeHolder" => Some(self.place_holder.clone().into()),
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: PropertyValue) -> Result<(), PropertyError> {
        match key {
            "label" => self.label = expect_text(key, value)?,
            "helperText" => self.helper_text = expect_text(key, value)?,
            "required" => self.required = expect_bool(key, value)?,
            "placeHolder" => self.place_holder = expect_text(key, value)?,
            _ => {
                return Err(PropertyError::UnknownProperty { field_type: FieldType::TextField, key: key.to_owned() });
            }
        }
        Ok(())
    }

    /// Schema shared by every labelled input.
    pub(crate) fn check_into(&self, errors: &mut FieldErrors) {
        errors.check_len("label", &self.label, LABEL_MIN_LEN, LABEL_MAX_LEN);
        errors.check_len("helperText", &self.helper_text, 0, HELPER_TEXT_MAX_LEN);
        errors.check_len("placeHolder", &self.place_holder, 0, PLACEHOLDER_MAX_LEN);
    }

    pub(crate) fn inputs(&self, errors: &FieldErrors) -> Vec<PropertyInput> {
        let input = |key: &'static str,
                     label: &'static str,
                     description: Option<&'static str>,
                     control: InputControl,
                     value: PropertyValue| PropertyInput {
            key,
            label,
            description,
            control,
            value,
            error: errors.get(key).map(str::to_owned),
        };
        vec![
            input(
                "label",
                "Label",
                Some("The label of the field. It will be displayed above the field"),
                InputControl::Text,
                self.label.clone().into(),
            ),
            input(
                "placeHolder",
                "Placeholder",
                Some("The placeholder of the field"),
                InputControl::Text,
                self.place_holder.clone().into(),
            ),
            input(
                "helperText",
                "Helper text",
                Some("The helper text of the field. It will be displayed below the field"),
                InputControl::Text,
                self.helper_text.clone().into(),
            ),
            input(
                "required",
                "Required",
                Some("Visitors must fill in this field before submitting"),
                InputControl::Switch,
                self.required.into(),
            ),
        ]
    }
}

/// Registry descriptor for `TextField`.
#[must_use]
pub fn descriptor() -> FieldTypeDescriptor {
    FieldTypeDescriptor {
        field_type: FieldType::TextField,
        palette: PaletteEntry { field_type: FieldType::TextField, label: "Text Field", icon: "text-fields" },
        construct,
        validate,
        check,
        designer_view,
        fill_view,
        properties_view,
    }
}

fn construct(id: ElementId) -> ElementInstance {
    ElementInstance::new(id, Attributes::TextField(TextFieldAttributes::default()))
}

fn validate(element: &ElementInstance, value: &str) -> bool {
    let Attributes::TextField(a) = &element.attributes else {
        return false;
    };
    !a.required || !value.is_empty()
}

fn check(attributes: &Attributes) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    match attributes {
        Attributes::TextField(a) => a.check_into(&mut errors),
        other => errors.insert("type", format!("expected TextField attributes, got {}", other.field_type())),
    }
    errors.into_result()
}

fn designer_view(element: &ElementInstance) -> FieldView {
    let Attributes::TextField(a) = &element.attributes else {
        return FieldView::default();
    };
    FieldView {
        label: Some(a.label.clone()),
        required: a.required,
        placeholder: Some(a.place_holder.clone()),
        helper_text: non_empty(&a.helper_text),
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
    match attributes {
        Attributes::TextField(a) => a.inputs(errors),
        _ => Vec::new(),
    }
}
