//! Static paragraph. Displays text, collects nothing, always validates.

use serde::{Deserialize, Serialize};

use crate::consts::{PARAGRAPH_MAX_LEN, PARAGRAPH_MIN_LEN};
use crate::element::{ElementId, ElementInstance};
use crate::field::{Attributes, FieldErrors, FieldType, PropertyError, PropertyValue, expect_text};
use crate::registry::FieldTypeDescriptor;
use crate::view::{FieldView, FillState, InputControl, PaletteEntry, PropertyInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphAttributes {
    pub text: String,
}

impl Default for ParagraphAttributes {
    fn default() -> Self {
        Self { text: "Text Here".into() }
    }
}

impl ParagraphAttributes {
    pub(crate) fn get(&self, key: &str) -> Option<PropertyValue> {
        match key {
            "text" => Some(self.text.clone().into()),
            _ => None,
        }
    }

    pub(crate) fn set(&mut self, key: &str, value: PropertyValue) -> Result<(), PropertyError> {
        match key {
            "text" => {
                self.text = expect_text(key, value)?;
                Ok(())
            }
            _ => Err(PropertyError::UnknownProperty { field_type: FieldType::ParagraphField, key: key.to_owned() }),
        }
    }
}

/// Registry descriptor for `ParagraphField`.
#[must_use]
pub fn descriptor() -> FieldTypeDescriptor {
    FieldTypeDescriptor {
        field_type: FieldType::ParagraphField,
        palette: PaletteEntry { field_type: FieldType::ParagraphField, label: "Paragraph Field", icon: "text-paragraph" },
        construct,
        validate,
        check,
        designer_view,
        fill_view,
        properties_view,
    }
}

fn construct(id: ElementId) -> ElementInstance {
    ElementInstance::new(id, Attributes::ParagraphField(ParagraphAttributes::default()))
}

fn validate(_element: &ElementInstance, _value: &str) -> bool {
    true
}

fn check(attributes: &Attributes) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    match attributes {
        Attributes::ParagraphField(a) => errors.check_len("text", &a.text, PARAGRAPH_MIN_LEN, PARAGRAPH_MAX_LEN),
        other => errors.insert("type", format!("expected ParagraphField attributes, got {}", other.field_type())),
    }
    errors.into_result()
}

fn designer_view(element: &ElementInstance) -> FieldView {
    let Attributes::ParagraphField(a) = &element.attributes else {
        return FieldView::default();
    };
    FieldView { label: Some("Paragraph field".into()), text: Some(a.text.clone()), read_only: true, ..FieldView::default() }
}

fn fill_view(element: &ElementInstance, _state: FillState<'_>) -> FieldView {
    let Attributes::ParagraphField(a) = &element.attributes else {
        return FieldView::default();
    };
    FieldView { text: Some(a.text.clone()), ..FieldView::default() }
}

fn properties_view(attributes: &Attributes, errors: &FieldErrors) -> Vec<PropertyInput> {
    let Attributes::ParagraphField(a) = attributes else {
        return Vec::new();
    };
    vec![PropertyInput {
        key: "text",
        label: "Text",
        description: None,
        control: InputControl::TextArea { rows: 5 },
        value: a.text.clone().into(),
        error: errors.get("text").map(str::to_owned),
    }]
}
