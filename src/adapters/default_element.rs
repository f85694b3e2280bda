//! Built-in elements for fields without a specification

use super::controls;
use crate::domain::{ChangeHandler, FieldModel, FieldType, FormState, UiNode};

/// Input types picked from a (lower-cased) text field name
const NAMED_INPUT_TYPES: &[(&str, &str)] = &[
    ("pass", "password"),
    ("password", "password"),
    ("color", "color"),
    ("colour", "color"),
    ("url", "url"),
    ("link", "url"),
    ("date", "date"),
    ("time", "time"),
    ("file", "file"),
    ("datetime", "datetime"),
    ("timestamp", "datetime"),
    ("telephone", "tel"),
    ("phone", "tel"),
    ("mobile", "tel"),
    ("phonenumber", "tel"),
    ("cell", "tel"),
];

/// Input type for a text-like field, chosen from its name; `text` when nothing matches
pub fn input_type_for_name(field_name: &str) -> &'static str {
    let lowered = field_name.to_lowercase();
    NAMED_INPUT_TYPES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, input_type)| *input_type)
        .unwrap_or("text")
}

/// Build the default element for `field` from its classified type
pub fn generate_default_element(
    field: &FieldModel,
    form_state: &FormState,
    on_change: &ChangeHandler,
) -> UiNode {
    let field = field.labelled();
    let label = field.display_label();
    let name = field.name.as_str();

    let control = match &field.field_type {
        FieldType::Int => controls::input(name, "number", form_state, on_change),
        FieldType::Boolean => controls::input(name, "checkbox", form_state, on_change),
        FieldType::Enum => {
            let options = field.options.as_deref().unwrap_or_default();
            controls::select(
                name,
                options.iter().map(|o| (o.name.clone(), o.name.as_str())),
                form_state,
                on_change,
            )
        }
        FieldType::String | FieldType::Scalar(_) => {
            controls::input(name, input_type_for_name(name), form_state, on_change)
        }
    };

    controls::labelled(&label, control)
}
