//! Building blocks shared by the element generators

use serde_json::Value;

use crate::domain::{class_for, form_value, value_text, ChangeHandler, FormState, UiElement, UiNode};

/// `<label>` holding the label text followed by the control
pub(crate) fn labelled(label: &str, control: UiElement) -> UiNode {
    UiElement::new("label").text(label).child(control).into()
}

/// `<input>` of `input_type` bound to the field, carrying its current value
pub(crate) fn input(
    field_name: &str,
    input_type: &str,
    form_state: &FormState,
    on_change: &ChangeHandler,
) -> UiElement {
    UiElement::new("input")
        .attr("type", input_type)
        .attr("class", class_for(field_name, input_type))
        .attr("name", field_name)
        .attr_opt("value", current_text(form_state, field_name))
        .on_change(on_change)
}

/// `<select>` bound to the field; each option is a `(value, text)` pair.
///
/// The option matching the current form value is marked `selected`.
pub(crate) fn select<'a>(
    field_name: &str,
    options: impl IntoIterator<Item = (String, &'a str)>,
    form_state: &FormState,
    on_change: &ChangeHandler,
) -> UiElement {
    let current = current_text(form_state, field_name);
    let option_class = class_for(field_name, "select-option");

    let options = options.into_iter().map(|(value, text)| {
        let selected = current.as_deref() == Some(value.as_str());
        UiNode::from(
            UiElement::new("option")
                .attr("value", value)
                .attr("class", option_class.as_str())
                .flag("selected", selected)
                .text(text),
        )
    });

    UiElement::new("select")
        .attr("class", class_for(field_name, "select"))
        .attr("name", field_name)
        .children(options)
        .on_change(on_change)
}

/// Current value of the field in attribute form
pub(crate) fn current_text(form_state: &FormState, field_name: &str) -> Option<String> {
    form_value(form_state, field_name).map(value_text)
}

/// Whether `value` is the field's current value; compared in attribute form
pub(crate) fn is_current(form_state: &FormState, field_name: &str, value: &Value) -> bool {
    current_text(form_state, field_name).is_some_and(|current| current == value_text(value))
}
