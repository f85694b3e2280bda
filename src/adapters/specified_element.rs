//! Elements for fields the developer has a specification for

use serde::Serialize;
use serde_json::Value;

use super::controls::{self, current_text, is_current};
use crate::domain::{
    class_for, value_text, ChangeHandler, ElementKind, FieldModel, FormState, FormStateSetter,
    OptionType, RenderStrategy, SpecOption, Specification, UiElement, UiNode,
};

/// An option offered by a radio group or select element.
///
/// `name` and `option_type` are recovered from the field's enum options and stay unset when
/// a developer-listed option has no counterpart there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub name: Option<String>,
    pub label: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub option_type: Option<OptionType>,
}

/// Options for a radio or select element.
///
/// Developer-listed options win; each is matched by label against the field's options (the
/// last match counts). Without a list the field's own options are used as they are.
pub fn merge_options(field: &FieldModel, spec_options: Option<&[SpecOption]>) -> Vec<ChoiceOption> {
    let field_options = field.options.as_deref().unwrap_or_default();

    match spec_options {
        Some(listed) => listed
            .iter()
            .map(|spec| {
                let matched = field_options.iter().rev().find(|o| o.label == spec.label);
                ChoiceOption {
                    name: matched.map(|o| o.name.clone()),
                    label: spec.label.clone(),
                    value: spec.value.clone(),
                    option_type: matched.map(|o| o.option_type),
                }
            })
            .collect(),
        None => field_options
            .iter()
            .map(|o| ChoiceOption {
                name: Some(o.name.clone()),
                label: o.label.clone(),
                value: o.value.clone(),
                option_type: Some(o.option_type),
            })
            .collect(),
    }
}

/// Build the element for `field` following `spec`.
///
/// A custom renderer takes precedence over everything else in the specification and its
/// result is returned as is. `set_form_state` only ever reaches custom renderers.
pub fn resolve_specified_element(
    field: &FieldModel,
    spec: &Specification,
    form_state: &FormState,
    on_change: &ChangeHandler,
    set_form_state: &FormStateSetter,
) -> UiNode {
    match spec.strategy() {
        RenderStrategy::Custom(renderer) => renderer.render(form_state, set_form_state, on_change),
        RenderStrategy::BuiltIn(kind) => {
            let spec = spec.with_default_label(&field.name);
            built_in(field, &spec, &kind, form_state, on_change)
        }
    }
}

fn built_in(
    field: &FieldModel,
    spec: &Specification,
    kind: &ElementKind,
    form_state: &FormState,
    on_change: &ChangeHandler,
) -> UiNode {
    let name = field.name.as_str();
    let label = spec.label.as_deref().unwrap_or(name);

    match kind {
        ElementKind::Range => {
            let control = controls::input(name, "range", form_state, on_change)
                .attr("min", spec.min.unwrap_or(0.0).to_string())
                .attr_opt("max", spec.max.map(|max| max.to_string()));
            controls::labelled(label, control)
        }
        ElementKind::Image => {
            let control = controls::input(name, "image", form_state, on_change)
                .attr_opt("src", spec.src.as_deref())
                .attr("alt", label);
            controls::labelled(label, control)
        }
        ElementKind::Radio => radio_group(field, spec, label, form_state, on_change),
        ElementKind::Select => {
            let options = merge_options(field, spec.options.as_deref());
            let control = controls::select(
                name,
                options.iter().map(|o| (value_text(&o.value), o.label.as_str())),
                form_state,
                on_change,
            );
            controls::labelled(label, control)
        }
        ElementKind::Textarea => {
            let mut control = UiElement::new("textarea")
                .attr("class", class_for(name, "textarea"))
                .attr("name", name)
                .on_change(on_change);
            if let Some(current) = current_text(form_state, name) {
                control = control.text(current);
            }
            controls::labelled(label, control)
        }
        ElementKind::Input(tag) => controls::labelled(label, controls::input(name, tag, form_state, on_change)),
    }
}

fn radio_group(
    field: &FieldModel,
    spec: &Specification,
    label: &str,
    form_state: &FormState,
    on_change: &ChangeHandler,
) -> UiNode {
    let name = field.name.as_str();
    let option_class = class_for(name, "radio-option");

    let buttons = merge_options(field, spec.options.as_deref())
        .into_iter()
        .map(|option| {
            let button = UiElement::new("input")
                .attr("type", "radio")
                .attr("name", name)
                .attr("class", option_class.as_str())
                .attr("value", value_text(&option.value))
                .flag("checked", is_current(form_state, name, &option.value))
                .on_change(on_change);

            UiNode::from(
                UiElement::new("label")
                    .attr("class", "periqles-radio-option-label")
                    .child(button)
                    .text(option.label),
            )
        });

    UiElement::new("div")
        .attr("class", class_for(name, "radio"))
        .child(
            UiElement::new("label")
                .attr("class", "periqles-radio-div-label")
                .text(label),
        )
        .children(buttons)
        .into()
}
