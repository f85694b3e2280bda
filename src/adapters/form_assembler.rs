//! Form assembly
//!
//! Routes each field to the specified or the default element generator and wraps the
//! results in the `PeriqlesForm` shell.

use serde_json::{Map, Value};

use super::default_element::generate_default_element;
use super::specified_element::resolve_specified_element;
use crate::domain::{
    derive_label, ChangeHandler, FieldModel, FormState, FormStateSetter, Specifications,
    SuppliedArgs, UiElement, UiNode,
};

pub const FORM_CLASS: &str = "PeriqlesForm";
pub const SUBMIT_CLASS: &str = "periqles-submit";
pub const LOADING_TEXT: &str = "Loading form...";

/// Assembles the form of one mutation
#[derive(Debug, Clone)]
pub struct FormAssembler {
    mutation: String,
    header: Option<String>,
    submit_text: String,
    specifications: Specifications,
}

impl FormAssembler {
    pub fn new(mutation: &str) -> Self {
        Self {
            mutation: mutation.to_string(),
            header: None,
            submit_text: "Submit".to_string(),
            specifications: Specifications::new(),
        }
    }

    pub fn with_header(mut self, header: Option<String>) -> Self {
        self.header = header;
        self
    }

    pub fn with_submit_text(mut self, text: &str) -> Self {
        self.submit_text = text.to_string();
        self
    }

    pub fn with_specifications(mut self, specifications: Specifications) -> Self {
        self.specifications = specifications;
        self
    }

    pub fn mutation(&self) -> &str {
        &self.mutation
    }

    /// Header text; derived from the mutation name when none was configured
    pub fn header(&self) -> String {
        self.header
            .clone()
            .unwrap_or_else(|| derive_label(&self.mutation))
    }

    /// Element for one field: its specification when there is one, the default otherwise
    pub fn element_for(
        &self,
        field: &FieldModel,
        form_state: &FormState,
        on_change: &ChangeHandler,
        set_form_state: &FormStateSetter,
    ) -> UiNode {
        match self.specifications.get(&field.name) {
            Some(spec) => resolve_specified_element(field, spec, form_state, on_change, set_form_state),
            None => generate_default_element(field, form_state, on_change),
        }
    }

    /// The whole form; shows a loading placeholder while `fields` is empty
    pub fn assemble(
        &self,
        fields: &[FieldModel],
        form_state: &FormState,
        on_change: &ChangeHandler,
        set_form_state: &FormStateSetter,
    ) -> UiNode {
        let mut form = UiElement::new("form")
            .attr("class", FORM_CLASS)
            .child(UiElement::new("h2").text(self.header()));

        if fields.is_empty() {
            form = form.child(UiElement::new("p").text(LOADING_TEXT));
        } else {
            form = form.children(
                fields
                    .iter()
                    .map(|field| self.element_for(field, form_state, on_change, set_form_state)),
            );
        }

        form.child(
            UiElement::new("button")
                .attr("type", "submit")
                .attr("class", SUBMIT_CLASS)
                .text(self.submit_text.as_str()),
        )
        .into()
    }
}

/// Input variables of the mutation: the form values plus the supplied args, which win
pub fn mutation_input(form_state: &FormState, supplied_args: &SuppliedArgs) -> Value {
    let mut input: Map<String, Value> = form_state
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();
    for (name, value) in supplied_args {
        input.insert(name.clone(), value.clone());
    }
    Value::Object(input)
}
