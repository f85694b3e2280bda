//! Developer-authored rendering overrides

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::element::{ChangeHandler, FormStateSetter, UiNode};
use super::{derive_label, FormState};

/// Element a specification asks for.
///
/// Any tag other than the named kinds becomes a plain `<input>` of that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Range,
    Image,
    Radio,
    Select,
    Textarea,
    Input(String),
}

impl ElementKind {
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Range => "range",
            ElementKind::Image => "image",
            ElementKind::Radio => "radio",
            ElementKind::Select => "select",
            ElementKind::Textarea => "textarea",
            ElementKind::Input(tag) => tag,
        }
    }
}

impl Default for ElementKind {
    fn default() -> Self {
        ElementKind::Input("text".to_string())
    }
}

impl From<String> for ElementKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "range" => ElementKind::Range,
            "image" => ElementKind::Image,
            "radio" => ElementKind::Radio,
            "select" => ElementKind::Select,
            "textarea" => ElementKind::Textarea,
            "" => ElementKind::default(),
            _ => ElementKind::Input(tag),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        ElementKind::from(tag.to_string())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

/// Option listed by a specification for radio and select elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecOption {
    pub label: String,
    pub value: Value,
}

/// Custom producer of a field's element.
///
/// Receives the form state, the state setter and the change handler; whatever it returns
/// is used as the field's element unchanged.
pub trait CustomRenderer: Send + Sync {
    fn render(
        &self,
        form_state: &FormState,
        set_form_state: &FormStateSetter,
        on_change: &ChangeHandler,
    ) -> UiNode;
}

impl<F> CustomRenderer for F
where
    F: Fn(&FormState, &FormStateSetter, &ChangeHandler) -> UiNode + Send + Sync,
{
    fn render(
        &self,
        form_state: &FormState,
        set_form_state: &FormStateSetter,
        on_change: &ChangeHandler,
    ) -> UiNode {
        self(form_state, set_form_state, on_change)
    }
}

/// How a specified field is rendered, chosen once per field
pub enum RenderStrategy<'a> {
    /// One of the built-in element kinds
    BuiltIn(ElementKind),
    /// The developer's own renderer; every other specification field is ignored
    Custom(&'a dyn CustomRenderer),
}

/// Developer override for one field's rendering
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Specification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<ElementKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SpecOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip)]
    pub render: Option<Arc<dyn CustomRenderer>>,
}

impl Specification {
    pub fn element(kind: impl Into<ElementKind>) -> Self {
        Self {
            element: Some(kind.into()),
            ..Default::default()
        }
    }

    pub fn custom(renderer: impl CustomRenderer + 'static) -> Self {
        Self {
            render: Some(Arc::new(renderer)),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn with_options(mut self, options: Vec<SpecOption>) -> Self {
        self.options = Some(options);
        self
    }

    /// Copy of this specification with a label derived from `field_name` when none is set
    pub fn with_default_label(&self, field_name: &str) -> Self {
        let mut spec = self.clone();
        if spec.label.is_none() {
            spec.label = Some(derive_label(field_name));
        }
        spec
    }

    pub fn strategy(&self) -> RenderStrategy<'_> {
        match &self.render {
            Some(renderer) => RenderStrategy::Custom(renderer.as_ref()),
            None => RenderStrategy::BuiltIn(self.element.clone().unwrap_or_default()),
        }
    }
}

impl fmt::Debug for Specification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("label", &self.label)
            .field("element", &self.element)
            .field("options", &self.options)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("src", &self.src)
            .field("render", &self.render.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Specifications keyed by field name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specifications {
    fields: HashMap<String, Specification>,
}

impl Specifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field_name: &str, spec: Specification) -> Self {
        self.insert(field_name, spec);
        self
    }

    pub fn insert(&mut self, field_name: &str, spec: Specification) {
        self.fields.insert(field_name.to_string(), spec);
    }

    pub fn get(&self, field_name: &str) -> Option<&Specification> {
        self.fields.get(field_name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Specification)> {
        self.fields.iter()
    }
}
