//! Core types for schema-driven form generation
//!
//! The introspected shape of a mutation input type ([`TypeDescriptor`]), the normalized
//! field model derived from it ([`FieldModel`]), and the port through which the
//! introspection query reaches the API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

pub mod element;
pub mod error;
pub mod specification;

pub use element::{class_for, ChangeHandler, FieldChange, FormStateSetter, UiElement, UiNode};
pub use error::{FieldDiagnostic, IntrospectionError};
pub use specification::{
    CustomRenderer, ElementKind, RenderStrategy, SpecOption, Specification, Specifications,
};

/// Values already fixed by the caller, keyed by input field name.
///
/// Any field named here is left out of the generated form.
pub type SuppliedArgs = HashMap<String, Value>;

/// Current value of every form input, keyed by input field name.
pub type FormState = HashMap<String, Value>;

// ============================================================================
// Introspected schema
// ============================================================================

/// Kind of a GraphQL type as reported by `__type { kind }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    /// Any kind this crate does not know about
    #[serde(other)]
    Unknown,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Scalar => "SCALAR",
            TypeKind::Object => "OBJECT",
            TypeKind::Interface => "INTERFACE",
            TypeKind::Union => "UNION",
            TypeKind::Enum => "ENUM",
            TypeKind::InputObject => "INPUT_OBJECT",
            TypeKind::List => "LIST",
            TypeKind::NonNull => "NON_NULL",
            TypeKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level of an input field's type.
///
/// `enum_values` is kept as raw JSON: a malformed list is diagnosed per field by the
/// field model generator instead of failing the whole introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    #[serde(default)]
    pub name: Option<String>,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub of_type: Option<Box<TypeRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Value>,
}

impl TypeRef {
    /// Create a named type of the given kind
    pub fn named(kind: TypeKind, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            kind,
            of_type: None,
            enum_values: None,
        }
    }

    /// Wrap a type in `NON_NULL`
    pub fn non_null(inner: TypeRef) -> Self {
        Self {
            name: None,
            kind: TypeKind::NonNull,
            of_type: Some(Box::new(inner)),
            enum_values: None,
        }
    }

    /// The type one level down, if this one wraps another
    pub fn wrapped(&self) -> Option<&TypeRef> {
        self.of_type.as_deref()
    }
}

/// Raw schema description of one input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputFieldDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeRef,
}

/// One introspected input type, as returned under `data.__type`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub input_fields: Option<Vec<InputFieldDescriptor>>,
}

// ============================================================================
// Field model
// ============================================================================

/// Classified type of a form field.
///
/// Scalars other than the built-in ones (`Float`, `ID`, custom scalars) keep their
/// schema name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Int,
    Boolean,
    String,
    Enum,
    Scalar(String),
}

impl FieldType {
    pub fn from_scalar_name(name: &str) -> Self {
        match name {
            "Int" => FieldType::Int,
            "Boolean" => FieldType::Boolean,
            "String" => FieldType::String,
            "Enum" => FieldType::Enum,
            other => FieldType::Scalar(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Int => "Int",
            FieldType::Boolean => "Boolean",
            FieldType::String => "String",
            FieldType::Enum => "Enum",
            FieldType::Scalar(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        FieldType::from_scalar_name(&name)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive type of an enum option's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    Int,
    Boolean,
    String,
}

/// One selectable value of an enum-typed field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub name: String,
    pub label: String,
    pub value: Value,
    #[serde(rename = "type")]
    pub option_type: OptionType,
}

/// Normalized, classified form field ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldModel {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub required: bool,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Present iff `field_type` is [`FieldType::Enum`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
}

impl FieldModel {
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            label: None,
            required: false,
            field_type,
            options: None,
        }
    }

    /// Copy of this field with its label derived from the field name
    pub fn labelled(&self) -> Self {
        Self {
            label: Some(derive_label(&self.name)),
            ..self.clone()
        }
    }

    /// Explicit label, or one derived from the field name
    pub fn display_label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| derive_label(&self.name))
    }
}

/// Turn a camelCase field name into a display label: `pizzaTopping` -> `Pizza Topping`.
///
/// A space goes between every lowercase ASCII letter directly followed by an uppercase
/// ASCII letter, then the first character is uppercased.
pub fn derive_label(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut previous: Option<char> = None;
    for ch in name.chars() {
        if previous.is_some_and(|p| p.is_ascii_lowercase()) && ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
        previous = Some(ch);
    }

    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}

/// Text form of a scalar value as it appears in an HTML attribute
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Current form value of a field, if it has one
pub fn form_value<'a>(form_state: &'a FormState, field_name: &str) -> Option<&'a Value> {
    form_state.get(field_name).filter(|value| !value.is_null())
}

// ============================================================================
// Introspection port
// ============================================================================

/// Variables of the introspection query
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionVariables {
    pub input_type: String,
}

/// JSON body of one introspection request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntrospectionRequest {
    pub query: &'static str,
    pub variables: IntrospectionVariables,
}

/// Sends an introspection request to the API and returns the raw JSON payload
#[async_trait]
pub trait IntrospectionTransport: Send + Sync {
    async fn execute(&self, request: &IntrospectionRequest) -> Result<Value, IntrospectionError>;
}
