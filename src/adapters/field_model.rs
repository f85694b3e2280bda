//! Field model generation
//!
//! Normalizes an introspected input type into the ordered list of fields a form renders.
//! Pure and deterministic: no I/O, inputs are never mutated.

use serde_json::Value;

use crate::domain::{
    FieldDiagnostic, FieldModel, FieldOption, FieldType, InputFieldDescriptor, OptionType,
    SuppliedArgs, TypeDescriptor, TypeKind,
};

/// Generate the field models for `descriptor`, reporting diagnostics through `tracing`.
///
/// Fields named in `supplied_args` are left out; schema order is preserved.
pub fn generate_fields(descriptor: &TypeDescriptor, supplied_args: &SuppliedArgs) -> Vec<FieldModel> {
    let (fields, diagnostics) = generate_fields_with_diagnostics(descriptor, supplied_args);
    for diagnostic in &diagnostics {
        diagnostic.emit();
    }
    fields
}

/// Same as [`generate_fields`], returning the diagnostics instead of logging them
pub fn generate_fields_with_diagnostics(
    descriptor: &TypeDescriptor,
    supplied_args: &SuppliedArgs,
) -> (Vec<FieldModel>, Vec<FieldDiagnostic>) {
    let mut diagnostics = Vec::new();

    let Some(input_fields) = descriptor.input_fields.as_ref() else {
        diagnostics.push(FieldDiagnostic::MissingInputFields);
        return (Vec::new(), diagnostics);
    };

    let fields: Vec<FieldModel> = input_fields
        .iter()
        .filter(|field| !supplied_args.contains_key(&field.name))
        .map(|field| classify_field(field, &mut diagnostics))
        .collect();

    (fields, diagnostics)
}

/// Classify one input field; precedence is scalar, enum, wrapped scalar, fallback
fn classify_field(field: &InputFieldDescriptor, diagnostics: &mut Vec<FieldDiagnostic>) -> FieldModel {
    let outer = &field.field_type;
    let wrapped = outer.wrapped();

    let mut model = FieldModel::new(&field.name, FieldType::String);
    model.required = outer.kind == TypeKind::NonNull;

    if let (TypeKind::Scalar, Some(name)) = (outer.kind, outer.name.as_deref()) {
        model.field_type = FieldType::from_scalar_name(name);
    } else if outer.kind == TypeKind::Enum || wrapped.is_some_and(|w| w.kind == TypeKind::Enum) {
        model.field_type = FieldType::Enum;

        // outer list wins over the wrapped one
        let raw_values = outer
            .enum_values
            .as_ref()
            .or_else(|| wrapped.and_then(|w| w.enum_values.as_ref()));

        let options = match raw_values.map(enum_options).transpose() {
            Ok(options) => options.unwrap_or_default(),
            Err(reason) => {
                diagnostics.push(FieldDiagnostic::MalformedEnum {
                    field: field.name.clone(),
                    reason,
                });
                Vec::new()
            }
        };
        model.options = Some(options);
    } else if let Some(name) = wrapped
        .filter(|w| w.kind == TypeKind::Scalar)
        .and_then(|w| w.name.as_deref())
    {
        model.field_type = FieldType::from_scalar_name(name);
    } else {
        diagnostics.push(FieldDiagnostic::UnsupportedType {
            field: field.name.clone(),
            kind: wrapped.map(|w| w.kind).unwrap_or(outer.kind),
        });
    }

    model
}

/// Build the options of an enum field from its raw `enumValues` list
fn enum_options(raw_values: &Value) -> Result<Vec<FieldOption>, String> {
    let entries = raw_values
        .as_array()
        .ok_or_else(|| format!("expected a list of enum values, found {}", json_kind(raw_values)))?;

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let name = entry
                .get("name")
                .ok_or_else(|| format!("enum value #{} has no name", idx))?;
            enum_option(name).ok_or_else(|| {
                format!("enum value #{} has a {} name", idx, json_kind(name))
            })
        })
        .collect()
}

/// Option for one enum value; the option type follows the primitive kind of the value's name
fn enum_option(name: &Value) -> Option<FieldOption> {
    let (value, option_type) = match name {
        Value::Number(_) => (name.clone(), OptionType::Int),
        // stringified: HTML attribute values cannot be booleans
        Value::Bool(flag) => (Value::String(flag.to_string()), OptionType::Boolean),
        Value::String(_) => (name.clone(), OptionType::String),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    let text = match name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Some(FieldOption {
        name: text.clone(),
        label: text,
        value,
        option_type,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
