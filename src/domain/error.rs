//! Error and diagnostic types for introspection and field generation

use thiserror::Error;

use super::TypeKind;

/// Terminal failures of one introspection cycle.
///
/// No field model is produced when any of these occur.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    /// The endpoint URL could not be parsed
    #[error("Invalid introspection endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The request could not be sent or the response could not be read
    #[error("Failed to introspect: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status and no JSON body
    #[error("Failed to introspect: endpoint responded with HTTP {status}")]
    Status { status: u16 },

    /// The response body or the type record is not valid JSON of the expected shape
    #[error("Failed to introspect: malformed response: {0}")]
    Decode(String),

    /// The response has no `data`
    #[error("Failed to introspect. No data received.{}", format_graphql_errors(.errors))]
    NoData { errors: Vec<String> },

    /// `data` has no `__type` record
    #[error("Failed to introspect. No __type property on received data for '{type_name}'.")]
    MissingType { type_name: String },
}

fn format_graphql_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(" GraphQL errors: {}", errors.join("; "))
    }
}

impl From<reqwest::Error> for IntrospectionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            IntrospectionError::Decode(err.to_string())
        } else {
            IntrospectionError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IntrospectionError {
    fn from(err: serde_json::Error) -> Self {
        IntrospectionError::Decode(err.to_string())
    }
}

/// Non-fatal findings while normalizing an input type into field models
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldDiagnostic {
    /// The input type has no field list
    #[error("ERROR at PeriqlesForm: mutation input type is undefined.")]
    MissingInputFields,

    /// The field is neither a scalar nor an enum; it falls back to `String`
    #[error("The '{field}' input field is of a complex type ({kind}) not currently supported by PeriqlesForm. It will default to a 'String'.")]
    UnsupportedType { field: String, kind: TypeKind },

    /// The field's enum values could not be turned into options
    #[error("ERROR at PeriqlesForm: Failure to assign enumerated field '{field}': {reason}")]
    MalformedEnum { field: String, reason: String },
}

impl FieldDiagnostic {
    /// Report this diagnostic through `tracing`
    pub fn emit(&self) {
        match self {
            FieldDiagnostic::UnsupportedType { field, kind } => {
                tracing::warn!(field = %field, kind = %kind, "{}", self);
            }
            FieldDiagnostic::MalformedEnum { field, .. } => {
                tracing::error!(field = %field, "{}", self);
            }
            FieldDiagnostic::MissingInputFields => {
                tracing::error!("{}", self);
            }
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, FieldDiagnostic::UnsupportedType { .. })
    }
}
