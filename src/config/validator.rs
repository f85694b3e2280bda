use std::collections::HashMap;
use thiserror::Error;

use crate::config::{ArgEntry, EndpointSettings, FormSettings, ServerSettings, Settings, SpecificationEntry};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_endpoint(&settings.endpoint) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_form(&settings.form) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_specifications(&settings.specifications) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_endpoint(endpoint: &EndpointSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if endpoint.url.is_empty() {
            errors.push(ValidationError::MissingField("endpoint.url".to_string()));
        } else if let Err(e) = reqwest::Url::parse(&endpoint.url) {
            errors.push(ValidationError::InvalidValue {
                field: "endpoint.url".to_string(),
                reason: e.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_form(form: &FormSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if form.mutation.is_empty() {
            errors.push(ValidationError::MissingField("form.mutation".to_string()));
        }

        if let Err(e) = Self::validate_args(&form.args) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_args(args: &[ArgEntry]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, arg) in args.iter().enumerate() {
            if arg.name.is_empty() {
                errors.push(ValidationError::MissingField(format!("form.args[{}].name", idx)));
                continue;
            }

            if let Some(prev_idx) = seen_names.insert(&arg.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Argument '{}' appears at indices {} and {}",
                    arg.name, prev_idx, idx
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_specifications(specs: &[SpecificationEntry]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_fields = HashMap::new();

        for (idx, spec) in specs.iter().enumerate() {
            if spec.field.is_empty() {
                errors.push(ValidationError::MissingField(format!("specifications[{}].field", idx)));
                continue;
            }

            if let Some(prev_idx) = seen_fields.insert(&spec.field, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Specification for '{}' appears at indices {} and {}",
                    spec.field, prev_idx, idx
                )));
            }

            if let (Some(min), Some(max)) = (spec.min, spec.max) {
                if min > max {
                    errors.push(ValidationError::InvalidValue {
                        field: format!("specifications[{}]", idx),
                        reason: format!("min ({}) is greater than max ({})", min, max),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_settings() -> Settings {
        Settings {
            endpoint: EndpointSettings {
                url: "http://localhost:4000/graphql".to_string(),
            },
            form: FormSettings {
                mutation: "AddUser".to_string(),
                header: None,
                submit_text: "Submit".to_string(),
                args: vec![ArgEntry {
                    name: "clientMutationId".to_string(),
                    value: json!("0000"),
                }],
            },
            specifications: vec![],
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(ConfigValidator::validate(&valid_settings()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let mut settings = valid_settings();
        settings.server.port = 0;

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_missing_mutation_and_bad_url() {
        let mut settings = valid_settings();
        settings.form.mutation = String::new();
        settings.endpoint.url = "not a url".to_string();

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::MissingField(f) if f == "form.mutation")));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidValue { field, .. } if field == "endpoint.url")));
    }

    #[test]
    fn test_range_bounds_and_duplicates() {
        let mut settings = valid_settings();
        settings.specifications = vec![
            SpecificationEntry {
                field: "age".to_string(),
                element: Some("range".to_string()),
                min: Some(100.0),
                max: Some(1.0),
                ..Default::default()
            },
            SpecificationEntry {
                field: "age".to_string(),
                ..Default::default()
            },
        ];

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Duplicate(_))));
        assert!(errors.iter().any(|e| matches!(e, ValidationError::InvalidValue { .. })));
    }

    #[test]
    fn test_duplicate_args() {
        let mut settings = valid_settings();
        settings.form.args.push(ArgEntry {
            name: "clientMutationId".to_string(),
            value: json!("1111"),
        });

        let errors = ConfigValidator::validate(&settings).unwrap_err();
        assert!(errors.iter().any(|e| matches!(e, ValidationError::Duplicate(_))));
    }
}
