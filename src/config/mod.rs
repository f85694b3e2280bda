use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

pub mod validator;

use crate::cli::Cli;
use crate::domain::{ElementKind, SpecOption, Specification, Specifications, SuppliedArgs};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub endpoint: EndpointSettings,
    pub form: FormSettings,
    /// Per-field rendering overrides
    #[serde(default)]
    pub specifications: Vec<SpecificationEntry>,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointSettings {
    /// GraphQL endpoint the input types are introspected from
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSettings {
    /// Mutation whose `<mutation>Input` type drives the form
    pub mutation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(default = "default_submit_text")]
    pub submit_text: String,
    /// Values fixed by the caller; these fields never appear in the form
    #[serde(default)]
    pub args: Vec<ArgEntry>,
}

fn default_submit_text() -> String {
    "Submit".to_string()
}

/// One supplied argument.
///
/// Kept as a name/value pair because table keys are lower-cased on load and input field
/// names are camelCase.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArgEntry {
    pub name: String,
    pub value: Value,
}

/// Specification of one field as written in the configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SpecificationEntry {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SpecOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl SpecificationEntry {
    pub fn to_specification(&self) -> Specification {
        Specification {
            label: self.label.clone(),
            element: self.element.as_deref().map(ElementKind::from),
            options: self.options.clone(),
            min: self.min,
            max: self.max,
            src: self.src.clone(),
            render: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, then CLI and env overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Self::builder()?
            .add_source(File::from(cli.config.clone()).required(false))
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    /// Load `periqles.toml` (or any supported extension) from `root`
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("periqles");
        let s = Self::builder()?
            .add_source(File::from(config_path).required(false))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, anyhow::Error> {
        Ok(Config::builder()
            .set_default("endpoint.url", "http://127.0.0.1:4000/graphql")?
            .set_default("form.mutation", "")?
            .set_default("form.submit_text", "Submit")?
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint.url = endpoint.clone();
        }
        if let Some(mutation) = &cli.mutation {
            self.form.mutation = mutation.clone();
        }
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Supplied arguments keyed by field name
    pub fn supplied_args(&self) -> SuppliedArgs {
        self.form
            .args
            .iter()
            .map(|arg| (arg.name.clone(), arg.value.clone()))
            .collect()
    }

    /// Specifications keyed by field name; a later entry for the same field replaces an earlier one
    pub fn specifications(&self) -> Specifications {
        let mut specifications = Specifications::new();
        for entry in &self.specifications {
            specifications.insert(&entry.field, entry.to_specification());
        }
        specifications
    }
}
