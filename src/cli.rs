use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate input forms for GraphQL mutations by introspecting their input types
#[derive(Parser, Debug, Clone)]
#[command(name = "periqles", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, env = "PERIQLES_CONFIG", default_value = "periqles.toml")]
    pub config: PathBuf,

    /// GraphQL endpoint URL
    #[arg(long, global = true, env = "PERIQLES_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Mutation to build the form for (its input type is `<mutation>Input`)
    #[arg(short, long, global = true, env = "PERIQLES_MUTATION")]
    pub mutation: Option<String>,

    /// Preview server host address
    #[arg(long, env = "PERIQLES_HOST")]
    pub host: Option<String>,

    /// Preview server port
    #[arg(long, env = "PERIQLES_PORT")]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the field model of the mutation's input type as JSON
    Fields,
    /// Print the assembled form as an HTML document
    Render,
    /// Serve the form over HTTP, introspecting on every request
    Preview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["periqles", "fields"]);
        assert_eq!(cli.config, PathBuf::from("periqles.toml"));
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert_eq!(cli.command, Command::Fields);
    }

    #[test]
    fn test_cli_with_args() {
        let cli = Cli::parse_from([
            "periqles",
            "--config",
            "demo/periqles.toml",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "preview",
            "--mutation",
            "AddUser",
            "--endpoint",
            "http://localhost:4000/graphql",
        ]);
        assert_eq!(cli.config, PathBuf::from("demo/periqles.toml"));
        assert_eq!(cli.host, Some("0.0.0.0".to_string()));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.mutation, Some("AddUser".to_string()));
        assert_eq!(cli.endpoint, Some("http://localhost:4000/graphql".to_string()));
        assert_eq!(cli.command, Command::Preview);
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["periqles"]).is_err());
    }
}
