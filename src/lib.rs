//! # periqles - schema-driven mutation forms
//!
//! periqles introspects a GraphQL mutation's input type at runtime and turns it into a
//! form: one element per input field, rendered from a developer specification when there
//! is one and from built-in defaults otherwise.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use periqles::adapters::introspection::{HttpTransport, SchemaIntrospector};
//! use periqles::domain::SuppliedArgs;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let transport = HttpTransport::new("http://localhost:4000/graphql")?;
//!     let introspector = SchemaIntrospector::new(Arc::new(transport));
//!
//!     let fields = introspector.resolve("AddUser", &SuppliedArgs::new()).await?;
//!     println!("{}", serde_json::to_string_pretty(&fields)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: type descriptors, field models, specifications, element trees, the
//!   introspection port
//! - **Adapters**: field model generation, introspection over HTTP, element generators,
//!   form assembly, HTML pages and the preview server handlers
//! - **Config**: configuration loading and validation

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::preview_handler::{self, SharedPreviewState};
use axum::{routing::get, Router};

/// Creates the preview router.
///
/// `GET /` serves the form of the configured mutation and `GET /health` reports status.
pub fn create_app(state: SharedPreviewState) -> Router {
    Router::new()
        .route("/", get(preview_handler::form_page))
        .route("/health", get(preview_handler::health))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
