use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

use super::form_assembler::FormAssembler;
use super::introspection::SchemaIntrospector;
use super::page::render_page;
use crate::domain::{ChangeHandler, FieldModel, FormState, FormStateSetter, SuppliedArgs};

/// Everything the preview routes need to introspect and render one mutation form
#[derive(Clone)]
pub struct PreviewState {
    pub introspector: SchemaIntrospector,
    pub assembler: FormAssembler,
    pub supplied_args: SuppliedArgs,
    pub endpoint: Option<String>,
}

pub type SharedPreviewState = Arc<PreviewState>;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub mutation: String,
}

/// `GET /`: introspect the mutation and serve its form.
///
/// Introspection runs on every request. When it fails the empty form is served with
/// `502 Bad Gateway`.
pub async fn form_page(State(state): State<SharedPreviewState>) -> Response {
    let mutation = state.assembler.mutation();
    let (status, fields) = match state.introspector.resolve(mutation, &state.supplied_args).await {
        Ok(fields) => (StatusCode::OK, fields),
        Err(e) => {
            error!(mutation = %mutation, "ERROR at periqles: {}", e);
            (StatusCode::BAD_GATEWAY, Vec::<FieldModel>::new())
        }
    };

    let form = state.assembler.assemble(
        &fields,
        &FormState::new(),
        &ChangeHandler::noop(),
        &FormStateSetter::noop(),
    );

    match render_page(&state.assembler.header(), &form, state.endpoint.as_deref()) {
        Ok(page) => (status, Html(page)).into_response(),
        Err(e) => {
            error!("Failed to render form page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render form page").into_response()
        }
    }
}

/// `GET /health`
pub async fn health(State(state): State<SharedPreviewState>) -> impl IntoResponse {
    let status = HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mutation: state.assembler.mutation().to_string(),
    };

    (StatusCode::OK, Json(status))
}
