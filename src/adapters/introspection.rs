//! Schema introspection
//!
//! Looks up `<Mutation>Input` on the GraphQL endpoint and turns the answer into field
//! models. One request per call; nothing is cached and failed requests are not retried.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::field_model::generate_fields;
use crate::domain::{
    FieldModel, IntrospectionError, IntrospectionRequest, IntrospectionTransport,
    IntrospectionVariables, SuppliedArgs, TypeDescriptor,
};

/// Query sent for every lookup; `$inputType` is the input type name.
///
/// `enumValues` is requested on the field type and one level down so that both plain and
/// `NON_NULL`-wrapped enums carry their values.
pub const INTROSPECTION_QUERY: &str = r#"query typeQuery($inputType: String!) {
  __type(name: $inputType) {
    name
    inputFields {
      name
      type {
        name
        kind
        enumValues {
          name
          description
        }
        ofType {
          name
          kind
          enumValues {
            name
            description
          }
        }
      }
    }
  }
}"#;

/// Resolves a mutation's input type into field models through an [`IntrospectionTransport`]
#[derive(Clone)]
pub struct SchemaIntrospector {
    transport: Arc<dyn IntrospectionTransport>,
}

impl SchemaIntrospector {
    pub fn new(transport: Arc<dyn IntrospectionTransport>) -> Self {
        Self { transport }
    }

    /// Name of the input type introspected for `mutation`
    pub fn input_type_name(mutation: &str) -> String {
        format!("{mutation}Input")
    }

    /// Fetch and parse the descriptor of `mutation`'s input type
    pub async fn fetch_type(&self, mutation: &str) -> Result<TypeDescriptor, IntrospectionError> {
        let type_name = Self::input_type_name(mutation);
        let request = IntrospectionRequest {
            query: INTROSPECTION_QUERY,
            variables: IntrospectionVariables {
                input_type: type_name.clone(),
            },
        };

        debug!(input_type = %type_name, "Sending introspection query");
        let payload = self.transport.execute(&request).await?;
        parse_type_descriptor(&payload, &type_name)
    }

    /// Introspect `mutation` and build its field models, leaving out `supplied_args`
    pub async fn resolve(
        &self,
        mutation: &str,
        supplied_args: &SuppliedArgs,
    ) -> Result<Vec<FieldModel>, IntrospectionError> {
        let descriptor = self.fetch_type(mutation).await?;
        let fields = generate_fields(&descriptor, supplied_args);
        info!(
            mutation = %mutation,
            fields = fields.len(),
            "Introspected mutation input type"
        );
        Ok(fields)
    }

    /// Observer form of [`resolve`](Self::resolve).
    ///
    /// `on_fields_ready` runs once with the field models on success. On failure the error
    /// is logged and the observer is dropped without being called.
    pub async fn introspect<F>(&self, mutation: &str, on_fields_ready: F, supplied_args: &SuppliedArgs)
    where
        F: FnOnce(Vec<FieldModel>) + Send,
    {
        match self.resolve(mutation, supplied_args).await {
            Ok(fields) => on_fields_ready(fields),
            Err(e) => error!(mutation = %mutation, "ERROR at periqles: {}", e),
        }
    }
}

/// Extract `data.__type` from an introspection payload
pub fn parse_type_descriptor(payload: &Value, type_name: &str) -> Result<TypeDescriptor, IntrospectionError> {
    let data = match payload.get("data") {
        Some(data) if !data.is_null() => data,
        _ => {
            return Err(IntrospectionError::NoData {
                errors: graphql_errors(payload),
            })
        }
    };

    match data.get("__type") {
        Some(record) if !record.is_null() => Ok(TypeDescriptor::deserialize(record)?),
        _ => Err(IntrospectionError::MissingType {
            type_name: type_name.to_string(),
        }),
    }
}

/// Messages of the GraphQL `errors` array, if the payload has one
fn graphql_errors(payload: &Value) -> Vec<String> {
    payload
        .get("errors")
        .and_then(Value::as_array)
        .map(|errors| {
            errors
                .iter()
                .filter_map(|e| e.get("message").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ============================================================================
// HTTP transport
// ============================================================================

/// Posts introspection queries as JSON to a GraphQL endpoint
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, IntrospectionError> {
        let endpoint = reqwest::Url::parse(endpoint).map_err(|e| IntrospectionError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait]
impl IntrospectionTransport for HttpTransport {
    async fn execute(&self, request: &IntrospectionRequest) -> Result<Value, IntrospectionError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        // GraphQL servers answer bad queries with 400 and an `errors` body worth keeping
        match serde_json::from_slice::<Value>(&body) {
            Ok(payload) => Ok(payload),
            Err(_) if !status.is_success() => Err(IntrospectionError::Status {
                status: status.as_u16(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FieldType;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StubTransport {
        payload: Result<Value, String>,
        calls: AtomicUsize,
        last_type: Mutex<Option<String>>,
    }

    impl StubTransport {
        fn answering(payload: Value) -> Arc<Self> {
            Arc::new(Self {
                payload: Ok(payload),
                calls: AtomicUsize::new(0),
                last_type: Mutex::new(None),
            })
        }

        fn failing(reason: &str) -> Arc<Self> {
            Arc::new(Self {
                payload: Err(reason.to_string()),
                calls: AtomicUsize::new(0),
                last_type: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl IntrospectionTransport for StubTransport {
        async fn execute(&self, request: &IntrospectionRequest) -> Result<Value, IntrospectionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_type.lock().unwrap() = Some(request.variables.input_type.clone());
            self.payload.clone().map_err(IntrospectionError::Transport)
        }
    }

    fn add_user_payload() -> Value {
        json!({
            "data": {
                "__type": {
                    "name": "AddUserInput",
                    "inputFields": [
                        { "name": "email", "type": { "name": null, "kind": "NON_NULL", "ofType": { "name": "String", "kind": "SCALAR", "enumValues": null } } },
                        { "name": "age", "type": { "name": "Int", "kind": "SCALAR", "enumValues": null, "ofType": null } },
                        { "name": "clientMutationId", "type": { "name": "String", "kind": "SCALAR", "enumValues": null, "ofType": null } }
                    ]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_resolve_builds_fields() {
        let transport = StubTransport::answering(add_user_payload());
        let introspector = SchemaIntrospector::new(transport.clone());
        let mut args = SuppliedArgs::new();
        args.insert("clientMutationId".to_string(), json!("0000"));

        let fields = introspector.resolve("AddUser", &args).await.unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "email");
        assert!(fields[0].required);
        assert_eq!(fields[1].field_type, FieldType::Int);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert_eq!(transport.last_type.lock().unwrap().as_deref(), Some("AddUserInput"));
    }

    #[tokio::test]
    async fn test_introspect_invokes_observer_once() {
        let transport = StubTransport::answering(add_user_payload());
        let introspector = SchemaIntrospector::new(transport);
        let received = Mutex::new(Vec::new());

        introspector
            .introspect("AddUser", |fields| received.lock().unwrap().push(fields), &SuppliedArgs::new())
            .await;

        let received = received.into_inner().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].len(), 3);
    }

    #[tokio::test]
    async fn test_introspect_skips_observer_on_failure() {
        let cases = vec![
            StubTransport::failing("connection refused"),
            StubTransport::answering(json!({ "errors": [{ "message": "boom" }] })),
            StubTransport::answering(json!({ "data": { "__type": null } })),
        ];

        for transport in cases {
            let introspector = SchemaIntrospector::new(transport.clone());
            let mut called = false;
            introspector
                .introspect("AddUser", |_| called = true, &SuppliedArgs::new())
                .await;
            assert!(!called);
            assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_each_call_issues_a_new_request() {
        let transport = StubTransport::answering(add_user_payload());
        let introspector = SchemaIntrospector::new(transport.clone());

        introspector.resolve("AddUser", &SuppliedArgs::new()).await.unwrap();
        introspector.resolve("AddUser", &SuppliedArgs::new()).await.unwrap();

        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_parse_without_data_keeps_graphql_errors() {
        let payload = json!({ "data": null, "errors": [{ "message": "Unknown type \"NopeInput\"" }] });

        let err = parse_type_descriptor(&payload, "NopeInput").unwrap_err();
        match err {
            IntrospectionError::NoData { errors } => assert_eq!(errors, vec!["Unknown type \"NopeInput\""]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_without_type_record() {
        let err = parse_type_descriptor(&json!({ "data": {} }), "AddUserInput").unwrap_err();
        assert!(matches!(err, IntrospectionError::MissingType { type_name } if type_name == "AddUserInput"));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let payload = json!({ "data": { "__type": { "inputFields": [{ "name": 3 }] } } });
        let err = parse_type_descriptor(&payload, "AddUserInput").unwrap_err();
        assert!(matches!(err, IntrospectionError::Decode(_)));
    }

    #[test]
    fn test_http_transport_rejects_bad_endpoint() {
        let err = HttpTransport::new("not a url").unwrap_err();
        assert!(matches!(err, IntrospectionError::InvalidEndpoint { .. }));
        assert!(HttpTransport::new("http://localhost:4000/graphql").is_ok());
    }

    #[test]
    fn test_query_requests_enum_values_on_both_levels() {
        assert_eq!(INTROSPECTION_QUERY.matches("enumValues").count(), 2);
        assert!(INTROSPECTION_QUERY.contains("$inputType"));
    }
}
