mod common;

use common::graphql_stub::GraphqlStub;
use periqles::adapters::introspection::{HttpTransport, SchemaIntrospector};
use periqles::domain::{FieldType, IntrospectionError, SuppliedArgs};
use serde_json::json;
use std::sync::Arc;

fn introspector(url: &str) -> SchemaIntrospector {
    SchemaIntrospector::new(Arc::new(HttpTransport::new(url).unwrap()))
}

#[tokio::test]
async fn test_resolve_over_http() {
    let stub = GraphqlStub::new().await;
    let mut args = SuppliedArgs::new();
    args.insert("clientMutationId".to_string(), json!("0000"));

    let fields = introspector(&stub.url("/graphql"))
        .resolve("AddUser", &args)
        .await
        .unwrap();

    let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["username", "password", "email", "gender", "pizzaTopping", "age", "address"]
    );

    let gender = &fields[3];
    assert_eq!(gender.field_type, FieldType::Enum);
    assert!(gender.required);
    assert_eq!(gender.options.as_ref().map(Vec::len), Some(3));

    let address = &fields[6];
    assert_eq!(address.field_type, FieldType::String);
    assert!(!address.required);
    assert_eq!(stub.request_count(), 1);
}

#[tokio::test]
async fn test_observer_not_called_without_type_record() {
    let stub = GraphqlStub::new().await;
    let mut called = false;

    introspector(&stub.url("/graphql"))
        .introspect("Ghost", |_| called = true, &SuppliedArgs::new())
        .await;

    assert!(!called);
    assert_eq!(stub.request_count(), 1);
}

#[tokio::test]
async fn test_unknown_type_reports_graphql_errors() {
    let stub = GraphqlStub::new().await;

    let err = introspector(&stub.url("/graphql"))
        .resolve("Nope", &SuppliedArgs::new())
        .await
        .unwrap_err();

    match err {
        IntrospectionError::NoData { errors } => assert_eq!(errors, vec!["Unknown type"]),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_body_on_bad_request_is_kept() {
    let stub = GraphqlStub::new().await;

    let err = introspector(&stub.url("/graphql"))
        .resolve("Invalid", &SuppliedArgs::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IntrospectionError::NoData { ref errors } if errors.len() == 1));
    assert!(err.to_string().contains("got invalid value"));
}

#[tokio::test]
async fn test_non_json_failure_reports_status() {
    let stub = GraphqlStub::new().await;

    let err = introspector(&stub.url("/broken"))
        .resolve("AddUser", &SuppliedArgs::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IntrospectionError::Status { status: 500 }));
}

#[tokio::test]
async fn test_non_json_success_is_a_decode_error() {
    let stub = GraphqlStub::new().await;

    let err = introspector(&stub.url("/garbage"))
        .resolve("AddUser", &SuppliedArgs::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IntrospectionError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = introspector(&format!("http://{}/graphql", addr))
        .resolve("AddUser", &SuppliedArgs::new())
        .await
        .unwrap_err();

    assert!(matches!(err, IntrospectionError::Transport(_)));
}
