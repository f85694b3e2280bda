use axum::{http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// GraphQL endpoint answering introspection queries for a small user schema
pub struct GraphqlStub {
    pub addr: SocketAddr,
    pub base_url: String,
    requests: Arc<AtomicUsize>,
}

impl GraphqlStub {
    pub async fn new() -> Self {
        let requests = Arc::new(AtomicUsize::new(0));
        let counter = requests.clone();

        let app = Router::new()
            .route(
                "/graphql",
                post(move |Json(body): Json<Value>| {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        answer(&body)
                    }
                }),
            )
            .route(
                "/broken",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route("/garbage", post(|| async { "definitely not json" }));

        // Start server on random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        GraphqlStub {
            addr,
            base_url,
            requests,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn answer(body: &Value) -> (StatusCode, Json<Value>) {
    assert!(body["query"].as_str().unwrap_or_default().contains("__type"));

    match body["variables"]["inputType"].as_str() {
        Some("AddUserInput") => (StatusCode::OK, Json(json!({ "data": { "__type": add_user_input() } }))),
        Some("GhostInput") => (StatusCode::OK, Json(json!({ "data": { "__type": null } }))),
        Some("InvalidInput") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "errors": [{ "message": "Variable \"$inputType\" got invalid value" }] })),
        ),
        _ => (
            StatusCode::OK,
            Json(json!({ "data": null, "errors": [{ "message": "Unknown type" }] })),
        ),
    }
}

fn non_null(inner: Value) -> Value {
    json!({ "name": null, "kind": "NON_NULL", "enumValues": null, "ofType": inner })
}

fn scalar(name: &str) -> Value {
    json!({ "name": name, "kind": "SCALAR", "enumValues": null })
}

fn enumeration(name: &str, values: &[&str]) -> Value {
    let values: Vec<Value> = values
        .iter()
        .map(|v| json!({ "name": v, "description": null }))
        .collect();
    json!({ "name": name, "kind": "ENUM", "enumValues": values })
}

pub fn add_user_input() -> Value {
    json!({
        "name": "AddUserInput",
        "inputFields": [
            { "name": "username", "type": non_null(scalar("String")) },
            { "name": "password", "type": non_null(scalar("String")) },
            { "name": "email", "type": non_null(scalar("String")) },
            { "name": "gender", "type": non_null(enumeration("GenderEnum", &["NON_BINARY", "MALE", "FEMALE"])) },
            { "name": "pizzaTopping", "type": non_null(enumeration("PizzaToppingEnum", &[
                "BUFFALO_CHICKEN", "PEPPERONI", "MEATLOVERS", "EGGPLANT_PARM", "OLIVES", "HAWAIIAN"
            ])) },
            { "name": "age", "type": non_null(scalar("Int")) },
            { "name": "address", "type": { "name": "AddressInput", "kind": "INPUT_OBJECT", "enumValues": null, "ofType": null } },
            { "name": "clientMutationId", "type": { "name": "String", "kind": "SCALAR", "enumValues": null, "ofType": null } }
        ]
    })
}
