//! Shared helpers for the API integration tests: a test router mirroring
//! the production middleware stack, request/body helpers, and an
//! in-process mock of the tracking service's GraphQL endpoint.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderName, Request, StatusCode};
use axum::response::Response;
use axum::routing::post;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use runlens_api::config::ServerConfig;
use runlens_api::routes;
use runlens_api::state::AppState;
use runlens_tracker::TrackerClient;

/// The only API key the mock tracker accepts.
pub const VALID_KEY: &str = "valid-key-123";

/// Build a test `ServerConfig` pointing at the given tracker URL.
pub fn test_config(tracker_api_url: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        tracker_api_url: tracker_api_url.to_string(),
    }
}

/// Build the full application router with all middleware layers.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool, tracker_api_url: &str) -> Router {
    let config = test_config(tracker_api_url);
    let tracker = Arc::new(TrackerClient::new(tracker_api_url));

    let state = AppState {
        pool,
        config: Arc::new(config),
        tracker,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .merge(routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Issue a GET request against the app.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Issue a POST request with a JSON body against the app.
pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into a JSON value.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Mock tracking service
// ---------------------------------------------------------------------------

/// Start an in-process GraphQL mock of the tracking service.
///
/// Accepts [`VALID_KEY`] (basic auth `api:<key>`) and answers the four
/// queries the client issues; any other key gets HTTP 401. Returns the
/// base URL to point the [`TrackerClient`] at.
pub async fn spawn_mock_tracker() -> String {
    let router = Router::new().route("/graphql", post(mock_graphql));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock tracker");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}")
}

async fn mock_graphql(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let expected = format!("Basic {}", BASE64.encode(format!("api:{VALID_KEY}")));
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "user is not logged in"})),
        );
    }

    let query = body["query"].as_str().unwrap_or_default();

    let data = if query.contains("history(") {
        json!({
            "project": {
                "run": {
                    "id": "r1",
                    "name": "sunny-dawn-7",
                    "createdAt": "2024-05-01T12:00:00Z",
                    "state": "finished",
                    "history": [
                        r#"{"_internal": 1.0, "loss": 0.5, "label": "a"}"#,
                        r#"{"_internal": 2.0, "loss": null, "label": "b"}"#,
                        r#"{"_internal": 3.0, "loss": 0.3, "label": "c"}"#,
                    ],
                }
            }
        })
    } else if query.contains("runs(") {
        json!({
            "project": {
                "runs": {
                    "edges": [
                        {"node": {"id": "r1", "name": "sunny-dawn-7"}},
                        {"node": {"id": "r2", "name": "brisk-field-12"}},
                    ]
                }
            }
        })
    } else if query.contains("projects(") {
        json!({
            "viewer": {
                "username": "tester",
                "projects": {
                    "edges": [
                        {"node": {"id": "p1", "name": "alpha"}},
                        {"node": {"id": "p2", "name": "beta"}},
                    ]
                }
            }
        })
    } else {
        json!({"viewer": {"username": "tester"}})
    };

    (StatusCode::OK, Json(json!({"data": data})))
}
