#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use issue_board::api::{AppState, build_router};
use issue_board::config::ServerConfig;
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn init_test_logging() {
    issue_board::logging::init_test_logging();
}

/// A fresh router with its own empty store.
pub fn test_app() -> Router {
    init_test_logging();
    build_router(AppState::default(), &ServerConfig::default())
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn form_request(method: &str, uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Send a request, assert the 200 status, and return the JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> Value {
    let response = app.clone().oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    read_json(response).await
}

/// Create an issue with only the required fields.
pub async fn create_basic(
    app: &Router,
    project: &str,
    title: &str,
    text: &str,
    author: &str,
) -> Value {
    send(
        app,
        json_request(
            "POST",
            &format!("/api/issues/{project}"),
            json!({"issue_title": title, "issue_text": text, "created_by": author}),
        ),
    )
    .await
}
