#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use canteen_api::{
    config::{AppConfig, DatabaseConfig},
    db::{Gateway, SeaGateway, connection},
    routes::app,
    state::AppState,
};

/// A gateway over a fresh SQLite file. Keep the directory alive for as long
/// as the gateway is used.
pub async fn sqlite_gateway() -> (SeaGateway, TempDir) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("canteen.sqlite").display()
    );
    let db = connection::connect(&DatabaseConfig::with_url(url))
        .await
        .expect("connect to sqlite");
    (SeaGateway::new(&db), dir)
}

pub fn app_with(gateway: Arc<dyn Gateway>) -> Router {
    app(AppState::new(AppConfig::default(), gateway))
}

pub async fn test_app() -> (Router, TempDir) {
    let (gateway, dir) = sqlite_gateway().await;
    (app_with(Arc::new(gateway)), dir)
}

pub async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|body| body.to_string()).unwrap_or_default();
    call_raw(app, method, uri, body).await
}

pub async fn call_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("build request");
    let response = app.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body is json")
    };
    (status, json)
}
