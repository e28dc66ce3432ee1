use axum::{
    body::to_bytes,
    extract::Request,
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::response::ErrorResponse;

const MAX_ERROR_BODY_BYTES: usize = 16 * 1024;

/// Puts the JSON error envelope on failures produced outside the pipelines:
/// unmatched routes, disallowed methods and oversized bodies. Responses that
/// already carry JSON pass through untouched.
pub async fn json_error_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let allow = response.headers().get(header::ALLOW).cloned();
    let message = match status {
        StatusCode::NOT_FOUND => format!("no route for {method} {path}"),
        StatusCode::METHOD_NOT_ALLOWED => format!("{method} is not allowed on {path}"),
        _ => {
            let bytes = to_bytes(response.into_body(), MAX_ERROR_BODY_BYTES)
                .await
                .unwrap_or_default();
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        }
    };
    if status.is_server_error() {
        tracing::error!(status = status.as_u16(), error = %message, "request failed");
    }

    let mut rewritten = ErrorResponse::new(status, message).into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value: &HeaderValue| value.to_str().ok())
        .is_some_and(|value| {
            let value = value.to_ascii_lowercase();
            value.starts_with("application/json") || value.contains("+json")
        })
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::{self, Body},
        http::{Request, StatusCode, header},
        middleware,
        routing::get,
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::json_error_middleware;

    fn app() -> Router {
        Router::new()
            .route("/menus", get(|| async { "ok" }))
            .route(
                "/broken",
                get(|| async { (StatusCode::BAD_GATEWAY, "upstream closed") }),
            )
            .layer(middleware::from_fn(json_error_middleware))
    }

    async fn send(method: &str, uri: &str) -> (StatusCode, Option<String>, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let status = response.status();
        let allow = response
            .headers()
            .get(header::ALLOW)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, allow, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn unknown_routes_name_the_request() {
        let (status, _, body) = send("GET", "/payroll").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "status": 404, "message": "no route for GET /payroll", "data": null })
        );
    }

    #[tokio::test]
    async fn wrong_methods_keep_the_allow_header() {
        let (status, allow, body) = send("DELETE", "/menus").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert!(allow.is_some_and(|allow| allow.contains("GET")));
        assert_eq!(body["message"], json!("DELETE is not allowed on /menus"));
    }

    #[tokio::test]
    async fn plain_text_errors_keep_their_text() {
        let (status, _, body) = send("GET", "/broken").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], json!("upstream closed"));
    }
}
