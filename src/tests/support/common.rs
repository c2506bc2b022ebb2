// Common test utilities for scenario tests.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use crate::route::RouteInfo;

/// Sends one in-process request and returns status and body text.
pub async fn call(router: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let (status, _, body) = call_full(router, method, uri).await;
    (status, body)
}

/// Like [`call`], also returning the content type.
pub async fn call_full(router: &Router, method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request");
    let response = router.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, content_type, String::from_utf8_lossy(&bytes).into_owned())
}

/// GET returning parsed JSON.
pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = call(router, Method::GET, uri).await;
    let value = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    (status, value)
}

/// Sorted paths of the routes answering `method`.
pub fn paths_for(routes: &[RouteInfo], method: &str) -> Vec<String> {
    let mut paths: Vec<String> = routes
        .iter()
        .filter(|route| route.methods.iter().any(|m| m == method))
        .map(|route| route.path.clone())
        .collect();
    paths.sort();
    paths
}

/// Asserts that a result is Ok.
pub fn assert_ok<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| panic!("unexpected error: {}", e))
}
