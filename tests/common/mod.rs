//! Shared utilities for integration tests.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{request, Request, Response};

/// A request carrying both intercooler signals.
pub fn ic_request(uri: &str) -> request::Builder {
    Request::get(uri)
        .header("X-IC-Request", "true")
        .header("X-Requested-With", "XMLHttpRequest")
}

/// A GET request with no intercooler signals.
pub fn plain_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Read a response body as UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
