//! Response rewriting for intercooler.js clients.
//!
//! # Responsibilities
//! - Translate 3xx redirects into `X-IC-Redirect` (the client follows them)
//! - Ask the client to push a URL into history (`X-IC-PushURL`)
//! - Ask the client to keep only a CSS-selected fragment
//!   (`X-IC-Select-From-Response`)
//!
//! # Design Decisions
//! - Pure functions over `http::Response<B>`, shared by every middleware style
//! - Redirect translation copies all headers except `Location`; the body is
//!   dropped
//! - Push/select only touch 2xx responses and replace any previous value

use axum::http::header::{self, HeaderName};
use axum::http::{HeaderValue, Response};

use crate::intercooler::keys::{X_IC_PUSH_URL, X_IC_REDIRECT, X_IC_SELECT_FROM_RESPONSE};

/// Replace a redirect with a 200 response carrying `X-IC-Redirect`.
///
/// Responses outside 300..=399, or without `Location`, are returned as is.
pub fn translate_redirect<B: Default>(response: Response<B>) -> Response<B> {
    if !response.status().is_redirection() {
        return response;
    }
    let Some(location) = response.headers().get(header::LOCATION).cloned() else {
        return response;
    };

    let mut translated = Response::new(B::default());
    let headers = translated.headers_mut();
    for (name, value) in response.headers() {
        if *name != header::LOCATION {
            headers.append(name.clone(), value.clone());
        }
    }
    headers.insert(X_IC_REDIRECT, location);
    translated
}

/// Set `X-IC-PushURL` on a successful response.
pub fn push_url<B>(response: Response<B>, url: HeaderValue) -> Response<B> {
    insert_on_success(response, X_IC_PUSH_URL, url)
}

/// Set `X-IC-Select-From-Response` on a successful response.
pub fn select_from_response<B>(response: Response<B>, selector: HeaderValue) -> Response<B> {
    insert_on_success(response, X_IC_SELECT_FROM_RESPONSE, selector)
}

fn insert_on_success<B>(
    mut response: Response<B>,
    name: HeaderName,
    value: HeaderValue,
) -> Response<B> {
    if response.status().is_success() {
        response.headers_mut().insert(name, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    fn redirect(status: StatusCode) -> Response<Body> {
        Response::builder()
            .status(status)
            .header("Location", "/wheee/")
            .header("Custom1", "1")
            .header("Custom2", "1")
            .header("Set-Cookie", "a=1")
            .header("Set-Cookie", "b=2")
            .body(Body::from("moved"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_redirect_translated() {
        let response = translate_redirect(redirect(StatusCode::FOUND));

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("Location").is_none());
        assert_eq!(response.headers()["X-IC-Redirect"], "/wheee/");
        assert_eq!(response.headers()["Custom1"], "1");
        assert_eq!(response.headers()["Custom2"], "1");
        let cookies: Vec<_> = response.headers().get_all("Set-Cookie").iter().collect();
        assert_eq!(cookies, ["a=1", "b=2"]);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_whole_redirect_range() {
        for status in [300, 301, 303, 307, 308, 399] {
            let status = StatusCode::from_u16(status).unwrap();
            let response = translate_redirect(redirect(status));
            assert_eq!(response.status(), StatusCode::OK, "{status}");
        }
    }

    #[test]
    fn test_redirect_without_location_untouched() {
        let response = Response::builder()
            .status(StatusCode::NOT_MODIFIED)
            .body(Body::empty())
            .unwrap();

        let response = translate_redirect(response);

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        assert!(response.headers().get("X-IC-Redirect").is_none());
    }

    #[test]
    fn test_non_redirect_untouched() {
        let response = Response::builder()
            .status(StatusCode::CREATED)
            .header("Location", "/items/1")
            .body(Body::empty())
            .unwrap();

        let response = translate_redirect(response);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()["Location"], "/items/1");
    }

    #[test]
    fn test_push_url_only_on_success() {
        let ok = push_url(Response::new(Body::empty()), HeaderValue::from_static("/"));
        assert_eq!(ok.headers()["X-IC-PushURL"], "/");

        let moved = push_url(redirect(StatusCode::FOUND), HeaderValue::from_static("/"));
        assert!(moved.headers().get("X-IC-PushURL").is_none());
    }

    #[test]
    fn test_select_is_idempotent() {
        let selector = HeaderValue::from_static("#example-form:first");
        let response = select_from_response(Response::new(Body::empty()), selector.clone());
        let response = select_from_response(response, selector);

        let values: Vec<_> = response
            .headers()
            .get_all("X-IC-Select-From-Response")
            .iter()
            .collect();
        assert_eq!(values, ["#example-form:first"]);
    }

    #[test]
    fn test_select_skips_errors() {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::BAD_REQUEST;

        let response = select_from_response(response, HeaderValue::from_static("#x"));

        assert!(response.headers().get("X-IC-Select-From-Response").is_none());
    }
}
