//! Redirect translation, URL push and fragment selection applied in every
//! supported call style: `from_fn` on a handler, a layer on a handler, a
//! layer on a whole router, and a layer on a bare service.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::Query,
    http::{header, HeaderValue, Request, Response, StatusCode},
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use intercooler_helpers::http::middleware::{
    ic_push_url, ic_redirect, ic_select_from_response, IcRedirectLayer, PushUrlLayer,
    SelectFromResponseLayer,
};
use serde::Deserialize;
use tower::{Layer, ServiceExt};

mod common;

async fn redirect_view() -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/wheee/"),
            (header::HeaderName::from_static("custom1"), "1"),
            (header::HeaderName::from_static("custom2"), "1"),
        ],
    )
}

fn redirect_apps() -> Vec<(&'static str, Router)> {
    vec![
        (
            "from_fn on handler",
            Router::new().route("/", get(redirect_view).layer(middleware::from_fn(ic_redirect))),
        ),
        (
            "layer on handler",
            Router::new().route("/", get(redirect_view).layer(IcRedirectLayer::new())),
        ),
        (
            "layer on router",
            Router::new()
                .route("/", get(redirect_view))
                .layer(IcRedirectLayer::new()),
        ),
        (
            "from_fn on router",
            Router::new()
                .route("/", get(redirect_view))
                .layer(middleware::from_fn(ic_redirect)),
        ),
    ]
}

#[tokio::test]
async fn test_redirect() {
    for (style, app) in redirect_apps() {
        let request = common::ic_request("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK, "{style}");
        assert!(response.headers().get(header::LOCATION).is_none(), "{style}");
        assert_eq!(response.headers()["X-IC-Redirect"], "/wheee/", "{style}");
        assert_eq!(response.headers()["Custom1"], "1", "{style}");
        assert_eq!(response.headers()["Custom2"], "1", "{style}");
    }
}

#[tokio::test]
async fn test_redirect_untouched_for_plain_requests() {
    for (style, app) in redirect_apps() {
        let response = app.oneshot(common::plain_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND, "{style}");
        assert_eq!(response.headers()[header::LOCATION], "/wheee/", "{style}");
        assert!(response.headers().get("X-IC-Redirect").is_none(), "{style}");
    }
}

#[tokio::test]
async fn test_redirect_needs_both_signals() {
    for (style, app) in redirect_apps() {
        let request = Request::get("/")
            .header("X-IC-Request", "true")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FOUND, "{style}");
    }
}

#[tokio::test]
async fn test_redirect_layer_on_bare_service() {
    let service = IcRedirectLayer::new().layer(tower::service_fn(|_: Request<Body>| async {
        Ok::<_, Infallible>(
            Response::builder()
                .status(StatusCode::MOVED_PERMANENTLY)
                .header(header::LOCATION, "https://example.com/next")
                .header(header::CACHE_CONTROL, "no-store")
                .body(Body::from("moved"))
                .unwrap(),
        )
    }));

    let request = common::ic_request("/").body(Body::empty()).unwrap();
    let response = service.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["X-IC-Redirect"], "https://example.com/next");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    assert!(common::body_string(response).await.is_empty());
}

// =============================================================================

async fn push_view() -> &'static str {
    "test"
}

#[tokio::test]
async fn test_push_url() {
    let apps = vec![
        (
            "from_fn on handler",
            Router::new().route("/", get(push_view).layer(middleware::from_fn(ic_push_url))),
        ),
        (
            "layer on handler",
            Router::new().route("/", get(push_view).layer(PushUrlLayer::new())),
        ),
        (
            "layer on router",
            Router::new().route("/", get(push_view)).layer(PushUrlLayer::new()),
        ),
    ];

    for (style, app) in apps {
        let request = common::ic_request("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["X-IC-PushURL"], "/", "{style}");
        assert_eq!(common::body_string(response).await, "test", "{style}");
    }
}

#[tokio::test]
async fn test_push_fixed_url() {
    let app = Router::new()
        .route("/items/{id}", get(push_view))
        .layer(PushUrlLayer::to(HeaderValue::from_static("/items/")));

    let response = app.oneshot(common::plain_request("/items/3?x=1")).await.unwrap();

    assert_eq!(response.headers()["X-IC-PushURL"], "/items/");
}

#[tokio::test]
async fn test_push_url_is_request_path() {
    let app = Router::new()
        .route("/items/{id}", get(push_view))
        .layer(middleware::from_fn(ic_push_url));

    let response = app.oneshot(common::plain_request("/items/3?x=1")).await.unwrap();

    assert_eq!(response.headers()["X-IC-PushURL"], "/items/3");
}

#[tokio::test]
async fn test_push_url_skips_redirects() {
    let app = Router::new()
        .route("/", get(redirect_view))
        .layer(PushUrlLayer::new());

    let response = app.oneshot(common::plain_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(response.headers().get("X-IC-PushURL").is_none());
}

// =============================================================================

#[derive(Deserialize)]
struct FormParams {
    number: Option<i64>,
}

async fn form_view(Query(params): Query<FormParams>) -> Html<String> {
    Html(format!(
        "<form action=\"/form/\" id=\"example-form\"><input name=\"number\" value=\"{}\"></form>",
        params.number.unwrap_or_default()
    ))
}

#[tokio::test]
async fn test_select_from_response() {
    let apps = vec![
        (
            "from_fn on handler",
            Router::new().route(
                "/form/",
                get(form_view).layer(middleware::from_fn(ic_select_from_response)),
            ),
        ),
        (
            "layer on handler",
            Router::new().route(
                "/form/",
                get(form_view).layer(SelectFromResponseLayer::from_request()),
            ),
        ),
        (
            "layer on router",
            Router::new()
                .route("/form/", get(form_view))
                .layer(SelectFromResponseLayer::from_request()),
        ),
    ];

    for (style, app) in apps {
        let request = common::ic_request("/form/?ic-select-from-response=%23example-form%3Afirst")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()["X-IC-Select-From-Response"],
            "#example-form:first",
            "{style}"
        );
        let body = common::body_string(response).await;
        assert!(body.starts_with("<form action=\"/form/\""), "{style}");
    }
}

#[tokio::test]
async fn test_select_fixed_selector() {
    let app = Router::new()
        .route("/form/", get(form_view))
        .layer(SelectFromResponseLayer::new(HeaderValue::from_static("#example-form")));

    let response = app.oneshot(common::plain_request("/form/")).await.unwrap();

    assert_eq!(response.headers()["X-IC-Select-From-Response"], "#example-form");
}

#[tokio::test]
async fn test_select_without_selector() {
    let app = Router::new()
        .route("/form/", get(form_view))
        .layer(middleware::from_fn(ic_select_from_response));

    let response = app.oneshot(common::plain_request("/form/")).await.unwrap();

    assert!(response.headers().get("X-IC-Select-From-Response").is_none());
    assert_eq!(response.status(), StatusCode::OK);
}
