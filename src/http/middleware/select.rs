//! Fragment selection middleware.
//!
//! The selector is either fixed when the layer is built or taken from the
//! request's `ic-select-from-response` query parameter.

use std::task::{Context, Poll};

use axum::{
    extract::Request,
    http::{self, HeaderValue},
    middleware::Next,
    response::Response,
};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::response::select_from_response;
use crate::intercooler::keys::SELECT_FROM_RESPONSE_PARAM;
use crate::params::ParameterBag;

fn requested_selector<B>(request: &http::Request<B>) -> Option<HeaderValue> {
    let query = request.uri().query()?;
    let bag = ParameterBag::parse(query);
    let selector = bag.get(SELECT_FROM_RESPONSE_PARAM)?.trim();
    if selector.is_empty() {
        return None;
    }
    HeaderValue::from_str(selector).ok()
}

fn apply<B>(response: http::Response<B>, selector: Option<HeaderValue>) -> http::Response<B> {
    match selector {
        Some(selector) => {
            tracing::debug!(selector = ?selector, "Selecting response fragment");
            select_from_response(response, selector)
        }
        None => response,
    }
}

/// Function-style middleware: `axum::middleware::from_fn(ic_select_from_response)`.
pub async fn ic_select_from_response(request: Request, next: Next) -> Response {
    let selector = requested_selector(&request);
    let response = next.run(request).await;
    apply(response, selector)
}

/// Layer annotating successful responses with a fragment selector.
#[derive(Debug, Clone, Default)]
pub struct SelectFromResponseLayer {
    selector: Option<HeaderValue>,
}

impl SelectFromResponseLayer {
    /// Always select `selector`.
    pub fn new(selector: HeaderValue) -> Self {
        Self {
            selector: Some(selector),
        }
    }

    /// Select whatever the request asks for, if anything.
    pub fn from_request() -> Self {
        Self::default()
    }
}

impl<S> Layer<S> for SelectFromResponseLayer {
    type Service = SelectFromResponse<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SelectFromResponse {
            inner,
            selector: self.selector.clone(),
        }
    }
}

/// Service produced by [`SelectFromResponseLayer`].
#[derive(Debug, Clone)]
pub struct SelectFromResponse<S> {
    inner: S,
    selector: Option<HeaderValue>,
}

impl<S, ReqBody, ResBody> Service<http::Request<ReqBody>> for SelectFromResponse<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>>,
    S::Future: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<ReqBody>) -> Self::Future {
        let selector = self.selector.clone().or_else(|| requested_selector(&request));
        let future = self.inner.call(request);
        Box::pin(async move { Ok(apply(future.await?, selector)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_requested_selector() {
        let request = http::Request::get("/form/?ic-select-from-response=%23example-form%3Afirst")
            .body(Body::empty())
            .unwrap();
        assert_eq!(requested_selector(&request).unwrap(), "#example-form:first");

        let blank = http::Request::get("/form/?ic-select-from-response=+")
            .body(Body::empty())
            .unwrap();
        assert!(requested_selector(&blank).is_none());

        let none = http::Request::get("/form/").body(Body::empty()).unwrap();
        assert!(requested_selector(&none).is_none());
    }
}
