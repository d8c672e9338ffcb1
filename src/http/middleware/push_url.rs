//! URL push middleware.

use std::task::{Context, Poll};

use axum::{
    extract::Request,
    http::{self, HeaderValue},
    middleware::Next,
    response::Response,
};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::response::push_url;

fn request_path<B>(request: &http::Request<B>) -> Option<HeaderValue> {
    HeaderValue::from_str(request.uri().path()).ok()
}

fn apply<B>(response: http::Response<B>, url: Option<HeaderValue>) -> http::Response<B> {
    match url {
        Some(url) => {
            tracing::debug!(url = ?url, "Pushing URL for intercooler client");
            push_url(response, url)
        }
        None => response,
    }
}

/// Function-style middleware pushing the request path:
/// `axum::middleware::from_fn(ic_push_url)`.
pub async fn ic_push_url(request: Request, next: Next) -> Response {
    let url = request_path(&request);
    let response = next.run(request).await;
    apply(response, url)
}

/// Layer pushing either the request path or a fixed URL.
#[derive(Debug, Clone, Default)]
pub struct PushUrlLayer {
    url: Option<HeaderValue>,
}

impl PushUrlLayer {
    /// Push the path of each request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `url` regardless of the request.
    pub fn to(url: HeaderValue) -> Self {
        Self { url: Some(url) }
    }
}

impl<S> Layer<S> for PushUrlLayer {
    type Service = PushUrl<S>;

    fn layer(&self, inner: S) -> Self::Service {
        PushUrl {
            inner,
            url: self.url.clone(),
        }
    }
}

/// Service produced by [`PushUrlLayer`].
#[derive(Debug, Clone)]
pub struct PushUrl<S> {
    inner: S,
    url: Option<HeaderValue>,
}

impl<S, ReqBody, ResBody> Service<http::Request<ReqBody>> for PushUrl<S>
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
        let url = self.url.clone().or_else(|| request_path(&request));
        let future = self.inner.call(request);
        Box::pin(async move { Ok(apply(future.await?, url)) })
    }
}
