//! Redirect translation middleware.
//!
//! Only confirmed intercooler requests are translated; everything else gets
//! the native redirect.

use std::task::{Context, Poll};

use axum::{
    extract::Request,
    http,
    middleware::Next,
    response::Response,
};
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::http::response::translate_redirect;
use crate::intercooler::{is_intercooler, Intercooler};

/// Whether `request` is a confirmed intercooler request. Prefers the context
/// attached at admission, falling back to the headers.
pub(crate) fn request_is_intercooler<B>(request: &http::Request<B>) -> bool {
    match request.extensions().get::<Intercooler>() {
        Some(context) => context.is_intercooler(),
        None => is_intercooler(request.headers()),
    }
}

/// Function-style middleware: `axum::middleware::from_fn(ic_redirect)`.
pub async fn ic_redirect(request: Request, next: Next) -> Response {
    let intercooler = request_is_intercooler(&request);
    let response = next.run(request).await;
    if intercooler {
        rewrite(response)
    } else {
        response
    }
}

fn rewrite<B: Default>(response: http::Response<B>) -> http::Response<B> {
    if response.status().is_redirection() {
        tracing::debug!(
            status = %response.status(),
            location = ?response.headers().get(http::header::LOCATION),
            "Translating redirect for intercooler request"
        );
    }
    translate_redirect(response)
}

/// Layer translating redirects for any wrapped service.
#[derive(Debug, Clone, Copy, Default)]
pub struct IcRedirectLayer;

impl IcRedirectLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for IcRedirectLayer {
    type Service = IcRedirect<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IcRedirect { inner }
    }
}

/// Service produced by [`IcRedirectLayer`].
#[derive(Debug, Clone)]
pub struct IcRedirect<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<http::Request<ReqBody>> for IcRedirect<S>
where
    S: Service<http::Request<ReqBody>, Response = http::Response<ResBody>>,
    S::Future: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: http::Request<ReqBody>) -> Self::Future {
        let intercooler = request_is_intercooler(&request);
        let future = self.inner.call(request);
        Box::pin(async move {
            let response = future.await?;
            Ok(if intercooler { rewrite(response) } else { response })
        })
    }
}
