//! The per-request intercooler context.
//!
//! # Responsibilities
//! - Detect intercooler requests from headers
//! - Carry the extracted [`IntercoolerData`] alongside the request
//! - Expose both to handlers as an axum extractor
//!
//! # Design Decisions
//! - Both `X-IC-Request: true` and `X-Requested-With: XMLHttpRequest` are
//!   required for a confirmed intercooler request
//! - The context lives in request extensions; it is cheap to clone (`Arc`)

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};

use crate::intercooler::data::IntercoolerData;
use crate::intercooler::keys::{X_IC_REQUEST, X_REQUESTED_WITH};

/// Raw intercooler signal: `X-IC-Request` is exactly `"true"`.
pub fn maybe_intercooler(headers: &HeaderMap) -> bool {
    headers.get(X_IC_REQUEST).is_some_and(|v| v == "true")
}

/// The host's asynchronous-request signal.
pub fn is_ajax(headers: &HeaderMap) -> bool {
    headers
        .get(X_REQUESTED_WITH)
        .is_some_and(|v| v == "XMLHttpRequest")
}

/// Confirmed intercooler request: both signals present.
pub fn is_intercooler(headers: &HeaderMap) -> bool {
    IntercoolerSignals::from_headers(headers).is_intercooler()
}

/// Header signals sampled when the request was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IntercoolerSignals {
    raw: bool,
    ajax: bool,
}

impl IntercoolerSignals {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            raw: maybe_intercooler(headers),
            ajax: is_ajax(headers),
        }
    }

    pub fn maybe_intercooler(&self) -> bool {
        self.raw
    }

    pub fn is_ajax(&self) -> bool {
        self.ajax
    }

    pub fn is_intercooler(&self) -> bool {
        self.ajax && self.raw
    }
}

/// Set by an earlier layer that rewrote the request method
/// (e.g. method-override middleware). Absent means `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangedMethod(pub bool);

/// Intercooler context of an admitted request.
#[derive(Debug, Clone)]
pub struct Intercooler {
    signals: IntercoolerSignals,
    data: Arc<IntercoolerData>,
}

impl Intercooler {
    pub fn new(signals: IntercoolerSignals, data: IntercoolerData) -> Self {
        Self {
            signals,
            data: Arc::new(data),
        }
    }

    pub fn signals(&self) -> IntercoolerSignals {
        self.signals
    }

    pub fn maybe_intercooler(&self) -> bool {
        self.signals.maybe_intercooler()
    }

    pub fn is_intercooler(&self) -> bool {
        self.signals.is_intercooler()
    }

    pub fn data(&self) -> &Arc<IntercoolerData> {
        &self.data
    }
}

impl<S> FromRequestParts<S> for Intercooler
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Intercooler>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Intercooler data middleware not installed",
        ))
    }
}

impl<S> OptionalFromRequestParts<S> for Intercooler
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Intercooler>().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut builder = Request::builder();
        for (k, v) in pairs {
            builder = builder.header(*k, *v);
        }
        builder.body(Body::empty()).unwrap().headers().clone()
    }

    #[test]
    fn test_both_signals_required() {
        let both = headers(&[("X-IC-Request", "true"), ("X-Requested-With", "XMLHttpRequest")]);
        assert!(maybe_intercooler(&both));
        assert!(is_ajax(&both));
        assert!(is_intercooler(&both));

        let raw_only = headers(&[("X-IC-Request", "true")]);
        assert!(maybe_intercooler(&raw_only));
        assert!(!is_intercooler(&raw_only));

        let ajax_only = headers(&[("X-Requested-With", "XMLHttpRequest")]);
        assert!(!maybe_intercooler(&ajax_only));
        assert!(!is_intercooler(&ajax_only));
    }

    #[test]
    fn test_raw_signal_is_literal() {
        assert!(!maybe_intercooler(&headers(&[("X-IC-Request", "True")])));
        assert!(!maybe_intercooler(&headers(&[("X-IC-Request", "1")])));
        assert!(!maybe_intercooler(&HeaderMap::new()));
    }

    #[tokio::test]
    async fn test_extractor_requires_middleware() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();

        let rejection = <Intercooler as FromRequestParts<()>>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.0, StatusCode::INTERNAL_SERVER_ERROR);

        let optional =
            <Intercooler as OptionalFromRequestParts<()>>::from_request_parts(&mut parts, &())
                .await
                .unwrap();
        assert!(optional.is_none());
    }

    #[tokio::test]
    async fn test_extractor_reads_extension() {
        let (mut parts, _) = Request::new(Body::empty()).into_parts();
        let context = Intercooler::new(IntercoolerSignals::default(), IntercoolerData::default());
        parts.extensions.insert(context.clone());

        let extracted = <Intercooler as FromRequestParts<()>>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert!(Arc::ptr_eq(extracted.data(), context.data()));
        assert!(!extracted.is_intercooler());
    }
}
