//! Request admission: extract intercooler data once, up front.
//!
//! # Responsibilities
//! - Pick the parameter bag by method (query for safe methods, urlencoded
//!   body for every other method, PUT/PATCH/DELETE included)
//! - Remove `ic-*` parameters and write the cleaned bag back to the request
//! - Attach the [`Intercooler`] context to request extensions
//!
//! # Design Decisions
//! - Admission is idempotent: an already admitted request passes through
//! - Non-form bodies are never read
//! - The request is only rebuilt when something was removed

use std::error::Error as StdError;
use std::sync::Arc;

use axum::body::{self, Body};
use axum::http::uri::PathAndQuery;
use axum::http::{header, HeaderMap, HeaderValue, Method, Request, Uri};
use http_body_util::LengthLimitError;

use crate::config::IntercoolerConfig;
use crate::error::IntercoolerError;
use crate::intercooler::extract::extract;
use crate::intercooler::keys::IcParam;
use crate::intercooler::request::{ChangedMethod, Intercooler, IntercoolerSignals};
use crate::params::ParameterBag;
use crate::routing::{NoRoutes, PatternError, Resolver, RouteTable};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Shared settings for request admission.
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    resolver: Arc<dyn Resolver>,
    max_form_bytes: usize,
}

impl AdmissionConfig {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            resolver,
            max_form_bytes: 1024 * 1024,
        }
    }

    /// Build from configuration, compiling the configured routes.
    pub fn from_config(config: &IntercoolerConfig) -> Result<Self, PatternError> {
        let table = RouteTable::from_config(&config.routes)?;
        Ok(Self::new(Arc::new(table)).with_max_form_bytes(config.admission.max_form_bytes))
    }

    pub fn with_max_form_bytes(mut self, limit: usize) -> Self {
        self.max_form_bytes = limit;
        self
    }

    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    pub fn max_form_bytes(&self) -> usize {
        self.max_form_bytes
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self::new(Arc::new(NoRoutes))
    }
}

/// Methods whose parameters come from the query string.
fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn with_query(uri: &Uri, query: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = if query.is_empty() {
        uri.path().to_string()
    } else {
        format!("{}?{}", uri.path(), query)
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

/// Map a failed body read, telling an exceeded limit apart from I/O failure.
fn form_read_error(error: axum::Error, limit: usize) -> IntercoolerError {
    let mut source: Option<&(dyn StdError + 'static)> = Some(&error);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return IntercoolerError::FormTooLarge { limit };
        }
        source = e.source();
    }
    IntercoolerError::Body(error)
}

/// Admit `request`, attaching its [`Intercooler`] context.
///
/// Returns the request unchanged if it was already admitted.
pub async fn admit(
    request: Request<Body>,
    config: &AdmissionConfig,
) -> Result<Request<Body>, IntercoolerError> {
    if request.extensions().get::<Intercooler>().is_some() {
        return Ok(request);
    }

    let (mut parts, body) = request.into_parts();
    let changed_method = parts
        .extensions
        .get::<ChangedMethod>()
        .is_some_and(|c| c.0);

    let (data, body) = if is_safe_method(&parts.method) {
        let bag = ParameterBag::parse(parts.uri.query().unwrap_or_default());
        let extraction = extract(bag, config.resolver(), changed_method);
        if extraction.removed > 0 {
            parts.uri = with_query(&parts.uri, &extraction.remaining.encode())?;
        }
        (extraction.data, body)
    } else if is_form(&parts.headers) {
        let bytes = body::to_bytes(body, config.max_form_bytes)
            .await
            .map_err(|e| form_read_error(e, config.max_form_bytes))?;
        let extraction = extract(ParameterBag::parse(&bytes), config.resolver(), changed_method);
        if extraction.removed > 0 {
            let encoded = extraction.remaining.encode();
            parts.headers.remove(header::TRANSFER_ENCODING);
            parts
                .headers
                .insert(header::CONTENT_LENGTH, HeaderValue::from(encoded.len()));
            (extraction.data, Body::from(encoded))
        } else {
            (extraction.data, Body::from(bytes))
        }
    } else {
        let extraction = extract(ParameterBag::new(), config.resolver(), changed_method);
        (extraction.data, body)
    };

    let signals = IntercoolerSignals::from_headers(&parts.headers);
    tracing::debug!(
        method = %parts.method,
        path = %parts.uri.path(),
        intercooler = signals.is_intercooler(),
        ic_id = ?data.get(IcParam::Id),
        "Admitted request"
    );
    parts.extensions.insert(Intercooler::new(signals, data));

    Ok(Request::from_parts(parts, body))
}
