//! Request admission middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::intercooler::{admit, AdmissionConfig};

/// Admit every request before it reaches the handler.
///
/// Install with `axum::middleware::from_fn_with_state(config, intercooler_data)`.
/// Handlers then take an [`Intercooler`](crate::intercooler::Intercooler)
/// extractor and see query/form parameters without the `ic-*` keys.
pub async fn intercooler_data(
    State(config): State<AdmissionConfig>,
    request: Request,
    next: Next,
) -> Response {
    match admit(request, &config).await {
        Ok(request) => next.run(request).await,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected request during intercooler admission");
            e.into_response()
        }
    }
}
