//! Errors raised while admitting intercooler requests.

use std::num::ParseIntError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error type for request admission and intercooler data access.
#[derive(Debug, thiserror::Error)]
pub enum IntercoolerError {
    /// `ic-id` was present but not an integer. This points at a client bug,
    /// so it is surfaced instead of defaulted.
    #[error("invalid ic-id {value:?}: {source}")]
    InvalidId {
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The form body exceeded the configured limit.
    #[error("form body exceeds {limit} bytes")]
    FormTooLarge { limit: usize },

    /// The form body stream failed.
    #[error("failed to read request body: {0}")]
    Body(#[from] axum::Error),

    /// The cleaned request URI could not be rebuilt.
    #[error("failed to rebuild request: {0}")]
    Rebuild(#[from] axum::http::Error),
}

impl IntoResponse for IntercoolerError {
    fn into_response(self) -> Response {
        match self {
            IntercoolerError::InvalidId { .. } => {
                (StatusCode::BAD_REQUEST, "Invalid ic-id parameter").into_response()
            }
            IntercoolerError::FormTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "Form body too large").into_response()
            }
            IntercoolerError::Body(_) => {
                (StatusCode::BAD_REQUEST, "Unreadable request body").into_response()
            }
            IntercoolerError::Rebuild(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to rebuild request").into_response()
            }
        }
    }
}
