//! intercooler.js request handling.
//!
//! # Data Flow
//! ```text
//! Incoming Request
//!     → admission.rs (choose query or form bag by method)
//!     → extract.rs (pop ic-* keys, keep _method)
//!     → data.rs (IntercoolerData: typed projections)
//!     → request.rs (Intercooler context in extensions, header signals)
//!     → handler (Intercooler extractor)
//! ```
//!
//! # Design Decisions
//! - Extraction happens once at admission; the result is immutable
//! - Missing parameters default, they never fail
//! - A malformed `ic-id` is the only error surfaced to callers

pub mod admission;
pub mod data;
pub mod extract;
pub mod keys;
pub mod request;

pub use admission::{admit, AdmissionConfig};
pub use data::{IntercoolerData, NameId, UrlMatch};
pub use extract::{extract, Extraction};
pub use keys::IcParam;
pub use request::{
    is_ajax, is_intercooler, maybe_intercooler, ChangedMethod, Intercooler, IntercoolerSignals,
};
