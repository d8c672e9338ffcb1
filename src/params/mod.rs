//! Request parameter handling.
//!
//! # Data Flow
//! ```text
//! query string / urlencoded body
//!     → bag.rs (ParameterBag::parse, frozen)
//!     → thaw() → ParameterBagBuilder (pop/insert)
//!     → freeze() → ParameterBag (handed to downstream code)
//! ```
//!
//! # Design Decisions
//! - Bags are immutable; mutation only happens on an explicit builder
//! - Insertion order is preserved so re-encoding is stable
//! - `get` returns the last value for a key, matching form semantics

pub mod bag;

pub use bag::{ParameterBag, ParameterBagBuilder};
