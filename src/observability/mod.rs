//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! admission / redirect / push / select layers
//!     → tracing events (structured fields)
//!     → logging.rs subscriber (pretty or JSON to stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
