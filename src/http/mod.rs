//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! Request
//!     → middleware/intercooler_data.rs (admit, attach Intercooler context)
//!     → handler (optionally wrapped by push/select layers)
//!     → response.rs (rewrite headers for the intercooler client)
//!     → middleware/redirect.rs (3xx → X-IC-Redirect for intercooler requests)
//!     → Send to client
//! ```

pub mod middleware;
pub mod response;
pub mod server;

pub use response::{push_url, select_from_response, translate_redirect};
pub use server::DemoServer;
