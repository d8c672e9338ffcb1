//! Routing subsystem.
//!
//! Resolves the page URL an intercooler request was issued from
//! (`ic-current-url`) back to a named route.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → matcher.rs (compile patterns)
//!     → router.rs (freeze as immutable RouteTable)
//!
//! Resolution:
//!     path → RouteTable::resolve → RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path
//! - Deterministic: same input always matches same route
//! - First match wins (configuration order)

pub mod matcher;
pub mod router;

pub use matcher::{PatternError, RoutePattern};
pub use router::{NoRoutes, Resolver, RouteMatch, RouteTable};
