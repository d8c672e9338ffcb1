//! Route lookup by path.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Resolve a path to its named route and captured parameters
//! - Return an explicit no-match rather than an error
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in configuration order, first match wins

use crate::config::RouteConfig;
use crate::routing::matcher::{PatternError, RoutePattern};

/// A successful route resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Name of the matched route.
    pub route_name: String,
    /// Captured path parameters, in pattern order.
    pub params: Vec<(String, String)>,
}

impl RouteMatch {
    /// Look up a captured parameter by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Resolves request paths to routes.
///
/// Resolution never fails loudly: an unknown path is simply `None`.
pub trait Resolver: Send + Sync + std::fmt::Debug {
    fn resolve(&self, path: &str) -> Option<RouteMatch>;
}

/// Resolver that knows no routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRoutes;

impl Resolver for NoRoutes {
    fn resolve(&self, _path: &str) -> Option<RouteMatch> {
        None
    }
}

/// Ordered table of named route patterns.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<(String, RoutePattern)>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the configured routes, keeping their order.
    pub fn from_config(routes: &[RouteConfig]) -> Result<Self, PatternError> {
        let mut table = Self::new();
        for route in routes {
            table = table.route(&route.name, &route.pattern)?;
        }
        Ok(table)
    }

    /// Add a route at the end of the table.
    pub fn route(mut self, name: &str, pattern: &str) -> Result<Self, PatternError> {
        self.routes.push((name.to_string(), RoutePattern::parse(pattern)?));
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Resolver for RouteTable {
    fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.routes.iter().find_map(|(name, pattern)| {
            pattern.matches(path).map(|params| RouteMatch {
                route_name: name.clone(),
                params,
            })
        })
    }
}
