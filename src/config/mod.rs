//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → IntercoolerConfig (validated, immutable)
//!     → RouteTable / AdmissionConfig / DemoServer
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdmissionSettings, IntercoolerConfig, ListenerConfig, LogFormat, LoggingConfig, RouteConfig,
    TimeoutConfig,
};
pub use validation::ValidationError;
