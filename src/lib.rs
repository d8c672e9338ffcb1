//! intercooler.js integration for axum / tower applications.
//!
//! - [`intercooler`]: admission of requests, extraction of the `ic-*`
//!   parameters into [`IntercoolerData`], the [`Intercooler`] extractor
//! - [`http`]: redirect translation, URL push and fragment selection, as
//!   `from_fn` middleware and as tower layers
//! - [`routing`]: resolution of `ic-current-url` to named routes

pub mod config;
pub mod error;
pub mod http;
pub mod intercooler;
pub mod lifecycle;
pub mod observability;
pub mod params;
pub mod routing;

pub use config::IntercoolerConfig;
pub use error::IntercoolerError;
pub use http::DemoServer;
pub use intercooler::{Intercooler, IntercoolerData};
pub use lifecycle::Shutdown;
