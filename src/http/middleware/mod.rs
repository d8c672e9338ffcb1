//! Intercooler middleware in two call styles.
//!
//! - Function style, for `axum::middleware::from_fn`: [`intercooler_data`],
//!   [`ic_redirect`], [`ic_push_url`], [`ic_select_from_response`]
//! - Layer style, for any `tower::Service` (a handler, a nested router, a
//!   whole app): [`IcRedirectLayer`], [`PushUrlLayer`],
//!   [`SelectFromResponseLayer`]

pub mod intercooler_data;
pub mod push_url;
pub mod redirect;
pub mod select;

pub use intercooler_data::intercooler_data;
pub use push_url::{ic_push_url, PushUrl, PushUrlLayer};
pub use redirect::{ic_redirect, IcRedirect, IcRedirectLayer};
pub use select::{ic_select_from_response, SelectFromResponse, SelectFromResponseLayer};
