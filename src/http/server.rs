//! Demo HTTP server.
//!
//! # Responsibilities
//! - Create an Axum Router exercising every intercooler middleware
//! - Wire up middleware (tracing, timeout, admission, redirect translation)
//! - Bind server to listener and shut down gracefully

use std::time::Duration;

use axum::{
    extract::Query,
    http::{header, HeaderName, StatusCode},
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::IntercoolerConfig;
use crate::http::middleware::{
    ic_push_url, ic_redirect, intercooler_data, PushUrlLayer, SelectFromResponseLayer,
};
use crate::intercooler::{AdmissionConfig, Intercooler};
use crate::lifecycle::Shutdown;
use crate::routing::PatternError;

/// HTTP server showing the intercooler layers at work.
pub struct DemoServer {
    router: Router,
    config: IntercoolerConfig,
}

impl DemoServer {
    /// Create a new server with the given configuration.
    pub fn new(config: IntercoolerConfig) -> Result<Self, PatternError> {
        let admission = AdmissionConfig::from_config(&config)?;
        let router = Self::build_router(&config, admission);
        Ok(Self { router, config })
    }

    /// The fully layered router, for serving or for driving in tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &IntercoolerConfig, admission: AdmissionConfig) -> Router {
        Router::new()
            .route("/", get(index))
            .route(
                "/form/",
                get(form).layer(SelectFromResponseLayer::from_request()),
            )
            .route("/redirect/", get(redirect))
            .route("/wheee/", get(|| async { "wheee" }))
            .route("/push/", get(push).layer(middleware::from_fn(ic_push_url)))
            .route(
                "/push/fixed/",
                get(push).layer(PushUrlLayer::to(header::HeaderValue::from_static("/pushed/"))),
            )
            .layer(middleware::from_fn(ic_redirect))
            .layer(middleware::from_fn_with_state(admission, intercooler_data))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: Shutdown,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.config.routes.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &IntercoolerConfig {
        &self.config
    }
}

async fn index(intercooler: Intercooler) -> Html<String> {
    Html(format!(
        "<p>intercooler: {}</p><p>{}</p>",
        intercooler.is_intercooler(),
        intercooler.data()
    ))
}

#[derive(Debug, Deserialize)]
struct FormParams {
    number: Option<String>,
}

/// A form accepting a number between 5 and 10.
async fn form(Query(params): Query<FormParams>) -> Html<String> {
    let error = match params.number.as_deref().map(str::parse::<i64>) {
        None | Some(Ok(5..=10)) => "",
        Some(Ok(_)) => "<p class=\"error\">Enter a number between 5 and 10.</p>",
        Some(Err(_)) => "<p class=\"error\">Enter a whole number.</p>",
    };
    let value = params.number.as_deref().unwrap_or_default();
    let value: String = value.chars().filter(char::is_ascii_alphanumeric).collect();
    Html(format!(
        "<form action=\"/form/\" method=\"get\" id=\"example-form\">{error}\
         <input type=\"number\" name=\"number\" value=\"{value}\"></form>"
    ))
}

async fn redirect() -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/wheee/"),
            (HeaderName::from_static("custom1"), "1"),
            (HeaderName::from_static("custom2"), "1"),
        ],
    )
}

async fn push() -> impl IntoResponse {
    (StatusCode::OK, "test")
}
