//! Main site implementation
//!
//! The `Site` struct wires the workflow controller into an axum router and
//! runs the HTTP server, with the analyzer and image store injected.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use shared::{ProcessId, logging};
use std::net::SocketAddr;
use std::path::PathBuf;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::controller::WorkflowController;
use crate::core::Locale;
use crate::error::{SiteError, SiteResult};
use crate::traits::{AnalyzeOperation, ImageStore};
use crate::web::handlers;

pub struct Site<A, S>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    controller: WorkflowController<A, S>,
    bind_address: SocketAddr,
    static_dir: PathBuf,
    default_locale: Locale,
    max_upload_bytes: usize,
}

impl<A, S> Clone for Site<A, S>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    fn clone(&self) -> Self {
        Self {
            controller: self.controller.clone(),
            bind_address: self.bind_address,
            static_dir: self.static_dir.clone(),
            default_locale: self.default_locale,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

impl<A, S> Site<A, S>
where
    A: AnalyzeOperation + 'static,
    S: ImageStore + 'static,
{
    /// Create a site with the given analyzer and image store
    pub fn new(config: &SiteConfig, analyzer: A, store: S) -> Self {
        Self {
            controller: WorkflowController::new(config.selection_policy, analyzer, store),
            bind_address: config.bind_address,
            static_dir: config.static_dir.clone(),
            default_locale: config.default_locale,
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    pub fn controller(&self) -> &WorkflowController<A, S> {
        &self.controller
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn bind_address(&self) -> SocketAddr {
        self.bind_address
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Rendered page and its form intents
            .route("/", get(handlers::page::<A, S>))
            .route("/demo/image", post(handlers::select_image_form::<A, S>))
            .route("/demo/submit", post(handlers::submit_form::<A, S>))

            // JSON mirror of the same intents
            .route("/api/demo", get(handlers::demo_view::<A, S>))
            .route("/api/demo/image", post(handlers::select_image_raw::<A, S>))
            .route("/api/demo/submit", post(handlers::submit_api::<A, S>))

            // Image locators
            .route("/images/:id", get(handlers::serve_image::<A, S>))

            .route("/health", get(handlers::health::<A, S>))
            .nest_service("/static", ServeDir::new(&self.static_dir))
            .layer(DefaultBodyLimit::max(self.max_upload_bytes))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive()),
            )
            .with_state(self.clone())
    }

    /// Serve until Ctrl+C, then tear the workflow down
    pub async fn run(&self) -> SiteResult<()> {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(self.bind_address)
            .await
            .map_err(|e| SiteError::ServerStartup(format!("Failed to bind to {}: {}", self.bind_address, e)))?;

        shared::process_info!(ProcessId::current(), "🌐 Site listening on http://{}", self.bind_address);
        shared::process_info!(
            ProcessId::current(),
            "🔬 Demo analyzer: {}",
            self.controller.analyzer().name()
        );

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.controller.shutdown().await;
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
    }
}
