//! Application startup and lifecycle management.

use crate::config::ExtractionConfig;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiExtractor};
use crate::services::providers::DocumentExtractor;
use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::{cors_layer, preflight_no_content_middleware},
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use service_core::observability::init_metrics;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ExtractionConfig,
    /// `None` when no credential was configured; `/extract` then answers
    /// `CONFIG_ERROR`.
    pub extractor: Option<Arc<dyn DocumentExtractor>>,
}

/// Build the HTTP router with all middleware.
pub fn router(state: AppState) -> Router {
    let max_request_bytes = state.config.limits.max_request_bytes;
    let allowed_origins = state.config.security.allowed_origins.clone();

    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route(
            "/extract",
            post(handlers::extract_document)
                .options(handlers::extract_preflight)
                .layer(DefaultBodyLimit::max(max_request_bytes)),
        )
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(&allowed_origins))
        // Outermost, so CORS pre-flight replies are rewritten too.
        .layer(from_fn(preflight_no_content_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application, creating the Gemini client when a key is set.
    pub async fn build(config: ExtractionConfig) -> Result<Self, AppError> {
        let extractor: Option<Arc<dyn DocumentExtractor>> = match &config.gemini.api_key {
            Some(api_key) => {
                let gemini = GeminiExtractor::new(GeminiConfig {
                    api_key: api_key.clone(),
                    model: config.gemini.model.clone(),
                    api_base: config.gemini.api_base.clone(),
                    timeout: config.gemini.timeout,
                })
                .map_err(|e| {
                    tracing::error!("Failed to initialize Gemini client: {}", e);
                    AppError::ConfigError(anyhow::Error::new(e))
                })?;

                tracing::info!(model = %gemini.model(), "Initialized Gemini extractor");
                Some(Arc::new(gemini))
            }
            None => {
                tracing::warn!("GEMINI_API_KEY not set; /extract will answer CONFIG_ERROR");
                None
            }
        };

        Self::build_with_extractor(config, extractor).await
    }

    /// Build the application around a given extractor (or none).
    pub async fn build_with_extractor(
        config: ExtractionConfig,
        extractor: Option<Arc<dyn DocumentExtractor>>,
    ) -> Result<Self, AppError> {
        init_metrics();

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Extraction service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState { config, extractor },
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until SIGINT/SIGTERM, then drain in-flight requests.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
