use extraction_service::config::ExtractionConfig;
use extraction_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = ExtractionConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "extraction-service",
        config.common.log_level(),
        config.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        port = config.common.port,
        debug = config.common.debug,
        gemini_configured = config.gemini_configured(),
        "Starting extraction service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await
}
