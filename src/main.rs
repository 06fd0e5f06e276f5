use chart_analysis_service::config::AnalysisConfig;
use chart_analysis_service::observability::init_tracing;
use chart_analysis_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("info");

    let config = AnalysisConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    if config.google.api_key.is_empty() {
        // Not fatal: the contract is a 500 with a static message per request.
        tracing::warn!("GOOGLE_API_KEY is not set; analysis requests will fail");
    }

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
