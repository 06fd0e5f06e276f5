//! Integration tests for the health endpoint.

use chart_analysis_service::config::{AnalysisConfig, CommonConfig, GoogleConfig, ModelConfig};
use chart_analysis_service::services::providers::mock::MockVisionProvider;
use chart_analysis_service::services::providers::VisionProvider;
use chart_analysis_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        common: CommonConfig { port: 0 },
        google: GoogleConfig {
            api_key: "test-api-key".to_string(),
        },
        models: ModelConfig {
            vision_model: "gemini-2.0-flash".to_string(),
        },
    }
}

async fn spawn_app(provider: Arc<dyn VisionProvider>) -> u16 {
    let app = Application::build_with_provider(test_config(), provider)
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

#[tokio::test]
async fn health_check_returns_ok() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply("ok"))).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "chart-analysis-service");
}

#[tokio::test]
async fn health_check_reports_unhealthy_provider() {
    let port = spawn_app(Arc::new(MockVisionProvider::disabled())).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 503);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "unhealthy");
}
