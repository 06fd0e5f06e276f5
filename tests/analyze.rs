//! Integration tests for the analyze endpoint.
//!
//! These spawn the service on a random port with a mock vision provider and
//! drive it over HTTP, so no external API access is needed.

use chart_analysis_service::config::{
    AnalysisConfig, CommonConfig, GoogleConfig, ModelConfig, MAX_IMAGE_BYTES,
};
use chart_analysis_service::services::providers::mock::MockVisionProvider;
use chart_analysis_service::services::providers::VisionProvider;
use chart_analysis_service::startup::Application;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const VALID_REPLY: &str = r#"{
    "direction": "Bearish",
    "rationale": "Lower highs into resistance with fading volume",
    "support": "1.0450",
    "resistance": "1.0720",
    "riskWarning": "A daily close above 1.0720 invalidates this setup"
}"#;

fn test_config(api_key: &str) -> AnalysisConfig {
    AnalysisConfig {
        common: CommonConfig { port: 0 },
        google: GoogleConfig {
            api_key: api_key.to_string(),
        },
        models: ModelConfig {
            vision_model: "gemini-2.0-flash".to_string(),
        },
    }
}

/// Spawn the application with the given provider and return the port.
async fn spawn_app(provider: Arc<dyn VisionProvider>) -> u16 {
    let app = Application::build_with_provider(test_config("test-api-key"), provider)
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

/// Spawn the application against the real Gemini provider (no API key set).
async fn spawn_app_without_api_key() -> u16 {
    let app = Application::build(test_config(""))
        .await
        .expect("Failed to build application");

    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;

    port
}

fn chart_form() -> Form {
    let image = Part::bytes(b"\x89PNG\r\n\x1a\nfake-chart-bytes".to_vec())
        .file_name("chart.png")
        .mime_str("image/png")
        .expect("valid mime");

    Form::new()
        .part("image", image)
        .text("assetType", "EUR/USD")
        .text("timeframe", "1d")
        .text("additionalNotes", "watching the ECB meeting")
        .text("outputLanguage", "English")
}

#[tokio::test]
async fn non_post_method_returns_405_with_message() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(VALID_REPLY))).await;
    let client = Client::new();

    let response = client
        .get(format!("http://localhost:{}/analyze", port))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 405);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"].as_str().unwrap().contains("POST"));
}

#[tokio::test]
async fn missing_image_field_returns_400() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(VALID_REPLY))).await;
    let client = Client::new();

    let form = Form::new().text("assetType", "EUR/USD");

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"].as_str().unwrap().contains("image"));
}

#[tokio::test]
async fn non_multipart_body_returns_400_with_message() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(VALID_REPLY))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .header("content-type", "application/json")
        .body(r#"{"assetType":"EUR/USD"}"#)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"].as_str().unwrap().contains("multipart"));
}

#[tokio::test]
async fn oversized_image_returns_400_with_message() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(VALID_REPLY))).await;
    let client = Client::new();

    // One byte over the cap; the multipart envelope stays inside the body
    // limit headroom, so this exercises the handler's own size check.
    let huge = Part::bytes(vec![0u8; MAX_IMAGE_BYTES + 1])
        .file_name("chart.png")
        .mime_str("image/png")
        .expect("valid mime");
    let form = Form::new().part("image", huge);

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"].as_str().unwrap().contains("too large"));
}

#[tokio::test]
async fn non_image_mime_type_returns_400() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(VALID_REPLY))).await;
    let client = Client::new();

    let not_an_image = Part::bytes(b"just,some,csv".to_vec())
        .file_name("chart.csv")
        .mime_str("text/csv")
        .expect("valid mime");
    let form = Form::new().part("image", not_an_image);

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .multipart(form)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn well_formed_request_returns_structured_analysis() {
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(VALID_REPLY))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .multipart(chart_form())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let analysis = &body["analysis"];
    assert_eq!(analysis["direction"], "Bearish");
    assert_eq!(
        analysis["rationale"],
        "Lower highs into resistance with fading volume"
    );
    assert_eq!(analysis["support"], "1.0450");
    assert_eq!(analysis["resistance"], "1.0720");
    assert_eq!(
        analysis["riskWarning"],
        "A daily close above 1.0720 invalidates this setup"
    );
}

#[tokio::test]
async fn unparseable_reply_returns_fallback_record() {
    let raw = "Honestly this chart is a coin flip.";
    let port = spawn_app(Arc::new(MockVisionProvider::with_reply(raw))).await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .multipart(chart_form())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let analysis = &body["analysis"];
    assert_eq!(analysis["direction"], "Neutral");
    assert_eq!(analysis["rationale"], raw);
    assert_eq!(analysis["support"], "N/A");
    assert_eq!(analysis["resistance"], "N/A");
    assert!(!analysis["riskWarning"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn missing_api_key_returns_500_with_static_message() {
    let port = spawn_app_without_api_key().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .multipart(chart_form())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(
        body["message"],
        "Server configuration error: the analysis API key is not set"
    );
}

#[tokio::test]
async fn error_message_is_localized_by_accept_language() {
    let port = spawn_app_without_api_key().await;
    let client = Client::new();

    let response = client
        .post(format!("http://localhost:{}/analyze", port))
        .header("Accept-Language", "tr-TR,tr;q=0.9")
        .multipart(chart_form())
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 500);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("API anahtarı tanımlı değil"));
}
