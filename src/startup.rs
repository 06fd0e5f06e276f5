//! Application startup and lifecycle management.

use crate::config::{AnalysisConfig, MAX_IMAGE_BYTES};
use crate::error::ApiError;
use crate::handlers;
use crate::services::providers::gemini::{GeminiConfig, GeminiVisionProvider};
use crate::services::providers::VisionProvider;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AnalysisConfig,
    pub provider: Arc<dyn VisionProvider>,
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application against the real Gemini provider.
    pub async fn build(config: AnalysisConfig) -> Result<Self, ApiError> {
        let provider: Arc<dyn VisionProvider> = Arc::new(GeminiVisionProvider::new(GeminiConfig {
            api_key: config.google.api_key.clone(),
            model: config.models.vision_model.clone(),
        }));

        tracing::info!(
            model = %config.models.vision_model,
            "Initialized Gemini vision provider"
        );

        Self::build_with_provider(config, provider).await
    }

    /// Build the application with an injected provider (used by tests).
    pub async fn build_with_provider(
        config: AnalysisConfig,
        provider: Arc<dyn VisionProvider>,
    ) -> Result<Self, ApiError> {
        let state = AppState {
            config: config.clone(),
            provider,
        };

        let app = Router::new()
            .route("/health", get(handlers::health_check))
            .route(
                "/analyze",
                post(handlers::analyze_chart).fallback(handlers::method_not_allowed),
            )
            // Room for the multipart envelope around the image cap
            .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES + 64 * 1024))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        // Port 0 = random port, used by tests
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            ApiError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
