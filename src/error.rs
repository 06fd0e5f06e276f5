use crate::locale::Language;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Service error type. Every variant maps to the wire contract's
/// `{ "message": "..." }` error body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Method not allowed")]
    MethodNotAllowed(Language),

    #[error("Missing API credential")]
    MissingApiKey(Language),

    #[error("Upstream failure: {detail}")]
    Upstream { lang: Language, detail: String },

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::InternalError(anyhow::Error::new(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
        }

        let (status, message) = match self {
            ApiError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::MethodNotAllowed(lang) => (
                StatusCode::METHOD_NOT_ALLOWED,
                lang.method_not_allowed().to_string(),
            ),
            ApiError::MissingApiKey(lang) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                lang.missing_api_key().to_string(),
            ),
            ApiError::Upstream { lang, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                lang.analysis_failed(&detail),
            ),
            ApiError::ConfigError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", err),
            ),
            ApiError::InternalError(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal server error: {}", err),
            ),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
