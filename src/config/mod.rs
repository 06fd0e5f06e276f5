use crate::error::ApiError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

/// Maximum accepted chart image size (10MB). Larger uploads get a 400.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(flatten)]
    pub common: CommonConfig,
    pub google: GoogleConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// Gemini API key. May be empty: the contract is a 500 with a static
    /// message at request time, never a startup failure.
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Vision-capable model for chart analysis (e.g., gemini-2.0-flash).
    pub vision_model: String,
}

impl AnalysisConfig {
    pub fn load() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let common = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AnalysisConfig {
            common,
            google: GoogleConfig {
                api_key: env::var("GOOGLE_API_KEY").unwrap_or_default(),
            },
            models: ModelConfig {
                vision_model: get_env("CHART_VISION_MODEL", Some("gemini-2.0-flash"), is_prod)?,
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, ApiError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(ApiError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(ApiError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
