use serde::{Deserialize, Serialize};

/// Structured verdict extracted from the model's reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartAnalysis {
    /// Expected market direction (e.g., "Bullish", "Bearish", "Neutral").
    pub direction: String,
    /// Reasoning behind the verdict.
    pub rationale: String,
    /// Nearest support level read from the chart.
    pub support: String,
    /// Nearest resistance level read from the chart.
    pub resistance: String,
    /// Risk disclaimer tailored to the setup.
    pub risk_warning: String,
}

/// Success response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: ChartAnalysis,
}

/// The uploaded chart image, validated to be an image MIME type.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Text parameters accompanying the upload. All optional on the wire;
/// defaults keep the prompt well-formed.
#[derive(Debug, Clone)]
pub struct AnalysisParams {
    pub asset_type: String,
    pub timeframe: String,
    pub additional_notes: Option<String>,
    pub output_language: String,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            asset_type: "unspecified asset".to_string(),
            timeframe: "unspecified timeframe".to_string(),
            additional_notes: None,
            output_language: "English".to_string(),
        }
    }
}
