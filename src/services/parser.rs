//! Best-effort parsing of the model reply into a [`ChartAnalysis`].
//!
//! The provider is asked for strict JSON, but the reply is still free text as
//! far as this service is concerned. Parsing tries progressively looser
//! strategies and never fails: the last resort is a fixed placeholder record
//! carrying the raw reply in `rationale`.

use crate::models::ChartAnalysis;

/// Parse a model reply, falling back to a placeholder record on failure.
pub fn parse_analysis(raw: &str) -> ChartAnalysis {
    let trimmed = raw.trim();

    if let Some(analysis) = try_parse(trimmed) {
        return analysis;
    }

    // Replies wrapped in markdown fences or prose still usually contain one
    // JSON object; take the outermost braces and retry.
    if let Some(slice) = extract_json_object(trimmed) {
        if let Some(analysis) = try_parse(slice) {
            return analysis;
        }
    }

    fallback_analysis(raw)
}

/// The fixed record substituted when the reply cannot be parsed.
pub fn fallback_analysis(raw: &str) -> ChartAnalysis {
    ChartAnalysis {
        direction: "Neutral".to_string(),
        rationale: raw.trim().to_string(),
        support: "N/A".to_string(),
        resistance: "N/A".to_string(),
        risk_warning: "The analysis could not be structured automatically. \
                       Treat this output with caution and do your own research."
            .to_string(),
    }
}

fn try_parse(s: &str) -> Option<ChartAnalysis> {
    if let Ok(analysis) = serde_json::from_str::<ChartAnalysis>(s) {
        return Some(analysis);
    }

    // Some drafts of the upstream prompt produced { "analysis": { ... } }.
    serde_json::from_str::<serde_json::Value>(s)
        .ok()
        .and_then(|v| v.get("analysis").cloned())
        .and_then(|v| serde_json::from_value(v).ok())
}

fn extract_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (end > start).then(|| &s[start..=end])
}
