//! Analysis prompt construction.

use crate::models::AnalysisParams;

/// Build the analyst prompt for one chart image.
///
/// The image itself travels as a separate inline part; this text carries the
/// caller's parameters and pins the reply to a strict JSON object so the
/// parser's happy path works without scraping.
pub fn build_analysis_prompt(params: &AnalysisParams) -> String {
    let mut prompt = format!(
        "You are an experienced technical analyst. Analyze the attached {} chart \
         on the {} timeframe.",
        params.asset_type, params.timeframe
    );

    if let Some(notes) = params
        .additional_notes
        .as_deref()
        .filter(|n| !n.trim().is_empty())
    {
        prompt.push_str(&format!(" Trader's notes: {}.", notes.trim()));
    }

    prompt.push_str(&format!(
        " Respond with a single JSON object and nothing else, using exactly these keys: \
         \"direction\" (Bullish, Bearish, or Neutral), \
         \"rationale\" (the reasoning behind the verdict), \
         \"support\" (nearest support level), \
         \"resistance\" (nearest resistance level), \
         \"riskWarning\" (a risk disclaimer for this setup). \
         Write all values in {}.",
        params.output_language
    ));

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_parameters_and_schema_keys() {
        let params = AnalysisParams {
            asset_type: "BTC/USDT".to_string(),
            timeframe: "4h".to_string(),
            additional_notes: Some("volume spiking".to_string()),
            output_language: "Turkish".to_string(),
        };

        let prompt = build_analysis_prompt(&params);
        assert!(prompt.contains("BTC/USDT"));
        assert!(prompt.contains("4h"));
        assert!(prompt.contains("volume spiking"));
        assert!(prompt.contains("Turkish"));
        for key in ["direction", "rationale", "support", "resistance", "riskWarning"] {
            assert!(prompt.contains(key), "prompt missing key {}", key);
        }
    }

    #[test]
    fn omits_empty_notes() {
        let params = AnalysisParams {
            additional_notes: Some("   ".to_string()),
            ..AnalysisParams::default()
        };

        assert!(!build_analysis_prompt(&params).contains("Trader's notes"));
    }
}
