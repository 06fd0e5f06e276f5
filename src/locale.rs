//! Localization of server-side failure messages.
//!
//! The analysis itself is produced in the language the caller asked for via
//! the `outputLanguage` form field; this module only covers the handful of
//! messages the server emits on its own, picked from the `Accept-Language`
//! request header. English is the fallback for anything unrecognized.

use axum::http::{header, HeaderMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    Turkish,
}

impl Language {
    /// Pick a language from the `Accept-Language` header's primary tag.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok())
            .map(Self::from_accept_language)
            .unwrap_or_default()
    }

    fn from_accept_language(value: &str) -> Self {
        // First entry wins; quality weights are ignored on purpose.
        let primary = value
            .split(',')
            .next()
            .unwrap_or("")
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if primary.starts_with("es") {
            Language::Spanish
        } else if primary.starts_with("tr") {
            Language::Turkish
        } else {
            Language::English
        }
    }

    pub fn missing_api_key(self) -> &'static str {
        match self {
            Language::English => "Server configuration error: the analysis API key is not set",
            Language::Spanish => {
                "Error de configuración del servidor: la clave de API de análisis no está definida"
            }
            Language::Turkish => {
                "Sunucu yapılandırma hatası: analiz API anahtarı tanımlı değil"
            }
        }
    }

    pub fn analysis_failed(self, detail: &str) -> String {
        match self {
            Language::English => format!("Chart analysis failed: {}", detail),
            Language::Spanish => format!("El análisis del gráfico falló: {}", detail),
            Language::Turkish => format!("Grafik analizi başarısız oldu: {}", detail),
        }
    }

    pub fn method_not_allowed(self) -> &'static str {
        match self {
            Language::English => "Method not allowed. Use POST with multipart/form-data.",
            Language::Spanish => "Método no permitido. Use POST con multipart/form-data.",
            Language::Turkish => "Yönteme izin verilmiyor. multipart/form-data ile POST kullanın.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_primary_tag() {
        assert_eq!(
            Language::from_accept_language("tr-TR,tr;q=0.9,en;q=0.8"),
            Language::Turkish
        );
        assert_eq!(Language::from_accept_language("es"), Language::Spanish);
        assert_eq!(Language::from_accept_language("en-US"), Language::English);
    }

    #[test]
    fn unknown_tags_fall_back_to_english() {
        assert_eq!(Language::from_accept_language("fr-FR"), Language::English);
        assert_eq!(Language::from_accept_language(""), Language::English);
    }
}
