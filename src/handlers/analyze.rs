use crate::config::MAX_IMAGE_BYTES;
use crate::error::ApiError;
use crate::locale::Language;
use crate::models::{AnalysisParams, AnalysisResponse, ChartImage};
use crate::services::parser::parse_analysis;
use crate::services::prompt::build_analysis_prompt;
use crate::services::providers::ProviderError;
use crate::startup::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

/// POST /analyze: multipart chart upload in, structured verdict out.
pub async fn analyze_chart(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let lang = Language::from_headers(&headers);
    let request_id = Uuid::new_v4();

    // A body that is not multipart/form-data must still produce the
    // { message } error shape, so the extractor rejection is mapped here
    // instead of letting axum answer with plain text.
    let multipart = multipart.map_err(|e| {
        ApiError::BadRequest(anyhow::anyhow!("Unreadable multipart body: {}", e.body_text()))
    })?;

    let (image, params) = parse_upload(multipart).await?;

    tracing::info!(
        request_id = %request_id,
        asset_type = %params.asset_type,
        timeframe = %params.timeframe,
        output_language = %params.output_language,
        image_bytes = image.bytes.len(),
        mime_type = %image.mime_type,
        "Chart analysis started"
    );

    let prompt = build_analysis_prompt(&params);

    let reply = state
        .provider
        .analyze_chart(&prompt, &image)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Provider call failed");
            match e {
                ProviderError::NotConfigured(_) => ApiError::MissingApiKey(lang),
                other => ApiError::Upstream {
                    lang,
                    detail: other.to_string(),
                },
            }
        })?;

    let text = reply
        .text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::Upstream {
            lang,
            detail: "empty reply from model".to_string(),
        })?;

    tracing::info!(
        request_id = %request_id,
        input_tokens = reply.input_tokens,
        output_tokens = reply.output_tokens,
        finish_reason = ?reply.finish_reason,
        "Chart analysis completed"
    );

    let analysis = parse_analysis(&text);

    Ok(Json(AnalysisResponse { analysis }))
}

/// Read the multipart body into the image plus text parameters.
///
/// Unknown fields are ignored. The `image` part is required and must carry
/// an `image/*` content type.
async fn parse_upload(
    mut multipart: Multipart,
) -> Result<(ChartImage, AnalysisParams), ApiError> {
    let mut image: Option<ChartImage> = None;
    let mut params = AnalysisParams::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "image" => {
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                if !mime_type.starts_with("image/") {
                    return Err(ApiError::BadRequest(anyhow::anyhow!(
                        "The image field must contain an image, got {}",
                        mime_type
                    )));
                }

                let data = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(anyhow::anyhow!("Failed to read image bytes: {}", e))
                })?;

                if data.len() > MAX_IMAGE_BYTES {
                    return Err(ApiError::BadRequest(anyhow::anyhow!(
                        "Image too large (max {} bytes)",
                        MAX_IMAGE_BYTES
                    )));
                }

                image = Some(ChartImage {
                    mime_type,
                    bytes: data.to_vec(),
                });
            }
            "assetType" => {
                let value = read_text(field).await?;
                if !value.trim().is_empty() {
                    params.asset_type = value;
                }
            }
            "timeframe" => {
                let value = read_text(field).await?;
                if !value.trim().is_empty() {
                    params.timeframe = value;
                }
            }
            "additionalNotes" => params.additional_notes = Some(read_text(field).await?),
            "outputLanguage" => {
                let lang = read_text(field).await?;
                if !lang.trim().is_empty() {
                    params.output_language = lang;
                }
            }
            _ => {}
        }
    }

    let image = image.ok_or_else(|| {
        ApiError::BadRequest(anyhow::anyhow!("An image file is required in the image field"))
    })?;

    Ok((image, params))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(anyhow::anyhow!("Failed to read form field: {}", e)))
}
