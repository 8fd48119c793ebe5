//! Property extraction handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use uuid::Uuid;

use brandkit_core::assets::copy::extract_property;
use brandkit_types::asset::PropertyExtraction;

use crate::http::error::AppError;
use crate::http::extractors::ValidJson;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub property: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// POST /api/v1/extract - Pull one named property out of free text.
pub async fn extract(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ExtractRequest>,
) -> Result<Json<ApiResponse<PropertyExtraction>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let pipeline = state.wizard.pipeline();
    let extraction = extract_property(
        pipeline.provider(),
        &pipeline.settings().completion,
        &body.text,
        &body.property,
        body.instructions.as_deref(),
    )
    .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(extraction, request_id, elapsed)))
}
