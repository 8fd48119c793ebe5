//! Image upload handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use brandkit_core::service::upload::ImageUploader;
use brandkit_types::media::{UploadRequest, UploadedAsset};

use crate::http::error::AppError;
use crate::http::extractors::ValidJson;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/upload - Persist a data-URI (or remote) image.
pub async fn upload_image(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<serde_json::Value>,
) -> Result<Json<ApiResponse<UploadedAsset>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let image = body
        .get("image")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("image is required".to_string()))?;
    let asset = state
        .uploader
        .upload(&UploadRequest {
            image: image.to_string(),
        })
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(asset, request_id, elapsed)))
}
