//! Asset generation handlers: the whole pipeline or a single branch.
//!
//! Single-branch endpoints surface the branch error directly; the bundle
//! endpoint never fails once the brief is valid.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandkit_core::assets::copy;
use brandkit_types::asset::{AiImages, AssetBundle, BrandProfile, HighlightSections, LandingCopy, SearchedImages};
use brandkit_types::brand::BrandBrief;
use brandkit_types::error::PipelineError;

use crate::http::error::AppError;
use crate::http::extractors::ValidJson;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefRequest {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub brand_description: String,
}

impl BriefRequest {
    fn brief(&self) -> Result<BrandBrief, PipelineError> {
        BrandBrief::new(self.brand_name.as_str(), self.brand_description.as_str())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingCopyRequest {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub audience: String,
}

#[derive(Debug, Serialize)]
pub struct PlanTitles {
    pub titles: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LogoUrl {
    pub url: String,
}

/// POST /api/v1/assets/bundle - Run every branch and merge the results.
pub async fn bundle(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<AssetBundle>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let brief = body.brief()?;
    let bundle = state.wizard.pipeline().run(&brief).await;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(bundle, request_id, elapsed)))
}

/// POST /api/v1/assets/profile
pub async fn profile(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<BrandProfile>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let profile = state.wizard.pipeline().brand_profile(&body.brief()?).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(profile, request_id, elapsed)))
}

/// POST /api/v1/assets/images/search
pub async fn search_images(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<SearchedImages>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let images = state.wizard.pipeline().search_images(&body.brief()?).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(images, request_id, elapsed)))
}

/// POST /api/v1/assets/highlights - Section copy, with image slots filled
/// when the search succeeds.
pub async fn highlights(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<HighlightSections>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sections = state
        .wizard
        .pipeline()
        .highlight_sections_with_images(&body.brief()?)
        .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(sections, request_id, elapsed)))
}

/// POST /api/v1/assets/plans
pub async fn plans(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<PlanTitles>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let titles = state.wizard.pipeline().subscription_titles(&body.brief()?).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(PlanTitles { titles }, request_id, elapsed)))
}

/// POST /api/v1/assets/images/generate
pub async fn generate_images(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<AiImages>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let images = state.wizard.pipeline().ai_images(&body.brief()?).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(images, request_id, elapsed)))
}

/// POST /api/v1/assets/logo
pub async fn logo(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BriefRequest>,
) -> Result<Json<ApiResponse<LogoUrl>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let url = state.wizard.pipeline().logo_url(&body.brief()?).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(LogoUrl { url }, request_id, elapsed)))
}

/// POST /api/v1/assets/landing-copy
pub async fn landing_copy(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LandingCopyRequest>,
) -> Result<Json<ApiResponse<LandingCopy>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let pipeline = state.wizard.pipeline();
    let copy = copy::landing_copy(
        pipeline.provider(),
        &pipeline.settings().completion,
        &body.brand_name,
        &body.description,
        &body.keywords,
        &body.audience,
    )
    .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(copy, request_id, elapsed)))
}
