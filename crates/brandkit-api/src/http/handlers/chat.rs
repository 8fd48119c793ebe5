//! Stateless collection-turn handlers.
//!
//! The caller carries the conversation: each request supplies the history
//! so far plus the new utterance, and gets back the reply and whether the
//! field was finalized. Nothing is stored server-side.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandkit_core::wizard::collect::{self, CollectedTurn};
use brandkit_types::brand::Transcript;
use brandkit_types::wizard::WizardEvent;

use crate::http::error::AppError;
use crate::http::extractors::ValidJson;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatTurnRequest {
    #[serde(default)]
    pub utterance: String,
    #[serde(default)]
    pub history: Transcript,
}

#[derive(Debug, Serialize)]
pub struct ChatTurnResponse {
    pub reply: String,
    pub finalized: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl From<CollectedTurn> for ChatTurnResponse {
    fn from(turn: CollectedTurn) -> Self {
        let value = match turn.event {
            WizardEvent::NameFinalized(v) | WizardEvent::DescriptionFinalized(v) => Some(v),
            WizardEvent::Unfinalized | WizardEvent::PipelineSettled => None,
        };
        Self {
            reply: turn.display,
            finalized: value.is_some(),
            value,
        }
    }
}

fn utterance(body: &ChatTurnRequest) -> Result<&str, AppError> {
    let utterance = body.utterance.trim();
    if utterance.is_empty() {
        return Err(AppError::Validation("utterance is required".to_string()));
    }
    Ok(utterance)
}

/// POST /api/v1/chat/brand-name
pub async fn brand_name(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ChatTurnRequest>,
) -> Result<Json<ApiResponse<ChatTurnResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let pipeline = state.wizard.pipeline();
    let turn = collect::brand_name_turn(
        pipeline.provider(),
        &pipeline.settings().completion,
        &body.history,
        utterance(&body)?,
    )
    .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(turn.into(), request_id, elapsed)))
}

/// POST /api/v1/chat/brand-description
pub async fn brand_description(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ChatTurnRequest>,
) -> Result<Json<ApiResponse<ChatTurnResponse>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let pipeline = state.wizard.pipeline();
    let turn = collect::brand_description_turn(
        pipeline.provider(),
        &pipeline.settings().completion,
        &body.history,
        utterance(&body)?,
    )
    .await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(turn.into(), request_id, elapsed)))
}
