//! Speech handlers: synthesis to MPEG audio and transcription of an
//! uploaded clip.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandkit_core::service::speech::{SpeechRecognizer, SpeechSynthesizer};
use brandkit_types::media::{AudioClip, SpeechRequest};

use crate::http::error::AppError;
use crate::http::extractors::ValidJson;
use crate::http::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Base64-encoded audio.
    #[serde(default)]
    pub audio: String,
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "audio/webm".to_string()
}

#[derive(Debug, Serialize)]
pub struct Transcription {
    pub text: String,
}

/// POST /api/v1/speech - Synthesize the full text; the body is the audio.
pub async fn speak(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SpeakRequest>,
) -> Result<Response, AppError> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("text is required".to_string()));
    }

    let request = SpeechRequest {
        text: text.to_string(),
        voice: state.config.speech.voice(),
    };
    let clip = state.synthesizer.synthesize(&request).await?;

    Ok(([(header::CONTENT_TYPE, clip.mime_type)], clip.bytes).into_response())
}

/// POST /api/v1/speech/transcribe - Transcribe a base64 clip.
pub async fn transcribe(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<TranscribeRequest>,
) -> Result<Json<ApiResponse<Transcription>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    if body.audio.trim().is_empty() {
        return Err(AppError::Validation("audio is required".to_string()));
    }
    let bytes = STANDARD
        .decode(body.audio.trim())
        .map_err(|e| AppError::Validation(format!("audio is not valid base64: {e}")))?;
    let clip = AudioClip {
        bytes,
        mime_type: body.mime_type,
    };
    let text = state.recognizer.transcribe(&clip).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(Transcription { text }, request_id, elapsed)))
}
