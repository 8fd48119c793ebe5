//! Wizard session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                - Create a session, ask the opening question
//! - GET    /api/v1/sessions                - List sessions
//! - GET    /api/v1/sessions/{id}           - Full session state
//! - DELETE /api/v1/sessions/{id}           - Drop a session
//! - POST   /api/v1/sessions/{id}/turns     - Submit an utterance
//! - GET    /api/v1/sessions/{id}/snapshot  - Download the landing page (once done)
//!
//! A turn holds the session lock until it settles, including the pipeline
//! run, so concurrent turns on one session are serialized. Turns run on their
//! own task; a client that disconnects mid-turn does not cancel it.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brandkit_core::assets::snapshot::{SNAPSHOT_FILE_NAME, render_snapshot};
use brandkit_core::repository::session::{SessionHandle, SessionSummary, WizardSessionStore};
use brandkit_core::wizard::session::new_wizard_session;
use brandkit_types::wizard::{WizardSession, WizardTurn};

use crate::http::error::AppError;
use crate::http::extractors::ValidJson;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}

async fn session_handle(state: &AppState, id: &str) -> Result<SessionHandle, AppError> {
    let id = parse_uuid(id)?;
    state
        .sessions
        .get(&id)
        .await?
        .ok_or(AppError::SessionNotFound)
}

#[derive(Debug, Serialize)]
pub struct CreatedSession {
    pub id: Uuid,
    pub turn: WizardTurn,
}

#[derive(Debug, Deserialize)]
pub struct TurnRequest {
    #[serde(default)]
    pub utterance: String,
}

/// POST /api/v1/sessions - Start a wizard session.
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CreatedSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let mut session = new_wizard_session();
    let turn = state.wizard.opening_turn(&mut session);
    let id = session.id;
    state.sessions.insert(session).await?;
    tracing::info!(session_id = %id, "wizard session created");

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(CreatedSession { id, turn }, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("turns", &format!("/api/v1/sessions/{id}/turns"));

    Ok(Json(resp))
}

/// GET /api/v1/sessions - Sessions not currently mid-turn, newest first.
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SessionSummary>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sessions = state.sessions.list().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(
        ApiResponse::success(sessions, request_id, elapsed).with_link("self", "/api/v1/sessions"),
    ))
}

/// GET /api/v1/sessions/{id} - Step, draft, transcript and bundle.
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<WizardSession>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = session_handle(&state, &session_id).await?;
    let session = handle.lock().await.clone();

    let elapsed = start.elapsed().as_millis() as u64;
    let resp = ApiResponse::success(session, request_id, elapsed)
        .with_link("self", &format!("/api/v1/sessions/{session_id}"));

    Ok(Json(resp))
}

/// DELETE /api/v1/sessions/{id} - Drop a session.
pub async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let sid = parse_uuid(&session_id)?;
    if !state.sessions.remove(&sid).await? {
        return Err(AppError::SessionNotFound);
    }
    tracing::info!(session_id = %sid, "wizard session deleted");

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(
        serde_json::json!({ "deleted": true, "id": sid }),
        request_id,
        elapsed,
    )))
}

/// POST /api/v1/sessions/{id}/turns - Submit one utterance.
///
/// When the utterance finalizes the description, the pipeline runs before
/// the response is sent and the turn carries the bundle.
pub async fn submit_turn(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    ValidJson(body): ValidJson<TurnRequest>,
) -> Result<Json<ApiResponse<WizardTurn>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let handle = session_handle(&state, &session_id).await?;
    let session = handle.lock_owned().await;
    let turn = state
        .wizard
        .spawn_turn(session, body.utterance)
        .await
        .map_err(|e| AppError::Internal(format!("turn task failed: {e}")))??;

    let elapsed = start.elapsed().as_millis() as u64;
    let mut resp = ApiResponse::success(turn, request_id, elapsed)
        .with_link("session", &format!("/api/v1/sessions/{session_id}"));
    if resp.data.as_ref().is_some_and(|t| t.bundle.is_some()) {
        resp = resp.with_link("snapshot", &format!("/api/v1/sessions/{session_id}/snapshot"));
    }

    Ok(Json(resp))
}

/// GET /api/v1/sessions/{id}/snapshot - The rendered landing page as a download.
pub async fn download_snapshot(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let handle = session_handle(&state, &session_id).await?;
    let session = handle.lock().await;
    let Some(bundle) = session.bundle.as_ref() else {
        return Err(AppError::Conflict(format!(
            "session is in step {}; the snapshot is available once it is done",
            session.step
        )));
    };
    let html = render_snapshot(bundle);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SNAPSHOT_FILE_NAME}\""),
            ),
        ],
        html,
    )
        .into_response())
}
