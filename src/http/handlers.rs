use super::state::AppState;
use crate::store::TranscriptionAttempt;
use crate::transcribe::TranscriptionOutcome;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TranscribeRequest {
    /// Originating device identifier
    pub device_id: String,

    /// Path/URI of the audio to recognize
    pub audio_ref: String,

    /// Optional recognition language (BCP-47); defaults to the
    /// configured service language
    pub language_hint: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub id: Uuid,
    pub device_id: String,
    pub outcome: TranscriptionOutcome,
}

#[derive(Debug, Deserialize)]
pub struct StatisticsParams {
    /// Trailing window in days (default: 7; 0 = trailing day)
    pub window_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /transcriptions
/// Run one recognition call and record its outcome
pub async fn submit_transcription(
    State(state): State<AppState>,
    Json(req): Json<TranscribeRequest>,
) -> impl IntoResponse {
    if req.device_id.trim().is_empty() {
        return bad_request("device_id must not be empty");
    }
    if req.audio_ref.trim().is_empty() {
        return bad_request("audio_ref must not be empty");
    }
    if matches!(&req.language_hint, Some(hint) if hint.trim().is_empty()) {
        return bad_request("language_hint must not be empty when given");
    }

    let language = req
        .language_hint
        .unwrap_or_else(|| state.default_language.clone());

    info!(
        "Transcribing {} for device {} ({})",
        req.audio_ref, req.device_id, language
    );

    let outcome = state.recognizer.recognize(&req.audio_ref, &language).await;

    // A failed recognition is still a recorded business result, not an
    // HTTP error; only a persistence failure makes this request fail.
    let attempt =
        TranscriptionAttempt::new(req.device_id.clone(), req.audio_ref, language, outcome);
    let id = attempt.id;
    let outcome = attempt.outcome.clone();

    if let Err(e) = state.store.record(attempt).await {
        error!("Failed to record attempt {}: {}", id, e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: format!("Failed to record attempt: {}", e),
            }),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(TranscribeResponse {
            id,
            device_id: req.device_id,
            outcome,
        }),
    )
        .into_response()
}

/// GET /devices/:device_id/statistics?window_days=N
/// Outcome counts for one device over a trailing window
pub async fn get_device_statistics(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Query(params): Query<StatisticsParams>,
) -> impl IntoResponse {
    let window_days = params.window_days.unwrap_or(7);

    match state.store.query_statistics(&device_id, window_days).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => {
            error!("Failed to query statistics for {}: {}", device_id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to query statistics: {}", e),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
