use super::state::AppState;
use super::upload::{allowed_extension, TempUpload};
use crate::audio::AudioFile;
use crate::error::{Result, TranscribeError};
use crate::pipeline::WindowParams;
use crate::session::SessionStats;
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct TranscribeQuery {
    /// Window length in seconds (default: 20.0)
    pub chunk_s: Option<f64>,

    /// Window overlap in seconds (default: 1.0)
    pub overlap_s: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TranscribeResponse {
    pub full_transcript: String,

    /// One `"H:MM:SS - H:MM:SS text"` line per segment
    pub timestamped_transcript: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /transcribe
/// Transcribe one uploaded audio file
pub async fn transcribe(
    State(state): State<AppState>,
    Query(query): Query<TranscribeQuery>,
    multipart: Multipart,
) -> Response {
    match transcribe_upload(&state, query, multipart).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn transcribe_upload(
    state: &AppState,
    query: TranscribeQuery,
    mut multipart: Multipart,
) -> Result<TranscribeResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TranscribeError::InvalidUpload(e.to_string()))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let ext = allowed_extension(&filename)?;

        let params = WindowParams::new(
            query.chunk_s.unwrap_or(state.defaults.chunk_secs),
            query.overlap_s.unwrap_or(state.defaults.overlap_secs),
        );
        params.validate()?;

        let data = field
            .bytes()
            .await
            .map_err(|e| TranscribeError::InvalidUpload(e.to_string()))?;

        info!("Transcribing upload '{}' ({} bytes)", filename, data.len());

        let upload = TempUpload::create(&state.upload_dir, &ext, &data).await?;
        drop(data);

        return transcribe_staged(state, &filename, &upload, &params).await;
    }

    Err(TranscribeError::InvalidUpload(
        "request contains no audio file".to_string(),
    ))
}

async fn transcribe_staged(
    state: &AppState,
    filename: &str,
    upload: &TempUpload,
    params: &WindowParams,
) -> Result<TranscribeResponse> {
    let path = upload.path().to_path_buf();
    let audio = tokio::task::spawn_blocking(move || AudioFile::open(path))
        .await??;

    let result = state
        .pipeline
        .run(audio.samples, audio.sample_rate, params)
        .await?;

    info!(
        "Transcribed '{}': {} segment(s), {} chars",
        filename,
        result.segments.len(),
        result.full_text.len()
    );

    Ok(TranscribeResponse {
        timestamped_transcript: result.timestamped_lines(),
        full_transcript: result.full_text,
    })
}

/// GET /sessions
/// List active streaming sessions
pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionStats>> {
    Json(state.sessions.stats().await)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn error_response(err: TranscribeError) -> Response {
    let status = if err.is_client_error() {
        warn!("Rejected transcription request: {}", err);
        StatusCode::BAD_REQUEST
    } else {
        error!("Transcription request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
