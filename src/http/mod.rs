//! HTTP API for one-shot transcription
//!
//! This module provides a REST API:
//! - POST /transcribe - Transcribe an uploaded file (query: chunk_s, overlap_s)
//! - GET /sessions - List active streaming sessions
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;
mod upload;

pub use handlers::{ErrorResponse, TranscribeQuery, TranscribeResponse};
pub use routes::create_router;
pub use state::AppState;
pub use upload::{allowed_extension, TempUpload, ALLOWED_EXTENSIONS};
