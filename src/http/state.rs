use crate::pipeline::{Pipeline, WindowParams};
use crate::session::SessionManager;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Pipeline bound to the shared recognition engine
    pub pipeline: Pipeline,

    /// Streaming sessions, read-only from HTTP
    pub sessions: Arc<SessionManager>,

    /// Directory uploads are staged in
    pub upload_dir: PathBuf,

    pub max_upload_bytes: usize,

    /// Used when a request omits `chunk_s` / `overlap_s`
    pub defaults: WindowParams,
}

impl AppState {
    pub fn new(pipeline: Pipeline, sessions: Arc<SessionManager>, upload_dir: PathBuf) -> Self {
        Self {
            pipeline,
            sessions,
            upload_dir,
            max_upload_bytes: 512 * 1024 * 1024,
            defaults: WindowParams::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: WindowParams) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
