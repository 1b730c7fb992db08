use super::session::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of one active streaming session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    /// Client identity
    pub client: String,

    pub state: SessionState,

    /// When the session was started
    pub started_at: DateTime<Utc>,

    /// Time since start in seconds
    pub duration_secs: f64,

    /// Raw audio bytes accumulated so far
    pub bytes_buffered: usize,

    /// Number of chunk events appended
    pub chunks_received: usize,
}
