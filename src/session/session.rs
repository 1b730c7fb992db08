use super::stats::SessionStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of one streaming client connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(uuid::Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client-{}", self.0)
    }
}

/// Where a client is in the start → chunk* → stop cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Receiving,
}

/// Buffered audio of one client between `start` and `stop`.
///
/// A session only exists while its client is receiving; leaving that state
/// by any path drops it and its buffer.
#[derive(Debug)]
pub(super) struct Session {
    client: ClientId,
    started_at: DateTime<Utc>,
    buffer: Vec<u8>,
    chunks: usize,
}

impl Session {
    pub(super) fn new(client: ClientId) -> Self {
        Self {
            client,
            started_at: Utc::now(),
            buffer: Vec::new(),
            chunks: 0,
        }
    }

    pub(super) fn append(&mut self, bytes: &[u8]) -> usize {
        self.buffer.extend_from_slice(bytes);
        self.chunks += 1;
        self.buffer.len()
    }

    pub(super) fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    pub(super) fn len(&self) -> usize {
        self.buffer.len()
    }

    pub(super) fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            client: self.client.to_string(),
            state: SessionState::Receiving,
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            bytes_buffered: self.buffer.len(),
            chunks_received: self.chunks,
        }
    }
}
