use super::session::{ClientId, Session, SessionState};
use super::stats::SessionStats;
use crate::error::{Result, TranscribeError};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Owns the per-client buffers of the streaming protocol.
///
/// The table is only reachable through the transitions below. No lock is
/// held across an await point outside this type, so a session being
/// finalized never blocks unrelated clients.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: RwLock<HashMap<ClientId, Session>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh session, discarding any buffer the client already had.
    ///
    /// Returns true if an existing session was replaced.
    pub async fn start(&self, client: ClientId) -> bool {
        let mut sessions = self.sessions.write().await;
        let replaced = sessions.insert(client, Session::new(client));

        match &replaced {
            Some(old) => info!(
                "Audio start from {}, discarding {} buffered bytes",
                client,
                old.len()
            ),
            None => info!("Audio start from {}", client),
        }

        replaced.is_some()
    }

    /// Append audio to a receiving session.
    ///
    /// A chunk without a preceding `start` is rejected and nothing is buffered.
    /// Returns the session's total buffered bytes.
    pub async fn append(&self, client: ClientId, bytes: &[u8]) -> Result<usize> {
        let mut sessions = self.sessions.write().await;

        let session = sessions.get_mut(&client).ok_or_else(|| {
            TranscribeError::SessionProtocol(format!(
                "chunk received from {} before start",
                client
            ))
        })?;

        let total = session.append(bytes);
        debug!(
            "Received {} bytes chunk from {} (total={})",
            bytes.len(),
            client,
            total
        );
        Ok(total)
    }

    /// Take the buffer and remove the session in one step.
    ///
    /// A duplicate `stop` or a disconnect racing with this call finds no
    /// session and gets an empty buffer.
    pub async fn finish(&self, client: ClientId) -> Vec<u8> {
        let session = self.sessions.write().await.remove(&client);

        let buffer = session.map(Session::into_buffer).unwrap_or_default();
        info!("Audio stop from {}, total bytes={}", client, buffer.len());
        buffer
    }

    /// Drop a session without transcribing it.
    ///
    /// Returns true if a session was removed.
    pub async fn abort(&self, client: ClientId) -> bool {
        let removed = self.sessions.write().await.remove(&client);

        if let Some(session) = &removed {
            info!(
                "Aborted session for {}, dropped {} buffered bytes",
                client,
                session.len()
            );
        }

        removed.is_some()
    }

    pub async fn state(&self, client: ClientId) -> SessionState {
        if self.sessions.read().await.contains_key(&client) {
            SessionState::Receiving
        } else {
            SessionState::Idle
        }
    }

    /// Number of sessions currently receiving
    pub async fn active(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn stats(&self) -> Vec<SessionStats> {
        let sessions = self.sessions.read().await;

        let mut stats: Vec<SessionStats> = sessions.values().map(Session::stats).collect();
        stats.sort_by_key(|s| s.started_at);
        stats
    }
}
