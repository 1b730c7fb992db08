//! Error types for the transcription pipeline and its adapters.

use thiserror::Error;

/// Failure reported by a recognition engine for a single call.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{cause}")]
pub struct EngineFailure {
    pub cause: String,
}

impl EngineFailure {
    pub fn new(cause: impl Into<String>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum TranscribeError {
    // Rejected before any buffering or decoding
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Invalid windowing parameters: {0}")]
    InvalidParameters(String),

    // Audio errors
    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Resampling from {from} Hz to {to} Hz requires the `resample` feature")]
    MissingCapability { from: u32, to: u32 },

    #[error("Resampling failed: {0}")]
    Resample(String),

    // Recognition errors
    #[error("ASR failure on window {window}: {source}")]
    Engine {
        window: usize,
        #[source]
        source: EngineFailure,
    },

    // Streaming protocol errors
    #[error("Session protocol error: {0}")]
    SessionProtocol(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl TranscribeError {
    /// True for errors caused by what the client sent rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat(_)
                | Self::InvalidUpload(_)
                | Self::InvalidParameters(_)
                | Self::Decode(_)
                | Self::SessionProtocol(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TranscribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_crashed_task_is_server_error() {
        let join_err = tokio::task::spawn_blocking(|| panic!("decoder crashed"))
            .await
            .unwrap_err();

        let err = TranscribeError::from(join_err);
        assert!(matches!(err, TranscribeError::Task(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_client_errors() {
        assert!(TranscribeError::Decode("bad".to_string()).is_client_error());
        assert!(TranscribeError::InvalidParameters("bad".to_string()).is_client_error());
        assert!(!TranscribeError::MissingCapability { from: 8000, to: 16000 }.is_client_error());
    }
}
