//! Speech recognition engines
//!
//! The recognizer is an opaque, stateful resource behind the
//! [`RecognitionEngine`] trait:
//! - `NatsEngine` - forwards audio to a remote STT worker over NATS request/reply
//! - `MockEngine` - deterministic, handler-driven engine for tests

pub mod messages;
pub mod mock;
pub mod nats;

use crate::error::EngineFailure;
use serde::{Deserialize, Serialize};

pub use messages::{RecognitionReply, RecognitionRequest};
pub use mock::MockEngine;
pub use nats::NatsEngine;

/// A timed span reported by an engine, relative to the submitted audio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSegment {
    pub start: f64,
    pub end: f64,
    #[serde(alias = "segment")]
    pub text: String,
}

/// Engine results come in two shapes
#[derive(Debug, Clone, PartialEq)]
pub enum EngineOutput {
    /// Plain text with no timing information
    Text(String),

    /// Text with optional segment timestamps
    Timed {
        text: String,
        segments: Option<Vec<EngineSegment>>,
    },
}

/// Speech recognition engine
///
/// Implementations may hold mutable model state, so calls take `&mut self`
/// and callers must serialize access.
#[async_trait::async_trait]
pub trait RecognitionEngine: Send + Sync {
    /// Recognize mono samples at the given rate
    async fn recognize(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<EngineOutput, EngineFailure>;

    /// Get engine name for logging
    fn name(&self) -> &str;
}
