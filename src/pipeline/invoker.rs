use super::types::{LocalSegment, RawRecognitionResult};
use crate::engine::{EngineOutput, RecognitionEngine};
use crate::error::{Result, TranscribeError};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error};

/// Handle to the single recognition engine shared by every session and request
pub type SharedEngine = Arc<Mutex<Box<dyn RecognitionEngine>>>;

pub fn shared_engine<E: RecognitionEngine + 'static>(engine: E) -> SharedEngine {
    Arc::new(Mutex::new(Box::new(engine)))
}

/// Runs one window through the engine at a time.
///
/// The engine lock is held for the duration of a single call, so concurrent
/// callers queue up in arrival order rather than being rejected.
#[derive(Clone)]
pub struct Invoker {
    engine: SharedEngine,
}

impl Invoker {
    pub fn new(engine: SharedEngine) -> Self {
        Self { engine }
    }

    pub async fn invoke(
        &self,
        window: usize,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<RawRecognitionResult> {
        let mut engine = self.engine.lock().await;

        debug!(
            "Window {}: {} samples to engine '{}'",
            window,
            samples.len(),
            engine.name()
        );

        let output = engine
            .recognize(samples, sample_rate)
            .await
            .map_err(|source| {
                error!("ASR error on window {}: {}", window, source);
                TranscribeError::Engine { window, source }
            })?;

        Ok(normalize(output))
    }
}

/// Collapse both engine output shapes into one result type
fn normalize(output: EngineOutput) -> RawRecognitionResult {
    match output {
        EngineOutput::Text(text) => RawRecognitionResult {
            text,
            segments: Vec::new(),
        },
        EngineOutput::Timed { text, segments } => RawRecognitionResult {
            text,
            segments: segments
                .unwrap_or_default()
                .into_iter()
                .map(|s| LocalSegment {
                    start: s.start,
                    end: s.end,
                    text: s.text,
                })
                .collect(),
        },
    }
}
