use super::{EngineOutput, RecognitionEngine};
use crate::error::EngineFailure;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Handler = dyn Fn(&[f32], u32) -> Result<EngineOutput, EngineFailure> + Send + Sync;

/// Mock engine for testing
///
/// Output is computed by a handler from the submitted samples, so identical
/// input always produces identical output.
#[derive(Clone)]
pub struct MockEngine {
    handler: Arc<Handler>,
    calls: Arc<AtomicUsize>,
}

impl MockEngine {
    /// Engine that answers every call with the same plain text
    pub fn new(response: &str) -> Self {
        let response = response.to_string();
        Self::with_handler(move |_, _| Ok(EngineOutput::Text(response.clone())))
    }

    /// Engine whose output is computed from the submitted samples
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&[f32], u32) -> Result<EngineOutput, EngineFailure> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Engine that fails every call
    pub fn failing(cause: &str) -> Self {
        let cause = cause.to_string();
        Self::with_handler(move |_, _| Err(EngineFailure::new(cause.clone())))
    }

    /// Shared call counter, still readable after the engine is moved
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for MockEngine {
    async fn recognize(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<EngineOutput, EngineFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(samples, sample_rate)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
