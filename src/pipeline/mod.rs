//! Windowed transcription pipeline
//!
//! Long audio is split into overlapping windows bounded by engine limits,
//! each window is recognized on its own, and the per-window results are
//! stitched back into one time-aligned transcript:
//!
//! samples → [`windows`] → [`Invoker`] → [`stitch`] → [`TranscriptResult`]

mod invoker;
mod stitch;
mod types;
mod window;

pub use invoker::{shared_engine, Invoker, SharedEngine};
pub use stitch::stitch;
pub use types::{
    format_timestamp, GlobalSegment, LocalSegment, RawRecognitionResult, TranscriptResult,
};
pub use window::{windows, Window, WindowParams};

use crate::audio::resample;
use crate::error::Result;
use tracing::info;

/// Full pipeline bound to one shared engine
#[derive(Clone)]
pub struct Pipeline {
    invoker: Invoker,

    /// Sample rate the engine expects
    engine_rate: u32,
}

impl Pipeline {
    pub fn new(engine: SharedEngine, engine_rate: u32) -> Self {
        Self {
            invoker: Invoker::new(engine),
            engine_rate,
        }
    }

    pub fn engine_rate(&self) -> u32 {
        self.engine_rate
    }

    /// Transcribe mono samples recorded at `sample_rate`.
    ///
    /// The signal is resampled to the engine rate first when they differ.
    /// An empty signal produces an empty transcript.
    pub async fn run(
        &self,
        samples: Vec<f32>,
        sample_rate: u32,
        params: &WindowParams,
    ) -> Result<TranscriptResult> {
        params.validate()?;

        let signal = resample(samples, sample_rate, self.engine_rate)?;
        let windows = windows(signal.len(), params, self.engine_rate)?;

        info!(
            "Transcribing {:.1}s of audio in {} window(s) (chunk={}s, overlap={}s)",
            signal.len() as f64 / self.engine_rate as f64,
            windows.len(),
            params.chunk_secs,
            params.overlap_secs
        );

        let mut results = Vec::with_capacity(windows.len());
        for window in &windows {
            let result = self
                .invoker
                .invoke(window.index, window.slice(&signal), self.engine_rate)
                .await?;
            results.push(result);
        }

        Ok(stitch(&windows, &results, params))
    }
}
