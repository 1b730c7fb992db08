use crate::error::{Result, TranscribeError};
use serde::{Deserialize, Serialize};

/// Chunk and overlap lengths used to split a signal into windows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowParams {
    /// Nominal window length in seconds
    pub chunk_secs: f64,

    /// Extra audio on each side of a window, in seconds
    pub overlap_secs: f64,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            chunk_secs: 20.0,
            overlap_secs: 1.0,
        }
    }
}

impl WindowParams {
    pub fn new(chunk_secs: f64, overlap_secs: f64) -> Self {
        Self {
            chunk_secs,
            overlap_secs,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.chunk_secs.is_finite() || self.chunk_secs <= 0.0 {
            return Err(TranscribeError::InvalidParameters(format!(
                "chunk_s must be positive, got {}",
                self.chunk_secs
            )));
        }
        if !self.overlap_secs.is_finite() || self.overlap_secs < 0.0 {
            return Err(TranscribeError::InvalidParameters(format!(
                "overlap_s must not be negative, got {}",
                self.overlap_secs
            )));
        }
        if self.overlap_secs >= self.chunk_secs {
            return Err(TranscribeError::InvalidParameters(format!(
                "overlap_s ({}) must be smaller than chunk_s ({})",
                self.overlap_secs, self.chunk_secs
            )));
        }
        Ok(())
    }
}

/// Half-open sample range `[start, end)` of the full signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    pub index: usize,
    pub start: usize,
    pub end: usize,

    /// `start / sample_rate`
    pub offset_secs: f64,
}

impl Window {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrow this window's samples out of the full signal
    pub fn slice<'a>(&self, signal: &'a [f32]) -> &'a [f32] {
        &signal[self.start..self.end]
    }
}

/// Split `total_samples` into overlapping windows.
///
/// With `c = round(chunk * rate)` and `o = round(overlap * rate)`, window `i`
/// spans `[max(0, i*c - o), min(N, (i+1)*c + o))`. An empty signal yields no
/// windows.
pub fn windows(total_samples: usize, params: &WindowParams, sample_rate: u32) -> Result<Vec<Window>> {
    params.validate()?;
    if sample_rate == 0 {
        return Err(TranscribeError::InvalidParameters(
            "sample rate must be positive".to_string(),
        ));
    }

    let rate = sample_rate as f64;
    let chunk = (params.chunk_secs * rate).round() as usize;
    let overlap = (params.overlap_secs * rate).round() as usize;
    if chunk == 0 {
        return Err(TranscribeError::InvalidParameters(format!(
            "chunk_s {} is shorter than one sample at {} Hz",
            params.chunk_secs, sample_rate
        )));
    }

    let count = total_samples.div_ceil(chunk);

    Ok((0..count)
        .map(|i| {
            // A huge chunk_s saturates `chunk` at usize::MAX
            let start = i.saturating_mul(chunk).saturating_sub(overlap);
            let end = (i + 1)
                .saturating_mul(chunk)
                .saturating_add(overlap)
                .min(total_samples);
            Window {
                index: i,
                start,
                end,
                offset_secs: start as f64 / rate,
            }
        })
        .collect())
}
