//! Mono sample-rate conversion.
//!
//! Backed by rubato's FFT resampler when the `resample` feature is enabled.
//! Without it, any rate mismatch is reported as a missing capability.

use crate::error::{Result, TranscribeError};

/// Whether this build can convert between sample rates
pub const fn is_available() -> bool {
    cfg!(feature = "resample")
}

/// Resample mono PCM from `from` Hz to `to` Hz.
///
/// Returns the input unchanged when the rates already match.
pub fn resample(samples: Vec<f32>, from: u32, to: u32) -> Result<Vec<f32>> {
    if from == to {
        return Ok(samples);
    }
    if from == 0 || to == 0 {
        return Err(TranscribeError::Resample(format!(
            "cannot resample between {} Hz and {} Hz",
            from, to
        )));
    }
    convert(samples, from, to)
}

#[cfg(not(feature = "resample"))]
fn convert(_samples: Vec<f32>, from: u32, to: u32) -> Result<Vec<f32>> {
    Err(TranscribeError::MissingCapability { from, to })
}

#[cfg(feature = "resample")]
fn convert(samples: Vec<f32>, from: u32, to: u32) -> Result<Vec<f32>> {
    use rubato::{FftFixedIn, Resampler};

    const CHUNK: usize = 1024;
    const SUB_CHUNKS: usize = 2;

    if samples.is_empty() {
        return Ok(samples);
    }

    let mut resampler = FftFixedIn::<f32>::new(from as usize, to as usize, CHUNK, SUB_CHUNKS, 1)
        .map_err(|e| TranscribeError::Resample(e.to_string()))?;

    let delay = resampler.output_delay();
    let expected = (samples.len() as f64 * to as f64 / from as f64).round() as usize;
    let mut out = Vec::with_capacity(expected + delay + CHUNK);

    for block in samples.chunks(CHUNK) {
        let mut input = vec![0.0f32; CHUNK];
        input[..block.len()].copy_from_slice(block);
        let frames = resampler
            .process(&[input], None)
            .map_err(|e| TranscribeError::Resample(e.to_string()))?;
        out.extend_from_slice(&frames[0]);
    }

    // Flush the filter delay with silence
    while out.len() < expected + delay {
        let frames = resampler
            .process(&[vec![0.0f32; CHUNK]], None)
            .map_err(|e| TranscribeError::Resample(e.to_string()))?;
        out.extend_from_slice(&frames[0]);
    }

    out.drain(..delay);
    out.truncate(expected);
    Ok(out)
}
