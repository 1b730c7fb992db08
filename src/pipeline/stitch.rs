use super::types::{GlobalSegment, RawRecognitionResult, TranscriptResult};
use super::window::{Window, WindowParams};
use tracing::warn;

/// Merge per-window results into one transcript.
///
/// `results[i]` must belong to `windows[i]`. Segments starting inside a
/// window's leading overlap are dropped (the previous window already emitted
/// them) unless it is the first window; segments running into the trailing
/// overlap are dropped (the next window emits them whole) unless it is the
/// last. The full text joins every window's text untrimmed.
pub fn stitch(
    windows: &[Window],
    results: &[RawRecognitionResult],
    params: &WindowParams,
) -> TranscriptResult {
    debug_assert_eq!(windows.len(), results.len());

    let count = windows.len();
    let trailing_limit = params.chunk_secs + params.overlap_secs;

    let full_text = results
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    let mut segments = Vec::new();
    for (i, (window, result)) in windows.iter().zip(results).enumerate() {
        let first = i == 0;
        let last = i + 1 == count;

        for seg in &result.segments {
            if seg.start < params.overlap_secs && !first {
                continue;
            }
            if seg.end > trailing_limit && !last {
                continue;
            }
            segments.push(GlobalSegment {
                start: seg.start + window.offset_secs,
                end: seg.end + window.offset_secs,
                text: seg.text.clone(),
            });
        }
    }

    if !segments.windows(2).all(|w| w[0].start <= w[1].start) {
        warn!("Engine returned segments out of chronological order");
    }

    TranscriptResult {
        full_text,
        segments,
    }
}
