use serde::{Deserialize, Serialize};

/// A segment as returned for one window, timed relative to the window's start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Normalized result of one recognition call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecognitionResult {
    /// Whole-window text, never trimmed
    pub text: String,

    /// Ordered segments relative to the window start
    pub segments: Vec<LocalSegment>,
}

/// A segment timed against the full original signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Terminal output of one pipeline run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub full_text: String,
    pub segments: Vec<GlobalSegment>,
}

impl TranscriptResult {
    /// One `"<start> - <end> <text>"` line per segment, joined by newlines
    pub fn timestamped_lines(&self) -> String {
        self.segments
            .iter()
            .map(|s| {
                format!(
                    "{} - {} {}",
                    format_timestamp(s.start),
                    format_timestamp(s.end),
                    s.text
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render seconds as `H:MM:SS`, truncated to whole seconds.
///
/// Hours are not zero-padded. Spans of a day or more are prefixed with
/// `N day, ` / `N days, `.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.trunc() as u64
    } else {
        0
    };

    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    let clock = format!("{}:{:02}:{:02}", hours, minutes, secs);
    match days {
        0 => clock,
        1 => format!("1 day, {}", clock),
        n => format!("{} days, {}", n, clock),
    }
}
