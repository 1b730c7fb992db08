//! Write-once transcript artifacts for the `transcribe` command.

use crate::pipeline::{format_timestamp, GlobalSegment, TranscriptResult};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const TEXT_FILE: &str = "output.txt";
pub const JSON_FILE: &str = "timestamps.json";

#[derive(Serialize)]
struct SegmentsFile<'a> {
    segments: &'a [GlobalSegment],
}

/// Paths of the artifacts written for one run
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub text: PathBuf,
    pub json: PathBuf,
}

/// Plain-text report: full transcript, then one timestamp line per segment
pub fn render_text(result: &TranscriptResult) -> String {
    let mut out = String::new();
    out.push_str("=== Full Transcript ===\n");
    out.push_str(&result.full_text);
    out.push_str("\n\n");
    out.push_str("=== Segment Timestamps ===\n");
    for seg in &result.segments {
        let _ = writeln!(
            out,
            "{} - {} : {}",
            format_timestamp(seg.start),
            format_timestamp(seg.end),
            seg.text
        );
    }
    out
}

/// Segment list in raw seconds
pub fn render_json(result: &TranscriptResult) -> Result<String> {
    serde_json::to_string_pretty(&SegmentsFile {
        segments: &result.segments,
    })
    .context("Failed to serialize segments")
}

/// Write `output.txt` and `timestamps.json` into `dir`
pub fn write_artifacts(dir: impl AsRef<Path>, result: &TranscriptResult) -> Result<Artifacts> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).context("Failed to create output directory")?;

    let artifacts = Artifacts {
        text: dir.join(TEXT_FILE),
        json: dir.join(JSON_FILE),
    };

    fs::write(&artifacts.text, render_text(result))
        .with_context(|| format!("Failed to write {:?}", artifacts.text))?;
    fs::write(&artifacts.json, render_json(result)?)
        .with_context(|| format!("Failed to write {:?}", artifacts.json))?;

    info!(
        "Wrote {} segment(s) to {} and {}",
        result.segments.len(),
        artifacts.text.display(),
        artifacts.json.display()
    );

    Ok(artifacts)
}
