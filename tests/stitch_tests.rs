// Integration tests for transcript stitching
//
// These tests verify overlap de-duplication, global timestamps and the
// formatting of stitched transcripts.

use loqa_transcriber::pipeline::{
    format_timestamp, stitch, windows, GlobalSegment, LocalSegment, RawRecognitionResult,
    TranscriptResult, WindowParams,
};

fn seg(start: f64, end: f64, text: &str) -> LocalSegment {
    LocalSegment {
        start,
        end,
        text: text.to_string(),
    }
}

fn result(text: &str, segments: Vec<LocalSegment>) -> RawRecognitionResult {
    RawRecognitionResult {
        text: text.to_string(),
        segments,
    }
}

/// Same three probe segments in every window: one in the leading overlap,
/// one in the body and one running into the trailing overlap.
fn probe_segments() -> Vec<LocalSegment> {
    vec![
        seg(0.5, 2.0, "leading"),
        seg(3.0, 5.0, "body"),
        seg(9.0, 11.5, "trailing"),
    ]
}

#[test]
fn test_interior_windows_drop_both_overlaps() {
    // chunk 10s, overlap 1s, 40s of audio at 100 Hz: 4 windows
    let params = WindowParams::new(10.0, 1.0);
    let planned = windows(4000, &params, 100).unwrap();
    assert_eq!(planned.len(), 4);

    let results: Vec<_> = (0..4).map(|_| result("w", probe_segments())).collect();
    let stitched = stitch(&planned, &results, &params);

    let texts: Vec<_> = stitched.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            // first window: keeps its leading segment, drops the trailing one
            "leading", "body",
            // interior windows: body only
            "body", "body",
            // last window: drops leading, keeps trailing
            "body", "trailing",
        ]
    );
}

#[test]
fn test_kept_segments_are_offset_by_window_start() {
    let params = WindowParams::new(10.0, 1.0);
    let planned = windows(4000, &params, 100).unwrap();
    let results: Vec<_> = (0..4).map(|_| result("w", probe_segments())).collect();

    let stitched = stitch(&planned, &results, &params);

    // offsets are 0, 9, 19, 29
    let starts: Vec<_> = stitched.segments.iter().map(|s| s.start).collect();
    assert_eq!(starts, vec![0.5, 3.0, 12.0, 22.0, 32.0, 38.0]);

    let ends: Vec<_> = stitched.segments.iter().map(|s| s.end).collect();
    assert_eq!(ends, vec![2.0, 5.0, 14.0, 24.0, 34.0, 40.5]);
}

#[test]
fn test_single_window_keeps_everything() {
    let params = WindowParams::new(10.0, 1.0);
    let planned = windows(500, &params, 100).unwrap();
    assert_eq!(planned.len(), 1);

    let stitched = stitch(&planned, &[result("only", probe_segments())], &params);
    assert_eq!(stitched.segments.len(), 3);
    assert_eq!(stitched.full_text, "only");
}

#[test]
fn test_boundary_values_are_kept() {
    // start == overlap and end == chunk + overlap are not in the overlap
    let params = WindowParams::new(10.0, 1.0);
    let planned = windows(3000, &params, 100).unwrap();

    let results = vec![
        result("a", vec![]),
        result("b", vec![seg(1.0, 11.0, "edge")]),
        result("c", vec![]),
    ];
    let stitched = stitch(&planned, &results, &params);

    assert_eq!(
        stitched.segments,
        vec![GlobalSegment {
            start: 10.0,
            end: 20.0,
            text: "edge".to_string()
        }]
    );
}

#[test]
fn test_full_text_is_untrimmed_window_text() {
    let params = WindowParams::new(10.0, 1.0);
    let planned = windows(3000, &params, 100).unwrap();

    let results = vec![
        result("hello there", vec![seg(0.0, 1.0, "hello there")]),
        result("there general", vec![seg(0.2, 0.8, "there")]),
        result("", vec![]),
    ];
    let stitched = stitch(&planned, &results, &params);

    // overlap text is repeated and empty windows still contribute a separator
    assert_eq!(stitched.full_text, "hello there there general ");
}

#[test]
fn test_no_windows_yields_empty_transcript() {
    let stitched = stitch(&[], &[], &WindowParams::default());
    assert_eq!(stitched, TranscriptResult::default());
    assert_eq!(stitched.timestamped_lines(), "");
}

#[test]
fn test_format_timestamp() {
    assert_eq!(format_timestamp(0.0), "0:00:00");
    assert_eq!(format_timestamp(0.99), "0:00:00");
    assert_eq!(format_timestamp(59.9), "0:00:59");
    assert_eq!(format_timestamp(61.0), "0:01:01");
    assert_eq!(format_timestamp(3725.4), "1:02:05");
    assert_eq!(format_timestamp(36000.0), "10:00:00");
    assert_eq!(format_timestamp(86_400.0), "1 day, 0:00:00");
    assert_eq!(format_timestamp(2.0 * 86_400.0 + 1.0), "2 days, 0:00:01");
}

#[test]
fn test_timestamped_lines() {
    let transcript = TranscriptResult {
        full_text: "one two".to_string(),
        segments: vec![
            GlobalSegment {
                start: 0.4,
                end: 1.7,
                text: "one".to_string(),
            },
            GlobalSegment {
                start: 62.0,
                end: 65.2,
                text: "two".to_string(),
            },
        ],
    };

    assert_eq!(
        transcript.timestamped_lines(),
        "0:00:00 - 0:00:01 one\n0:01:02 - 0:01:05 two"
    );
}
