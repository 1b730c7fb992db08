// Integration tests for configuration loading

use anyhow::Result;
use loqa_transcriber::Config;
use std::fs;
use tempfile::TempDir;

fn load_toml(contents: &str) -> Result<Config> {
    let dir = TempDir::new()?;
    let path = dir.path().join("service.toml");
    fs::write(&path, contents)?;

    Config::load(&path.to_string_lossy())
}

#[test]
fn test_defaults_without_file() -> Result<()> {
    let cfg = Config::load("/nonexistent/loqa-transcriber")?;

    assert_eq!(cfg.service.http.port, 8000);
    assert_eq!(cfg.service.stream.port, 10300);
    assert_eq!(cfg.pipeline.chunk_secs, 20.0);
    assert_eq!(cfg.pipeline.batch_chunk_secs, 60.0);

    Ok(())
}

#[test]
fn test_file_values_override_defaults() -> Result<()> {
    let cfg = load_toml(
        r#"
        [engine]
        subject = "stt.other"

        [pipeline]
        chunk_secs = 10.0
        overlap_secs = 0.5
        "#,
    )?;

    assert_eq!(cfg.engine.subject, "stt.other");
    assert_eq!(cfg.pipeline.window_params().chunk_secs, 10.0);
    assert_eq!(cfg.pipeline.batch_window_params().overlap_secs, 0.5);

    Ok(())
}

#[test]
fn test_invalid_streaming_window_is_rejected() {
    let result = load_toml(
        r#"
        [pipeline]
        chunk_secs = 1.0
        overlap_secs = 1.0
        "#,
    );

    assert!(result.is_err());
}

#[test]
fn test_invalid_batch_window_is_rejected_at_load() {
    let result = load_toml(
        r#"
        [pipeline]
        chunk_secs = 20.0
        overlap_secs = 1.0
        batch_chunk_secs = 0.5
        "#,
    );

    let err = result.expect_err("batch window must be validated at load");
    assert!(format!("{:#}", err).contains("batch"), "{:#}", err);
}
