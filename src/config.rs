use crate::pipeline::WindowParams;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub engine: EngineConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    pub stream: StreamConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "loqa-transcriber".to_string(),
            http: HttpConfig::default(),
            stream: StreamConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,

    /// Where uploads are staged while they are decoded (system temp dir if unset)
    pub upload_dir: Option<PathBuf>,

    pub max_upload_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8000,
            upload_dir: None,
            max_upload_bytes: 512 * 1024 * 1024,
        }
    }
}

impl HttpConfig {
    pub fn upload_dir(&self) -> PathBuf {
        self.upload_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub bind: String,
    pub port: u16,

    /// Rate of the raw 16-bit mono PCM clients stream
    pub sample_rate: u32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 10300,
            sample_rate: 16000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub nats_url: String,

    /// Request subject the STT worker answers on
    pub subject: String,

    /// Sample rate the recognizer expects
    pub sample_rate: u32,

    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            nats_url: "nats://localhost:4222".to_string(),
            subject: "stt.recognize".to_string(),
            sample_rate: 16000,
            timeout_secs: 120,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub chunk_secs: f64,
    pub overlap_secs: f64,

    /// Chunk length for the `transcribe` command
    pub batch_chunk_secs: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            chunk_secs: 20.0,
            overlap_secs: 1.0,
            batch_chunk_secs: 60.0,
        }
    }
}

impl PipelineConfig {
    pub fn window_params(&self) -> WindowParams {
        WindowParams::new(self.chunk_secs, self.overlap_secs)
    }

    pub fn batch_window_params(&self) -> WindowParams {
        WindowParams::new(self.batch_chunk_secs, self.overlap_secs)
    }
}

impl Config {
    /// Load from an optional file, then `LOQA_TRANSCRIBER` environment overrides
    /// (e.g. `LOQA_TRANSCRIBER_SERVICE__HTTP__PORT=9000`)
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("LOQA_TRANSCRIBER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to load config from {}", path))?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.pipeline
            .window_params()
            .validate()
            .context("Invalid pipeline configuration")?;
        cfg.pipeline
            .batch_window_params()
            .validate()
            .context("Invalid batch pipeline configuration")?;

        Ok(cfg)
    }
}
