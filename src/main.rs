use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use loqa_transcriber::audio::resample;
use loqa_transcriber::{
    create_router, export, shared_engine, AppState, AudioFile, Config, NatsEngine, Pipeline,
    SessionManager, StreamServer, WindowParams,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loqa-transcriber", version, about = "Windowed speech transcription service")]
struct Cli {
    /// Config file (TOML), extension optional
    #[arg(long, global = true, default_value = "config/loqa-transcriber")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP and streaming servers
    Serve,

    /// Transcribe one file and write output.txt / timestamps.json
    Transcribe {
        file: PathBuf,

        /// Window length in seconds
        #[arg(long)]
        chunk_secs: Option<f64>,

        /// Window overlap in seconds
        #[arg(long)]
        overlap_secs: Option<f64>,

        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("Loqa Transcriber v{}", env!("CARGO_PKG_VERSION"));
    info!("Loaded config: {}", cfg.service.name);

    let engine = NatsEngine::connect(
        &cfg.engine.nats_url,
        cfg.engine.subject.clone(),
        cfg.engine.timeout(),
    )
    .await?;
    let pipeline = Pipeline::new(shared_engine(engine), cfg.engine.sample_rate);
    info!(
        "Engine expects {}Hz audio (resampling {})",
        pipeline.engine_rate(),
        if resample::is_available() { "enabled" } else { "disabled" }
    );

    match cli.command {
        Command::Serve => serve(cfg, pipeline).await,
        Command::Transcribe {
            file,
            chunk_secs,
            overlap_secs,
            output_dir,
        } => {
            let defaults = cfg.pipeline.batch_window_params();
            let params = WindowParams::new(
                chunk_secs.unwrap_or(defaults.chunk_secs),
                overlap_secs.unwrap_or(defaults.overlap_secs),
            );
            transcribe_file(&pipeline, &file, &params, &output_dir).await
        }
    }
}

async fn serve(cfg: Config, pipeline: Pipeline) -> Result<()> {
    let sessions = Arc::new(SessionManager::new());

    let stream_addr = format!("{}:{}", cfg.service.stream.bind, cfg.service.stream.port);
    let stream_listener = TcpListener::bind(&stream_addr)
        .await
        .with_context(|| format!("Failed to bind streaming server to {}", stream_addr))?;
    let stream_server = StreamServer::new(
        Arc::clone(&sessions),
        pipeline.clone(),
        cfg.service.stream.sample_rate,
        cfg.pipeline.window_params(),
    );

    let http_addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let http_listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", http_addr))?;
    let state = AppState::new(pipeline, sessions, cfg.service.http.upload_dir())
        .with_defaults(cfg.pipeline.window_params())
        .with_max_upload_bytes(cfg.service.http.max_upload_bytes);

    info!("HTTP server listening on {}", http_addr);

    tokio::try_join!(
        async {
            stream_server
                .serve(stream_listener)
                .await
                .context("Streaming server failed")
        },
        async {
            axum::serve(http_listener, create_router(state))
                .await
                .context("HTTP server failed")
        },
    )?;

    Ok(())
}

async fn transcribe_file(
    pipeline: &Pipeline,
    file: &Path,
    params: &WindowParams,
    output_dir: &Path,
) -> Result<()> {
    let path = file.to_path_buf();
    let audio = tokio::task::spawn_blocking(move || AudioFile::open(path))
        .await
        .context("Decoder task failed")??;

    let result = pipeline
        .run(audio.samples, audio.sample_rate, params)
        .await?;

    let artifacts = export::write_artifacts(output_dir, &result)?;
    info!(
        "Transcript written to {} ({} segments)",
        artifacts.text.display(),
        result.segments.len()
    );

    Ok(())
}
