//! TCP server for streaming transcription sessions.

use super::protocol::{read_frame, write_event, write_frame, ClientEvent, ServerEvent};
use crate::audio::decode_pcm16;
use crate::error::{Result, TranscribeError};
use crate::pipeline::{Pipeline, TranscriptResult, WindowParams};
use crate::session::{ClientId, SessionManager};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite, BufReader};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Streaming adapter: drives the session table from framed events and runs
/// the pipeline when a client stops.
#[derive(Clone)]
pub struct StreamServer {
    sessions: Arc<SessionManager>,
    pipeline: Pipeline,

    /// Rate of the 16-bit mono PCM clients send
    input_rate: u32,

    params: WindowParams,
}

impl StreamServer {
    pub fn new(
        sessions: Arc<SessionManager>,
        pipeline: Pipeline,
        input_rate: u32,
        params: WindowParams,
    ) -> Self {
        Self {
            sessions,
            pipeline,
            input_rate,
            params,
        }
    }

    /// Accept connections until the listener fails
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        info!("Streaming server listening on {}", listener.local_addr()?);

        loop {
            let (stream, peer) = listener.accept().await?;
            let server = self.clone();

            tokio::spawn(async move {
                info!("Client connected from {}", peer);
                if let Err(e) = server.handle_connection(stream).await {
                    warn!("Connection from {} closed with error: {}", peer, e);
                }
            });
        }
    }

    /// Serve one client until it disconnects.
    ///
    /// Whatever way the connection ends, a session left receiving is aborted
    /// rather than transcribed.
    pub async fn handle_connection<S>(&self, stream: S) -> Result<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let client = ClientId::new();
        let (reader, mut writer) = tokio::io::split(stream);
        let mut reader = BufReader::new(reader);

        let result = self.serve_events(client, &mut reader, &mut writer).await;

        if self.sessions.abort(client).await {
            info!("{} disconnected mid-session", client);
        }

        result
    }

    async fn serve_events<R, W>(&self, client: ClientId, reader: &mut R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        loop {
            let frame = match read_frame(reader).await {
                Ok(Some(frame)) => frame,
                Ok(None) => return Ok(()),
                Err(e @ TranscribeError::SessionProtocol(_)) => {
                    // Framing is lost; report and hang up
                    warn!("Protocol error from {}: {}", client, e);
                    write_event(writer, &ServerEvent::error(e.to_string())).await?;
                    return Err(e);
                }
                Err(e) => return Err(e),
            };

            match ClientEvent::from(frame) {
                ClientEvent::Start => {
                    self.sessions.start(client).await;
                }
                ClientEvent::Chunk(bytes) => {
                    if let Err(e) = self.sessions.append(client, &bytes).await {
                        warn!("{}", e);
                        write_event(writer, &ServerEvent::error(e.to_string())).await?;
                    }
                }
                ClientEvent::Stop => {
                    let buffer = self.sessions.finish(client).await;

                    let event = match self.transcribe(buffer).await {
                        Ok(result) => {
                            info!(
                                "Sent transcript to {}: {}",
                                client,
                                preview(&result.full_text)
                            );
                            ServerEvent::Transcript {
                                transcript: result.full_text,
                            }
                        }
                        Err(e) => {
                            error!("Transcription failed for {}: {}", client, e);
                            ServerEvent::error(e.to_string())
                        }
                    };
                    write_event(writer, &event).await?;
                }
                ClientEvent::Passthrough(frame) => {
                    write_frame(writer, &frame).await?;
                }
            }
        }
    }

    async fn transcribe(&self, buffer: Vec<u8>) -> Result<TranscriptResult> {
        let samples = decode_pcm16(&buffer)?;
        drop(buffer);

        self.pipeline
            .run(samples, self.input_rate, &self.params)
            .await
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(50) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
