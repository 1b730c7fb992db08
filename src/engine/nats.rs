use super::messages::{RecognitionReply, RecognitionRequest};
use super::{EngineOutput, RecognitionEngine};
use crate::audio::pcm::f32_to_pcm16_bytes;
use crate::error::EngineFailure;
use anyhow::{Context, Result};
use async_nats::Client;
use base64::Engine;
use std::time::Duration;
use tracing::{debug, info};

/// Recognition engine backed by a remote STT worker reachable over NATS
pub struct NatsEngine {
    client: Client,
    subject: String,
    timeout: Duration,
}

impl NatsEngine {
    /// Connect to NATS server
    pub async fn connect(url: &str, subject: String, timeout: Duration) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully, recognizing on {}", subject);

        Ok(Self {
            client,
            subject,
            timeout,
        })
    }

    fn encode_request(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>, EngineFailure> {
        let request = RecognitionRequest {
            request_id: uuid::Uuid::new_v4().to_string(),
            pcm: base64::engine::general_purpose::STANDARD.encode(f32_to_pcm16_bytes(samples)),
            sample_rate,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        serde_json::to_vec(&request)
            .map_err(|e| EngineFailure::new(format!("Failed to encode request: {}", e)))
    }
}

#[async_trait::async_trait]
impl RecognitionEngine for NatsEngine {
    async fn recognize(
        &mut self,
        samples: &[f32],
        sample_rate: u32,
    ) -> Result<EngineOutput, EngineFailure> {
        let payload = Self::encode_request(samples, sample_rate)?;

        debug!(
            "Requesting recognition on {} ({} samples @ {}Hz)",
            self.subject,
            samples.len(),
            sample_rate
        );

        let reply = tokio::time::timeout(
            self.timeout,
            self.client.request(self.subject.clone(), payload.into()),
        )
        .await
        .map_err(|_| {
            EngineFailure::new(format!(
                "No reply on {} within {:?}",
                self.subject, self.timeout
            ))
        })?
        .map_err(|e| EngineFailure::new(format!("Request on {} failed: {}", self.subject, e)))?;

        let reply: RecognitionReply = serde_json::from_slice(&reply.payload)
            .map_err(|e| EngineFailure::new(format!("Unparseable recognition reply: {}", e)))?;

        Ok(reply.into())
    }

    fn name(&self) -> &str {
        "nats"
    }
}
