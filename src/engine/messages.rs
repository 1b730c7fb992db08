use super::{EngineOutput, EngineSegment};
use serde::{Deserialize, Serialize};

/// Recognition request published to the STT worker
#[derive(Debug, Serialize, Deserialize)]
pub struct RecognitionRequest {
    pub request_id: String,
    pub pcm: String, // Base64-encoded 16-bit LE mono PCM
    pub sample_rate: u32,
    pub timestamp: String, // RFC3339 timestamp
}

/// Reply from the STT worker
///
/// Workers answer either with a bare string or with an object carrying
/// optional segment timestamps.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecognitionReply {
    Plain(String),
    Detailed {
        #[serde(alias = "transcript")]
        text: String,
        #[serde(default)]
        segments: Option<Vec<EngineSegment>>,
    },
}

impl From<RecognitionReply> for EngineOutput {
    fn from(reply: RecognitionReply) -> Self {
        match reply {
            RecognitionReply::Plain(text) => EngineOutput::Text(text),
            RecognitionReply::Detailed { text, segments } => EngineOutput::Timed { text, segments },
        }
    }
}
