//! Framed event protocol for streaming sessions.
//!
//! A frame is one JSON header line, optionally followed by
//! `payload_length` raw bytes:
//!
//! ```text
//! {"type":"start"}
//! {"type":"chunk","payload_length":3200}<3200 bytes of PCM>
//! {"type":"stop"}
//! ```

use crate::error::{Result, TranscribeError};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Largest payload accepted in a single frame
pub const MAX_PAYLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Longest header line accepted, excluding the newline
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameHeader {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload_length: Option<usize>,
}

/// One frame as read off the wire
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: FrameHeader,

    /// Header line exactly as received, without the trailing newline
    pub raw_header: String,

    pub payload: Vec<u8>,
}

/// Client → server events
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Start,
    Chunk(Vec<u8>),
    Stop,

    /// Any other frame, echoed back unmodified
    Passthrough(Frame),
}

impl From<Frame> for ClientEvent {
    fn from(frame: Frame) -> Self {
        match frame.header.kind.as_str() {
            "start" | "audio-start" | "audio_start" => ClientEvent::Start,
            "chunk" | "audio-chunk" | "audio_chunk" => ClientEvent::Chunk(frame.payload),
            "stop" | "audio-stop" | "audio_stop" => ClientEvent::Stop,
            _ => ClientEvent::Passthrough(frame),
        }
    }
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    Transcript { transcript: String },
    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Read the next frame. Returns `None` on a clean end of stream.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Frame>>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        let read = (&mut *reader)
            .take(MAX_HEADER_BYTES as u64 + 1)
            .read_until(b'\n', &mut line)
            .await?;
        if read == 0 {
            return Ok(None);
        }
        if !line.ends_with(b"\n") && line.len() > MAX_HEADER_BYTES {
            return Err(TranscribeError::SessionProtocol(format!(
                "frame header exceeds the {} byte limit",
                MAX_HEADER_BYTES
            )));
        }
        if !line.iter().all(u8::is_ascii_whitespace) {
            break;
        }
    }

    let raw_header = String::from_utf8(line)
        .map_err(|_| TranscribeError::SessionProtocol("frame header is not UTF-8".to_string()))?
        .trim_end_matches(['\r', '\n'])
        .to_string();
    let header: FrameHeader = serde_json::from_str(&raw_header).map_err(|e| {
        TranscribeError::SessionProtocol(format!("malformed frame header: {}", e))
    })?;

    let payload = match header.payload_length {
        Some(len) if len > MAX_PAYLOAD_BYTES => {
            return Err(TranscribeError::SessionProtocol(format!(
                "payload of {} bytes exceeds the {} byte limit",
                len, MAX_PAYLOAD_BYTES
            )))
        }
        Some(len) => {
            let mut payload = vec![0u8; len];
            reader.read_exact(&mut payload).await?;
            payload
        }
        None => Vec::new(),
    };

    Ok(Some(Frame {
        header,
        raw_header,
        payload,
    }))
}

/// Write a frame: header line, then payload bytes
pub async fn write_frame<W>(writer: &mut W, frame: &Frame) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(frame.raw_header.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.write_all(&frame.payload).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn write_event<W>(writer: &mut W, event: &ServerEvent) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let json = event.to_json().map_err(|e| {
        TranscribeError::SessionProtocol(format!("failed to serialize event: {}", e))
    })?;

    writer.write_all(json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::BufReader;

    #[test]
    fn test_transcript_event_shape() {
        let event = ServerEvent::Transcript {
            transcript: "hello".to_string(),
        };
        let json = event.to_json().expect("should serialize");
        assert_eq!(json, r#"{"type":"transcript","data":{"transcript":"hello"}}"#);
    }

    #[test]
    fn test_error_event_shape() {
        let json = ServerEvent::error("boom").to_json().expect("should serialize");
        assert_eq!(json, r#"{"type":"error","data":{"message":"boom"}}"#);
    }

    #[tokio::test]
    async fn test_read_frame_with_payload() {
        let wire = b"{\"type\":\"chunk\",\"payload_length\":4}\nabcd{\"type\":\"stop\"}\n".to_vec();
        let mut reader = BufReader::new(&wire[..]);

        let chunk = read_frame(&mut reader).await.unwrap().unwrap();
        assert_eq!(ClientEvent::from(chunk), ClientEvent::Chunk(b"abcd".to_vec()));

        let stop = read_frame(&mut reader).await.unwrap().unwrap();
        assert_eq!(ClientEvent::from(stop), ClientEvent::Stop);

        assert!(read_frame(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_frame_rejects_malformed_header() {
        let wire = b"not json\n".to_vec();
        let mut reader = BufReader::new(&wire[..]);

        let err = read_frame(&mut reader).await.unwrap_err();
        assert!(matches!(err, TranscribeError::SessionProtocol(_)));
    }

    #[tokio::test]
    async fn test_read_frame_rejects_oversized_payload() {
        let wire = format!("{{\"type\":\"chunk\",\"payload_length\":{}}}\n", MAX_PAYLOAD_BYTES + 1);
        let mut reader = BufReader::new(wire.as_bytes());

        let err = read_frame(&mut reader).await.unwrap_err();
        assert!(matches!(err, TranscribeError::SessionProtocol(_)));
    }

    #[tokio::test]
    async fn test_read_frame_rejects_overlong_header() {
        let wire = vec![b'x'; MAX_HEADER_BYTES + 10];
        let mut reader = BufReader::new(&wire[..]);

        let err = read_frame(&mut reader).await.unwrap_err();
        assert!(matches!(err, TranscribeError::SessionProtocol(_)));
    }

    #[tokio::test]
    async fn test_read_frame_rejects_non_utf8_header() {
        let wire = b"\xff\xfe\n".to_vec();
        let mut reader = BufReader::new(&wire[..]);

        let err = read_frame(&mut reader).await.unwrap_err();
        assert!(matches!(err, TranscribeError::SessionProtocol(_)));
    }

    #[tokio::test]
    async fn test_underscore_event_names() {
        let wire = b"{\"type\":\"audio_start\"}\n{\"type\":\"audio_chunk\",\"payload_length\":2}\nab{\"type\":\"audio_stop\"}\n".to_vec();
        let mut reader = BufReader::new(&wire[..]);

        let mut events = Vec::new();
        while let Some(frame) = read_frame(&mut reader).await.unwrap() {
            events.push(ClientEvent::from(frame));
        }
        assert_eq!(
            events,
            vec![
                ClientEvent::Start,
                ClientEvent::Chunk(b"ab".to_vec()),
                ClientEvent::Stop
            ]
        );
    }

    #[test]
    fn test_unknown_type_is_passthrough() {
        let frame = Frame {
            header: FrameHeader {
                kind: "describe".to_string(),
                data: None,
                payload_length: None,
            },
            raw_header: r#"{"type":"describe"}"#.to_string(),
            payload: Vec::new(),
        };
        assert!(matches!(ClientEvent::from(frame), ClientEvent::Passthrough(_)));
    }
}
