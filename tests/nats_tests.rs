use base64::Engine;
use loqa_transcriber::engine::{RecognitionReply, RecognitionRequest};
use loqa_transcriber::{EngineOutput, EngineSegment};

#[test]
fn test_recognition_request_serialization() {
    let msg = RecognitionRequest {
        request_id: "req-1".to_string(),
        pcm: base64::engine::general_purpose::STANDARD.encode([0u8; 100]),
        sample_rate: 16000,
        timestamp: "2025-10-27T14:30:00Z".to_string(),
    };

    let json = serde_json::to_string(&msg).unwrap();
    assert!(json.contains("req-1"));
    assert!(json.contains("16000"));

    let deserialized: RecognitionRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized.request_id, "req-1");
    assert_eq!(deserialized.sample_rate, 16000);
}

#[test]
fn test_plain_string_reply() {
    let reply: RecognitionReply = serde_json::from_str(r#""hello world""#).unwrap();

    assert_eq!(
        EngineOutput::from(reply),
        EngineOutput::Text("hello world".to_string())
    );
}

#[test]
fn test_reply_with_segments() {
    let json = r#"{
        "text": "Hello world",
        "segments": [
            {"start": 0.0, "end": 0.6, "text": "Hello"},
            {"start": 0.7, "end": 1.2, "segment": "world"}
        ]
    }"#;

    let reply: RecognitionReply = serde_json::from_str(json).unwrap();
    assert_eq!(
        EngineOutput::from(reply),
        EngineOutput::Timed {
            text: "Hello world".to_string(),
            segments: Some(vec![
                EngineSegment {
                    start: 0.0,
                    end: 0.6,
                    text: "Hello".to_string(),
                },
                EngineSegment {
                    start: 0.7,
                    end: 1.2,
                    text: "world".to_string(),
                },
            ]),
        }
    );
}

#[test]
fn test_reply_with_transcript_field_and_no_segments() {
    let json = r#"{"transcript": "No timestamps here"}"#;

    let reply: RecognitionReply = serde_json::from_str(json).unwrap();
    assert_eq!(
        EngineOutput::from(reply),
        EngineOutput::Timed {
            text: "No timestamps here".to_string(),
            segments: None,
        }
    );
}

#[test]
fn test_malformed_reply_is_rejected() {
    let result = serde_json::from_str::<RecognitionReply>(r#"{"segments": []}"#);
    assert!(result.is_err());
}
