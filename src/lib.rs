pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod http;
pub mod pipeline;
pub mod session;
pub mod stream;

pub use audio::AudioFile;
pub use config::Config;
pub use engine::{EngineOutput, EngineSegment, MockEngine, NatsEngine, RecognitionEngine};
pub use error::{EngineFailure, Result, TranscribeError};
pub use http::{create_router, AppState};
pub use pipeline::{
    shared_engine, GlobalSegment, Pipeline, SharedEngine, TranscriptResult, WindowParams,
};
pub use session::{ClientId, SessionManager, SessionState, SessionStats};
pub use stream::StreamServer;
