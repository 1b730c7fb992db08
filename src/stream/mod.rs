//! Persistent-connection streaming adapter
//!
//! Clients open a TCP connection and send framed events:
//! - `start` - begin (or restart) buffering audio
//! - `chunk` - raw 16-bit mono PCM as the frame payload
//! - `stop` - transcribe the buffered audio and reply with a transcript or error event
//!
//! Any other frame is echoed back unmodified.

pub mod protocol;
mod server;

pub use protocol::{ClientEvent, Frame, FrameHeader, ServerEvent};
pub use server::StreamServer;
