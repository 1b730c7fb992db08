//! Streaming session management
//!
//! This module provides the `SessionManager` that owns, per client:
//! - The session lifecycle (start, chunk, stop/abort)
//! - The raw audio buffer accumulated between start and stop
//! - Session statistics for status queries

mod manager;
mod session;
mod stats;

pub use manager::SessionManager;
pub use session::{ClientId, SessionState};
pub use stats::SessionStats;
