//! Error types for the synthesis core

use thiserror::Error;

/// Synthesis core errors
///
/// Malformed markup never appears here: unbalanced, unknown, or unsupported
/// tags degrade to "strip and continue" at parse time. The only
/// parse-originated rejection is an unrecognized break duration.
#[derive(Debug, Error, Clone)]
pub enum Error {
    /// Break time attribute with an unrecognized format
    #[error("Malformed break duration: {value}")]
    MalformedDuration { value: String },

    /// Synthesis backend failure, propagated unchanged
    #[error("Backend error: {0}")]
    Backend(String),

    /// Audio processing error (resampling, framing)
    #[error("Audio error: {0}")]
    Audio(String),

    /// File output error
    #[error("IO error: {0}")]
    Io(String),

    /// Streaming consumer disconnected
    #[error("Channel closed")]
    ChannelClosed,
}

/// Result type for the synthesis core
pub type Result<T> = std::result::Result<T, Error>;
