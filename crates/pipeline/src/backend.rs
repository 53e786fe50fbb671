//! Synthesis backend seam
//!
//! The neural model lives behind this trait; the pipeline never sees more
//! than "one unit of text in, one waveform out". Backend failures propagate
//! unchanged.

use async_trait::async_trait;

use voicelab_core::{AudioChunk, Result};

/// One bounded chunk of plain text handed to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisUnit {
    /// Plain text within the configured character budget
    pub text: String,
    /// Natural-language style instruction, when any style was requested
    pub style: Option<String>,
    /// Language code passed through to the backend
    pub language: String,
}

/// Synthesis backend trait
#[async_trait]
pub trait SynthesisBackend: Send + Sync {
    /// Synthesize one unit into a mono waveform
    async fn synthesize(&self, unit: &SynthesisUnit) -> Result<AudioChunk>;

    /// Native output sample rate
    fn sample_rate(&self) -> u32;
}
