//! Synthesis and streaming configuration

use serde::{Deserialize, Serialize};

/// Synthesis pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Character budget per synthesis unit
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,

    /// Crossfade duration between stitched chunks (ms)
    #[serde(default = "default_crossfade")]
    pub crossfade_ms: u32,

    /// Default output sample rate
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Parse markup tags in request text
    #[serde(default = "default_true")]
    pub enable_markup: bool,
}

fn default_max_chunk_chars() -> usize {
    400
}
fn default_crossfade() -> u32 {
    50
}
fn default_sample_rate() -> u32 {
    24000
}
fn default_true() -> bool {
    true
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
            crossfade_ms: default_crossfade(),
            sample_rate: default_sample_rate(),
            enable_markup: true,
        }
    }
}

/// Real-time frame delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Sleep for each frame's playback duration between sends
    ///
    /// Pacing is a delivery policy, not a framing requirement; disable it
    /// for offline consumers that want the frames as fast as possible.
    #[serde(default = "default_true")]
    pub paced: bool,

    /// Frame channel capacity
    #[serde(default = "default_queue_depth")]
    pub queue_depth: usize,
}

fn default_queue_depth() -> usize {
    8
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            paced: true,
            queue_depth: default_queue_depth(),
        }
    }
}
