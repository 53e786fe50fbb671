//! PCM frame slicing
//!
//! Re-slices a stitched waveform into fixed-duration blocks of little-endian
//! signed 16-bit PCM for progressive delivery. The sequence is finite and not
//! restartable; only the final frame may be shorter than the nominal length.
//! Pacing the delivery is the caller's policy, so each frame carries its
//! nominal playback duration.

use std::time::Duration;

/// Nominal frame duration in seconds (20 ms)
pub const FRAME_SECS: f64 = 0.02;

/// One block of little-endian i16 PCM with its nominal playback duration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcmFrame {
    pub bytes: Vec<u8>,
    pub duration: Duration,
}

/// Convert f32 samples to little-endian i16 bytes, clipping to ±1.0 first
pub fn pcm16_bytes(samples: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * 32767.0) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

/// Samples per nominal frame at the given rate
pub fn frame_samples(sample_rate: u32) -> usize {
    ((sample_rate as f64 * FRAME_SECS).round() as usize).max(1)
}

/// Lazily produced, finite sequence of PCM frames over one waveform
pub struct FrameStream {
    raw: Vec<u8>,
    frame_bytes: usize,
    frame_duration: Duration,
    pos: usize,
}

impl FrameStream {
    pub fn new(samples: &[f32], sample_rate: u32) -> Self {
        let samples_per_frame = frame_samples(sample_rate);
        Self {
            raw: pcm16_bytes(samples),
            frame_bytes: samples_per_frame * 2,
            frame_duration: Duration::from_secs_f64(
                samples_per_frame as f64 / sample_rate as f64,
            ),
            pos: 0,
        }
    }

    /// Nominal frame length in bytes
    pub fn frame_bytes(&self) -> usize {
        self.frame_bytes
    }

    /// Nominal playback duration of one frame
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}

impl Iterator for FrameStream {
    type Item = PcmFrame;

    fn next(&mut self) -> Option<PcmFrame> {
        if self.pos >= self.raw.len() {
            return None;
        }
        let end = (self.pos + self.frame_bytes).min(self.raw.len());
        let frame = PcmFrame {
            bytes: self.raw[self.pos..end].to_vec(),
            duration: self.frame_duration,
        };
        self.pos = end;
        Some(frame)
    }
}
