//! Audio assembly for the VoiceLab synthesis pipeline
//!
//! Everything between "one waveform per synthesis unit" and "one continuous
//! signal a caller can play, save, or stream":
//! - Style approximation DSP (pitch, stretch, gain, limiter)
//! - Crossfade stitching and pause silence
//! - Mono resampling
//! - Fixed-duration PCM frame slicing
//! - WAV file output

pub mod dsp;
pub mod frame;
pub mod resample;
pub mod stitch;
pub mod wav;

pub use dsp::{apply_style, LIMITER_CEILING};
pub use frame::{frame_samples, pcm16_bytes, FrameStream, PcmFrame, FRAME_SECS};
pub use resample::resample;
pub use stitch::{silence, stitch_chunks};
pub use wav::write_wav;
