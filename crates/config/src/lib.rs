//! Configuration for the VoiceLab synthesis pipeline

mod synthesis;

pub use synthesis::{StreamConfig, SynthesisConfig};
