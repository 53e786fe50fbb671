//! Synthesis orchestration for VoiceLab
//!
//! Ties the text and audio stages together around an opaque synthesis
//! backend:
//! - Request planning: markup → pronunciation → bounded synthesis units
//! - Offline render: per-unit synthesis, silence, crossfade stitch, resample
//! - Real-time streaming: paced 20 ms PCM frames with prompt cancellation

mod backend;
mod planner;
mod synthesizer;

pub use backend::{SynthesisBackend, SynthesisUnit};
pub use planner::{plan_request, PlanStep, SynthesisPlan, SynthesisRequest};
pub use synthesizer::{StreamHandle, Synthesizer};
