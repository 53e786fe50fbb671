//! Offline render and real-time streaming
//!
//! Drives a synthesis plan against the backend and assembles the per-unit
//! waveforms into one continuous signal, then optionally slices it into paced
//! PCM frames for progressive delivery.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use voicelab_audio::{
    apply_style, resample, silence, stitch_chunks, write_wav, FrameStream, PcmFrame,
};
use voicelab_config::{StreamConfig, SynthesisConfig};
use voicelab_core::{AudioChunk, Result};

use crate::backend::SynthesisBackend;
use crate::planner::{plan_request, PlanStep, SynthesisRequest};

/// Handle for stopping an in-flight frame stream
///
/// Raising the flag stops the paced sender before its next frame; dropping
/// the receiving end of the frame channel has the same effect.
#[derive(Debug, Clone, Default)]
pub struct StreamHandle {
    stopped: Arc<Mutex<bool>>,
}

impl StreamHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the stream stop issuing frames
    pub fn stop(&self) {
        *self.stopped.lock() = true;
    }

    /// True once a stop was requested
    pub fn is_stopped(&self) -> bool {
        *self.stopped.lock()
    }
}

/// Synthesis orchestrator over an opaque backend
#[derive(Clone)]
pub struct Synthesizer {
    backend: Arc<dyn SynthesisBackend>,
    config: SynthesisConfig,
}

impl Synthesizer {
    pub fn new(backend: Arc<dyn SynthesisBackend>, config: SynthesisConfig) -> Self {
        Self { backend, config }
    }

    /// Render a full request to one continuous waveform
    ///
    /// The stitched signal keeps the rate of its first synthesized chunk and
    /// is resampled only when the request asks for a different rate.
    pub async fn render(&self, request: &SynthesisRequest) -> Result<AudioChunk> {
        let plan = plan_request(request, &self.config)?;
        debug!(units = plan.unit_count(), steps = plan.steps.len(), "planned request");

        let mut chunks: Vec<Vec<f32>> = Vec::with_capacity(plan.steps.len());
        let mut sample_rate = self.backend.sample_rate();
        for step in &plan.steps {
            match step {
                PlanStep::Speak(unit) => {
                    let chunk = self.backend.synthesize(unit).await?;
                    sample_rate = chunk.sample_rate;
                    debug!(samples = chunk.len(), text_len = unit.text.len(), "synthesized unit");
                    chunks.push(chunk.samples);
                }
                PlanStep::Pause(seconds) => {
                    chunks.push(silence(sample_rate, *seconds));
                }
            }
        }

        let mut samples = stitch_chunks(&chunks, sample_rate, self.config.crossfade_ms);
        debug!(samples = samples.len(), sample_rate, "stitched waveform");

        if request.rate.is_some() || request.emphasis.is_some() {
            let styled = apply_style(
                &AudioChunk::new(samples, sample_rate),
                request.rate,
                request.emphasis,
            );
            samples = styled.samples;
        }

        if sample_rate != request.sample_rate {
            samples = resample(&samples, sample_rate, request.sample_rate)?;
            sample_rate = request.sample_rate;
        }

        Ok(AudioChunk::new(samples, sample_rate))
    }

    /// Render a full request and write it as a 16-bit WAV file
    pub async fn render_to_wav(&self, request: &SynthesisRequest, path: &Path) -> Result<AudioChunk> {
        let audio = self.render(request).await?;
        write_wav(path, &audio.samples, audio.sample_rate)?;
        Ok(audio)
    }

    /// Stream a request as PCM frames into the given channel
    ///
    /// With pacing enabled each frame send is followed by a sleep of the
    /// frame's nominal playback duration, so consumers see roughly real-time
    /// arrival. The loop stops promptly when the handle is stopped or the
    /// receiver is dropped; it never runs to completion in the background.
    pub async fn stream(
        &self,
        request: &SynthesisRequest,
        stream_config: &StreamConfig,
        tx: mpsc::Sender<PcmFrame>,
        handle: StreamHandle,
    ) -> Result<()> {
        let audio = self.render(request).await?;
        let frames = FrameStream::new(&audio.samples, audio.sample_rate);
        for frame in frames {
            if handle.is_stopped() {
                debug!("frame stream stopped by handle");
                break;
            }
            let pause = frame.duration;
            if tx.send(frame).await.is_err() {
                debug!("frame consumer disconnected");
                break;
            }
            if stream_config.paced {
                tokio::time::sleep(pause).await;
            }
        }
        Ok(())
    }

    /// Spawn a streaming task and return its frame channel and stop handle
    pub fn start_stream(
        &self,
        request: SynthesisRequest,
        stream_config: StreamConfig,
    ) -> (mpsc::Receiver<PcmFrame>, StreamHandle) {
        let (tx, rx) = mpsc::channel(stream_config.queue_depth.max(1));
        let handle = StreamHandle::new();
        let synthesizer = self.clone();
        let task_handle = handle.clone();
        tokio::spawn(async move {
            if let Err(err) = synthesizer
                .stream(&request, &stream_config, tx, task_handle)
                .await
            {
                warn!(error = %err, "streaming synthesis failed");
            }
        });
        (rx, handle)
    }
}
