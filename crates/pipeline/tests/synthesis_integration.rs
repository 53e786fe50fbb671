//! Integration tests for the synthesis pipeline (plan -> backend -> assembly)
//!
//! These tests drive the full flow with a deterministic in-memory backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use voicelab_audio::{frame_samples, pcm16_bytes};
use voicelab_config::{StreamConfig, SynthesisConfig};
use voicelab_core::{AudioChunk, Error, Result};
use voicelab_pipeline::{
    StreamHandle, SynthesisBackend, SynthesisRequest, SynthesisUnit, Synthesizer,
};

const SAMPLE_RATE: u32 = 24000;

/// Backend that returns a fixed-length constant waveform per unit
struct ConstantBackend {
    unit_samples: usize,
}

#[async_trait]
impl SynthesisBackend for ConstantBackend {
    async fn synthesize(&self, _unit: &SynthesisUnit) -> Result<AudioChunk> {
        Ok(AudioChunk::new(vec![0.5; self.unit_samples], SAMPLE_RATE))
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }
}

/// Backend that always fails
struct FailingBackend;

#[async_trait]
impl SynthesisBackend for FailingBackend {
    async fn synthesize(&self, _unit: &SynthesisUnit) -> Result<AudioChunk> {
        Err(Error::Backend("model exploded".to_string()))
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }
}

fn synthesizer(unit_samples: usize) -> Synthesizer {
    Synthesizer::new(
        Arc::new(ConstantBackend { unit_samples }),
        SynthesisConfig::default(),
    )
}

#[tokio::test]
async fn test_render_with_break_has_exact_length() {
    // two spoken units of 0.2 s around a 500 ms pause, 50 ms crossfades
    let synth = synthesizer(4800);
    let request = SynthesisRequest::new(r#"Hello <break time="500ms"/> world"#, "en");
    let audio = synth.render(&request).await.unwrap();

    let fade = (SAMPLE_RATE as usize * 50) / 1000;
    let expected = 4800 + 12000 - fade + 4800 - fade;
    assert_eq!(audio.len(), expected);
    assert_eq!(audio.sample_rate, SAMPLE_RATE);
}

#[tokio::test]
async fn test_render_plain_text_is_single_unit() {
    let synth = synthesizer(4800);
    let request = SynthesisRequest::new("Hello world.", "en");
    let audio = synth.render(&request).await.unwrap();
    assert_eq!(audio.len(), 4800);
}

#[tokio::test]
async fn test_render_resamples_to_requested_rate() {
    let synth = synthesizer(24000);
    let mut request = SynthesisRequest::new("One second of speech.", "en");
    request.sample_rate = 16000;
    let audio = synth.render(&request).await.unwrap();
    assert_eq!(audio.sample_rate, 16000);
    assert_eq!(audio.len(), 16000);
}

#[tokio::test]
async fn test_render_propagates_backend_error() {
    let synth = Synthesizer::new(Arc::new(FailingBackend), SynthesisConfig::default());
    let request = SynthesisRequest::new("Hello", "en");
    let err = synth.render(&request).await.unwrap_err();
    assert!(matches!(err, Error::Backend(_)));
}

#[tokio::test]
async fn test_render_rejects_malformed_duration() {
    let synth = synthesizer(4800);
    let request = SynthesisRequest::new(r#"Hello <break time="1x"/>"#, "en");
    let err = synth.render(&request).await.unwrap_err();
    assert!(matches!(err, Error::MalformedDuration { .. }));
}

#[tokio::test]
async fn test_stream_reconstructs_rendered_audio() {
    let synth = synthesizer(4800);
    let request = SynthesisRequest::new("Hello world.", "en");
    let rendered = synth.render(&request).await.unwrap();

    let stream_config = StreamConfig {
        paced: false,
        queue_depth: 4,
    };
    let (mut rx, _handle) = synth.start_stream(request, stream_config);

    let mut rebuilt = Vec::new();
    let mut frame_lens = Vec::new();
    while let Some(frame) = rx.recv().await {
        frame_lens.push(frame.bytes.len());
        rebuilt.extend_from_slice(&frame.bytes);
    }

    assert_eq!(rebuilt, pcm16_bytes(&rendered.samples));
    // every frame but the last carries the nominal byte length
    let nominal = frame_samples(SAMPLE_RATE) * 2;
    for &len in &frame_lens[..frame_lens.len() - 1] {
        assert_eq!(len, nominal);
    }
    assert!(*frame_lens.last().unwrap() <= nominal);
}

#[tokio::test]
async fn test_stream_stops_promptly_on_handle() {
    // 100 frames of audio; stop after the first received frame
    let synth = synthesizer(48000);
    let request = SynthesisRequest::new("Long text", "en");
    let stream_config = StreamConfig {
        paced: false,
        queue_depth: 2,
    };
    let (mut rx, handle) = synth.start_stream(request, stream_config);

    let first = rx.recv().await;
    assert!(first.is_some());
    handle.stop();

    let mut remaining = 0;
    while rx.recv().await.is_some() {
        remaining += 1;
    }
    // at most the frames already queued or in flight slip through
    assert!(remaining <= 4, "expected prompt stop, got {remaining} more frames");
}

#[tokio::test]
async fn test_stream_stops_when_consumer_disconnects() {
    let synth = synthesizer(48000);
    let request = SynthesisRequest::new("Long text", "en");
    let stream_config = StreamConfig {
        paced: false,
        queue_depth: 1,
    };
    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    // the sender notices the closed channel and returns instead of running on
    let result = synth
        .stream(&request, &stream_config, tx, StreamHandle::new())
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_render_to_wav_writes_file() {
    let synth = synthesizer(4800);
    let request = SynthesisRequest::new("Hello world.", "en");
    let path = std::env::temp_dir().join("voicelab_render_test.wav");
    let audio = synth.render_to_wav(&request, &path).await.unwrap();

    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.len() as usize, audio.len());
    assert_eq!(reader.spec().sample_rate, SAMPLE_RATE);
    std::fs::remove_file(&path).ok();
}
