//! Style approximation DSP
//!
//! Deterministic transforms approximating a requested speaking style when the
//! synthesis backend does not honor style natively. Fixed stage order: pitch
//! shift, then time stretch, then gain, then a hard limiter. Stretching after
//! the pitch shift avoids re-introducing pitch artifacts from resampling, and
//! the limiter runs last to bound overshoot from the gain stage.
//!
//! All stages keep 32-bit float samples end to end.

use std::f32::consts::PI;

use realfft::RealFftPlanner;
use rustfft::num_complex::Complex;

use voicelab_core::{AudioChunk, Emphasis, Rate};

/// Hard limiter ceiling; compounded gain/pitch/stretch cannot exceed it
pub const LIMITER_CEILING: f32 = 0.99;

/// Buffers shorter than this skip stretch and pitch entirely; overlap-add
/// processing destabilizes on very short inputs
const MIN_STYLE_SECS: f64 = 0.01;

const FRAME_SIZE: usize = 2048;
const HOP_SIZE: usize = 512;

/// Convert a decibel value to a linear gain factor
pub fn db_to_gain(db: f32) -> f32 {
    10f32.powf(db / 20.0)
}

/// Scale samples by a decibel gain in place
pub fn apply_gain(samples: &mut [f32], db: f32) {
    if db == 0.0 {
        return;
    }
    let gain = db_to_gain(db);
    for sample in samples.iter_mut() {
        *sample *= gain;
    }
}

/// Clamp samples to ±`ceiling` in place
pub fn apply_limiter(samples: &mut [f32], ceiling: f32) {
    for sample in samples.iter_mut() {
        *sample = sample.clamp(-ceiling, ceiling);
    }
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (size - 1) as f32).cos()))
        .collect()
}

fn wrap_phase(mut phase: f32) -> f32 {
    while phase > PI {
        phase -= 2.0 * PI;
    }
    while phase < -PI {
        phase += 2.0 * PI;
    }
    phase
}

/// Phase-vocoder time stretch
///
/// `rate` > 1.0 speeds playback up (shorter output), `rate` < 1.0 slows it
/// down; output length is roughly `len / rate`. Inputs shorter than one
/// analysis frame pass through unchanged.
pub fn time_stretch(samples: &[f32], rate: f32) -> Vec<f32> {
    if samples.len() < FRAME_SIZE || (rate - 1.0).abs() < f32::EPSILON || rate <= 0.0 {
        return samples.to_vec();
    }

    let input_hop = ((HOP_SIZE as f32 * rate).round() as usize).max(1);
    let output_hop = HOP_SIZE;
    let window = hann_window(FRAME_SIZE);
    let out_len = (samples.len() as f32 / rate) as usize;

    let mut output = vec![0.0f32; out_len + FRAME_SIZE];
    let mut window_sum = vec![0.0f32; out_len + FRAME_SIZE];
    let mut last_phase = vec![0.0f32; FRAME_SIZE / 2 + 1];
    let mut phase_acc = vec![0.0f32; FRAME_SIZE / 2 + 1];

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(FRAME_SIZE);
    let ifft = planner.plan_fft_inverse(FRAME_SIZE);

    let mut input_pos = 0;
    let mut output_pos = 0;

    while input_pos + FRAME_SIZE <= samples.len() {
        let mut frame: Vec<f32> = samples[input_pos..input_pos + FRAME_SIZE]
            .iter()
            .zip(&window)
            .map(|(&s, &w)| s * w)
            .collect();

        let mut spectrum = fft.make_output_vec();
        if fft.process(&mut frame, &mut spectrum).is_err() {
            break;
        }

        for (i, bin) in spectrum.iter_mut().enumerate() {
            let magnitude = bin.norm();
            let phase = bin.arg();

            // instantaneous frequency from the phase advance over the
            // analysis hop, re-accumulated at the synthesis hop
            let bin_freq = 2.0 * PI * i as f32 / FRAME_SIZE as f32;
            let expected = bin_freq * input_hop as f32;
            let deviation = wrap_phase(phase - last_phase[i] - expected);
            last_phase[i] = phase;

            let true_freq = bin_freq + deviation / input_hop as f32;
            phase_acc[i] = wrap_phase(phase_acc[i] + true_freq * output_hop as f32);

            *bin = Complex::from_polar(magnitude, phase_acc[i]);
        }
        // the real inverse transform needs purely real DC and Nyquist bins
        spectrum[0].im = 0.0;
        let nyquist = spectrum.len() - 1;
        spectrum[nyquist].im = 0.0;

        let mut time_frame = ifft.make_output_vec();
        if ifft.process(&mut spectrum, &mut time_frame).is_err() {
            break;
        }

        for (i, &sample) in time_frame.iter().enumerate() {
            let idx = output_pos + i;
            if idx < output.len() {
                // the inverse transform is unnormalized
                output[idx] += sample / FRAME_SIZE as f32 * window[i];
                window_sum[idx] += window[i] * window[i];
            }
        }

        input_pos += input_hop;
        output_pos += output_hop;
    }

    for (sample, weight) in output.iter_mut().zip(&window_sum) {
        if *weight > 1e-6 {
            *sample /= *weight;
        }
    }
    output.truncate(out_len);
    output
}

/// FFT-domain pitch shift by a number of semitones, preserving duration
///
/// Spectrum bins are remapped by the frequency ratio `2^(semitones/12)` frame
/// by frame with overlap-add resynthesis. Inputs shorter than one analysis
/// frame pass through unchanged.
pub fn pitch_shift(samples: &[f32], semitones: f32) -> Vec<f32> {
    if samples.len() < FRAME_SIZE || semitones == 0.0 {
        return samples.to_vec();
    }

    let ratio = 2f32.powf(semitones / 12.0);
    let window = hann_window(FRAME_SIZE);

    let mut output = vec![0.0f32; samples.len() + FRAME_SIZE];
    let mut window_sum = vec![0.0f32; samples.len() + FRAME_SIZE];

    let mut planner = RealFftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(FRAME_SIZE);
    let ifft = planner.plan_fft_inverse(FRAME_SIZE);

    let mut pos = 0;
    while pos + FRAME_SIZE <= samples.len() {
        let mut frame: Vec<f32> = samples[pos..pos + FRAME_SIZE]
            .iter()
            .zip(&window)
            .map(|(&s, &w)| s * w)
            .collect();

        let mut spectrum = fft.make_output_vec();
        if fft.process(&mut frame, &mut spectrum).is_err() {
            break;
        }

        let mut shifted = vec![Complex::new(0.0f32, 0.0f32); spectrum.len()];
        for (i, bin) in spectrum.iter().enumerate() {
            let j = (i as f32 * ratio).round() as usize;
            if j < shifted.len() {
                shifted[j] += *bin;
            }
        }
        // the real inverse transform needs purely real DC and Nyquist bins
        shifted[0].im = 0.0;
        let nyquist = shifted.len() - 1;
        shifted[nyquist].im = 0.0;

        let mut time_frame = ifft.make_output_vec();
        if ifft.process(&mut shifted, &mut time_frame).is_err() {
            break;
        }

        for (i, &sample) in time_frame.iter().enumerate() {
            let idx = pos + i;
            if idx < output.len() {
                output[idx] += sample / FRAME_SIZE as f32 * window[i];
                window_sum[idx] += window[i] * window[i];
            }
        }

        pos += HOP_SIZE;
    }

    for (sample, weight) in output.iter_mut().zip(&window_sum) {
        if *weight > 1e-6 {
            *sample /= *weight;
        }
    }
    output.truncate(samples.len());
    output
}

/// Approximate a requested speaking style with signal transforms
///
/// Slow speech stretches time, fast speech compresses it; emphasis adds a
/// smaller stretch plus gain and a slight upward pitch shift. Inputs below
/// ~10 ms skip stretch and pitch and only pass through gain and the limiter.
pub fn apply_style(
    chunk: &AudioChunk,
    rate: Option<Rate>,
    emphasis: Option<Emphasis>,
) -> AudioChunk {
    let mut stretch_factor = 1.0f32;
    let mut gain_db = 0.0f32;
    let mut pitch_steps = 0.0f32;

    match rate {
        Some(Rate::Slow) => stretch_factor *= 1.15,
        Some(Rate::Fast) => stretch_factor *= 0.87,
        None => {}
    }
    match emphasis {
        Some(Emphasis::Moderate) => {
            stretch_factor *= 1.05;
            gain_db += 2.0;
            pitch_steps += 0.5;
        }
        Some(Emphasis::Strong) => {
            stretch_factor *= 1.10;
            gain_db += 4.0;
            pitch_steps += 1.0;
        }
        None => {}
    }

    let mut samples = chunk.samples.clone();
    if chunk.duration_secs() >= MIN_STYLE_SECS {
        if pitch_steps != 0.0 {
            samples = pitch_shift(&samples, pitch_steps);
        }
        if (stretch_factor - 1.0).abs() > f32::EPSILON {
            // factor > 1 slows playback, so the stretch rate is its inverse
            samples = time_stretch(&samples, 1.0 / stretch_factor);
        }
    }
    apply_gain(&mut samples, gain_db);
    apply_limiter(&mut samples, LIMITER_CEILING);
    AudioChunk::new(samples, chunk.sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine_wave(freq: f32, sample_rate: u32, duration: f32) -> Vec<f32> {
        let count = (sample_rate as f32 * duration) as usize;
        (0..count)
            .map(|i| (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
    }

    #[test]
    fn test_db_to_gain() {
        assert!((db_to_gain(0.0) - 1.0).abs() < 1e-6);
        assert!((db_to_gain(20.0) - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_limiter_bounds_samples() {
        let mut samples = vec![1.5, -2.0, 0.5];
        apply_limiter(&mut samples, LIMITER_CEILING);
        assert_eq!(samples, vec![0.99, -0.99, 0.5]);
    }

    #[test]
    fn test_time_stretch_changes_length() {
        let audio = sine_wave(440.0, 24000, 0.5);
        let slower = time_stretch(&audio, 0.8);
        assert!(slower.len() > audio.len());
        let faster = time_stretch(&audio, 1.25);
        assert!(faster.len() < audio.len());
    }

    #[test]
    fn test_pitch_shift_preserves_length() {
        let audio = sine_wave(440.0, 24000, 0.5);
        let shifted = pitch_shift(&audio, 2.0);
        assert_eq!(shifted.len(), audio.len());
    }

    #[test]
    fn test_apply_style_slow_moderate_louder_and_longer() {
        let sample_rate = 24000;
        let audio = AudioChunk::new(sine_wave(440.0, sample_rate, 0.5), sample_rate);
        let baseline = rms(&audio.samples);
        let styled = apply_style(&audio, Some(Rate::Slow), Some(Emphasis::Moderate));
        assert!(rms(&styled.samples) > baseline);
        assert!(styled.len() > audio.len());
    }

    #[test]
    fn test_apply_style_output_bounded_for_all_combinations() {
        let sample_rate = 24000;
        let audio = AudioChunk::new(sine_wave(330.0, sample_rate, 0.3), sample_rate);
        let rates = [None, Some(Rate::Slow), Some(Rate::Fast)];
        let emphases = [None, Some(Emphasis::Moderate), Some(Emphasis::Strong)];
        for rate in rates {
            for emphasis in emphases {
                let styled = apply_style(&audio, rate, emphasis);
                for &sample in &styled.samples {
                    assert!(sample.is_finite());
                    assert!(sample.abs() <= LIMITER_CEILING + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_apply_style_degenerate_input_skips_stretch() {
        let sample_rate = 24000;
        // below 10 ms: only gain and limiter may touch it
        let audio = AudioChunk::new(vec![0.1; 100], sample_rate);
        let styled = apply_style(&audio, Some(Rate::Slow), Some(Emphasis::Strong));
        assert_eq!(styled.len(), audio.len());
    }
}
