//! Waveform assembly
//!
//! Joins independently synthesized chunks into one continuous signal and
//! generates pause silence. Chunk boundaries are blended with linear
//! crossfades; a linear (not equal-power) fade dips slightly in loudness at
//! the midpoint, which is expected, not a defect.

/// Generate a silence waveform for a pause request
pub fn silence(sample_rate: u32, seconds: f64) -> Vec<f32> {
    if seconds <= 0.0 {
        return Vec::new();
    }
    let samples = (sample_rate as f64 * seconds).round() as usize;
    vec![0.0; samples]
}

/// Stitch ordered chunks at one sample rate into a single waveform
///
/// Boundaries where either edge is shorter than the fade window fall back to
/// plain concatenation; a boundary never fails and never drops audio. Very
/// short chunks can therefore produce an audible seam, which callers accept
/// in exchange for a predictable output length.
pub fn stitch_chunks(chunks: &[Vec<f32>], sample_rate: u32, crossfade_ms: u32) -> Vec<f32> {
    if chunks.is_empty() {
        return Vec::new();
    }
    if chunks.len() == 1 {
        return chunks[0].clone();
    }

    let fade_samples = (sample_rate as usize * crossfade_ms as usize) / 1000;
    let mut output = chunks[0].clone();
    for chunk in &chunks[1..] {
        if fade_samples == 0 || chunk.len() < fade_samples || output.len() < fade_samples {
            output.extend_from_slice(chunk);
            continue;
        }

        let tail_start = output.len() - fade_samples;
        for i in 0..fade_samples {
            let t = if fade_samples > 1 {
                i as f32 / (fade_samples - 1) as f32
            } else {
                0.0
            };
            let fade_out = 1.0 - t;
            let fade_in = t;
            output[tail_start + i] = output[tail_start + i] * fade_out + chunk[i] * fade_in;
        }
        output.extend_from_slice(&chunk[fade_samples..]);
    }
    output
}
