//! Mono resampling
//!
//! Bridges the gap between the backend's native rate and the caller-requested
//! output rate. FFT-based chunked resampling; the tail block is zero-padded
//! and the output trimmed back to the expected length.

use rubato::{FftFixedIn, Resampler};

use voicelab_core::{Error, Result};

const CHUNK: usize = 1024;
const SUB_CHUNKS: usize = 2;

/// Resample mono audio from one rate to another
///
/// Same-rate input is returned unchanged.
pub fn resample(input: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(input.to_vec());
    }
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let mut resampler =
        FftFixedIn::<f32>::new(from_rate as usize, to_rate as usize, CHUNK, SUB_CHUNKS, 1)
            .map_err(|e| Error::Audio(format!("resampler init failed: {e}")))?;

    let expected_len = (input.len() as f64 * to_rate as f64 / from_rate as f64).ceil() as usize;
    let mut out = Vec::with_capacity(expected_len + CHUNK);

    let mut pos = 0;
    while pos < input.len() {
        let end = (pos + CHUNK).min(input.len());
        let chunk_len = end - pos;

        let mut input_chunk = vec![0.0f32; CHUNK];
        input_chunk[..chunk_len].copy_from_slice(&input[pos..end]);

        let block = vec![input_chunk];
        let frames = resampler
            .process(&block, None)
            .map_err(|e| Error::Audio(format!("resample failed: {e}")))?;
        out.extend_from_slice(&frames[0]);

        pos += chunk_len;
        if chunk_len < CHUNK {
            break;
        }
    }

    out.truncate(expected_len);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_length() {
        let input: Vec<f32> = (0..24000)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 24000.0).sin())
            .collect();
        let out = resample(&input, 24000, 16000).unwrap();
        assert_eq!(out.len(), 16000);
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let input = vec![0.25f32; 480];
        assert_eq!(resample(&input, 24000, 24000).unwrap(), input);
    }

    #[test]
    fn test_resample_empty() {
        assert!(resample(&[], 24000, 16000).unwrap().is_empty());
    }
}
