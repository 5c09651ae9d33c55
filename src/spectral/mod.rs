//! Spectral estimation layer
//!
//! Computes the two estimates the plot is built from:
//! - a Welch PSD over the whole waveform (5-second Hann segments)
//! - a spectrogram of 1-second Tukey segments
//!
//! Inputs shorter than one segment are not rejected: the segment length is
//! clamped to the input length and a warning is logged.

mod periodogram;
mod spectrogram;
mod welch;
mod window;

pub use spectrogram::{spectrogram, Spectrogram};
pub use welch::{welch, Psd};
pub use window::WindowFunction;

use thiserror::Error;

/// Seconds of signal per Welch segment
pub const PSD_SEGMENT_SECONDS: f64 = 5.0;
/// Seconds of signal per spectrogram segment
pub const SPECTROGRAM_SEGMENT_SECONDS: f64 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    #[error("waveform is empty")]
    EmptyInput,

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("segment length must be at least one sample")]
    EmptySegment,
}

/// Samples in a `seconds`-long segment at `fs`
pub fn segment_len(fs: f64, seconds: f64) -> usize {
    (fs * seconds).round() as usize
}

/// Validate estimator input and return the segment length to use
fn check_input(
    samples: &[f64],
    fs: f64,
    nperseg: usize,
    estimator: &str,
) -> Result<usize, SpectralError> {
    if !(fs.is_finite() && fs > 0.0) {
        return Err(SpectralError::InvalidSampleRate(fs));
    }
    if samples.is_empty() {
        return Err(SpectralError::EmptyInput);
    }
    if nperseg == 0 {
        return Err(SpectralError::EmptySegment);
    }

    if nperseg > samples.len() {
        log::warn!(
            "{}: segment length {} exceeds waveform length {}, using {}",
            estimator,
            nperseg,
            samples.len(),
            samples.len()
        );
        return Ok(samples.len());
    }

    Ok(nperseg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_len() {
        assert_eq!(segment_len(1024.0, PSD_SEGMENT_SECONDS), 5120);
        assert_eq!(segment_len(1024.0, SPECTROGRAM_SEGMENT_SECONDS), 1024);
        assert_eq!(segment_len(0.05, 1.0), 0);
    }

    #[test]
    fn test_check_input() {
        assert_eq!(check_input(&[0.0; 10], 1.0, 4, "test"), Ok(4));
        assert_eq!(check_input(&[0.0; 10], 1.0, 40, "test"), Ok(10));
        assert_eq!(
            check_input(&[0.0; 10], 1.0, 0, "test"),
            Err(SpectralError::EmptySegment)
        );
        assert_eq!(
            check_input(&[0.0; 10], f64::NAN, 4, "test").unwrap_err().to_string(),
            "sample rate must be positive and finite, got NaN"
        );
    }
}
