//! Welch power spectral density estimate
//!
//! Averages Hann-windowed periodograms over half-overlapping segments.

use super::periodogram::Periodogram;
use super::window::WindowFunction;
use super::{check_input, SpectralError};
use serde::Serialize;

/// Averaged power spectral density
#[derive(Debug, Clone, Serialize)]
pub struct Psd {
    /// Bin frequencies in Hz, DC to Nyquist
    pub frequencies: Vec<f64>,

    /// Power spectral density in V^2/Hz
    pub density: Vec<f64>,

    /// Segment length actually used
    pub nperseg: usize,

    /// Number of segments averaged
    pub segments: usize,
}

impl Psd {
    /// Amplitude spectral density, `sqrt(density)`
    pub fn amplitude(&self) -> Vec<f64> {
        self.density.iter().map(|p| p.sqrt()).collect()
    }

    /// Frequency and density of the strongest bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.density
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, &p)| (self.frequencies[i], p))
    }
}

/// Welch PSD of `samples` with `nperseg`-sample segments and 50% overlap
pub fn welch(samples: &[f64], fs: f64, nperseg: usize) -> Result<Psd, SpectralError> {
    let nperseg = check_input(samples, fs, nperseg, "welch")?;
    let noverlap = nperseg / 2;

    let periodogram = Periodogram::new(nperseg, WindowFunction::Hann, fs);
    let mut accumulated = vec![0.0f64; periodogram.num_bins()];
    let mut segments = 0usize;

    for start in periodogram.segment_starts(samples.len(), noverlap) {
        let density = periodogram.density(&samples[start..start + nperseg]);
        for (acc, p) in accumulated.iter_mut().zip(density) {
            *acc += p;
        }
        segments += 1;
    }

    for acc in accumulated.iter_mut() {
        *acc /= segments.max(1) as f64;
    }

    log::debug!(
        "Welch PSD: nperseg={}, noverlap={}, segments={}, bins={}",
        nperseg,
        noverlap,
        segments,
        accumulated.len()
    );

    Ok(Psd {
        frequencies: periodogram.frequencies(fs),
        density: accumulated,
        nperseg,
        segments,
    })
}
