//! Windowed, detrended, density-scaled periodogram of a single segment
//!
//! Shared by the Welch and spectrogram estimators. Output is one-sided:
//! `nperseg / 2 + 1` bins from DC to Nyquist.

use super::window::WindowFunction;
use rustfft::num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

pub(crate) struct Periodogram {
    nperseg: usize,
    window: Vec<f64>,
    scale: f64,
    fft: Arc<dyn Fft<f64>>,
}

impl Periodogram {
    pub fn new(nperseg: usize, window: WindowFunction, fs: f64) -> Self {
        let window = window.generate(nperseg);
        let energy: f64 = window.iter().map(|w| w * w).sum();
        let fft = FftPlanner::new().plan_fft_forward(nperseg);

        Self {
            nperseg,
            window,
            // A one-sample Hann window is all zeros
            scale: if energy > 0.0 { 1.0 / (fs * energy) } else { 0.0 },
            fft,
        }
    }

    pub fn num_bins(&self) -> usize {
        self.nperseg / 2 + 1
    }

    /// Bin centre frequencies in Hz
    pub fn frequencies(&self, fs: f64) -> Vec<f64> {
        let resolution = fs / self.nperseg as f64;
        (0..self.num_bins()).map(|k| k as f64 * resolution).collect()
    }

    /// Start offsets of every full segment in a signal of `len` samples
    pub fn segment_starts(&self, len: usize, noverlap: usize) -> impl Iterator<Item = usize> {
        let step = (self.nperseg - noverlap).max(1);
        let count = if len >= self.nperseg {
            (len - self.nperseg) / step + 1
        } else {
            0
        };
        (0..count).map(move |k| k * step)
    }

    /// One-sided power spectral density of `segment` (V^2/Hz)
    ///
    /// `segment.len()` must equal `nperseg`.
    pub fn density(&self, segment: &[f64]) -> Vec<f64> {
        debug_assert_eq!(segment.len(), self.nperseg);

        let mean = segment.iter().sum::<f64>() / segment.len() as f64;
        let mut frame: Vec<Complex64> = segment
            .iter()
            .zip(&self.window)
            .map(|(&x, &w)| Complex64::new((x - mean) * w, 0.0))
            .collect();

        self.fft.process(&mut frame);

        let bins = self.num_bins();
        // DC, and Nyquist when nperseg is even, appear once in the full spectrum
        let doubled_end = if self.nperseg % 2 == 0 { bins - 1 } else { bins };

        frame[..bins]
            .iter()
            .enumerate()
            .map(|(k, x)| {
                let p = x.norm_sqr() * self.scale;
                if k > 0 && k < doubled_end {
                    2.0 * p
                } else {
                    p
                }
            })
            .collect()
    }
}
