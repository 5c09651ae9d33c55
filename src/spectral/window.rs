//! Window functions for segment-based spectral estimation
//!
//! All windows are periodic (DFT-even): they are the symmetric window of
//! length `size + 1` with the last point dropped.

use std::f64::consts::PI;

/// Window functions for spectral analysis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WindowFunction {
    /// No windowing (rectangular)
    Rectangular,
    /// Hann window, used for the PSD estimate
    #[default]
    Hann,
    /// Tukey (tapered cosine) window with the given taper fraction
    Tukey(f64),
}

impl WindowFunction {
    /// Generate window coefficients for the given size
    pub fn generate(&self, size: usize) -> Vec<f64> {
        match *self {
            WindowFunction::Rectangular => vec![1.0; size],
            WindowFunction::Hann => (0..size)
                .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / size as f64).cos()))
                .collect(),
            WindowFunction::Tukey(alpha) => tukey_periodic(size, alpha),
        }
    }
}

fn tukey_periodic(size: usize, alpha: f64) -> Vec<f64> {
    if size <= 1 {
        return vec![1.0; size];
    }
    if alpha <= 0.0 {
        return vec![1.0; size];
    }
    if alpha >= 1.0 {
        return WindowFunction::Hann.generate(size);
    }

    // Symmetric window of size + 1 points, truncated
    let m = size + 1;
    let span = (m - 1) as f64;
    let width = (alpha * span / 2.0).floor() as usize;

    (0..size)
        .map(|i| {
            let n = i as f64;
            if i <= width {
                0.5 * (1.0 + (PI * (-1.0 + 2.0 * n / alpha / span)).cos())
            } else if i < m - width - 1 {
                1.0
            } else {
                0.5 * (1.0 + (PI * (-2.0 / alpha + 1.0 + 2.0 * n / alpha / span)).cos())
            }
        })
        .collect()
}
