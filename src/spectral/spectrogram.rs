//! Short-time power spectral density (spectrogram)

use super::periodogram::Periodogram;
use super::window::WindowFunction;
use super::{check_input, SpectralError};
use serde::Serialize;

/// Taper fraction of the spectrogram's Tukey window
const TUKEY_ALPHA: f64 = 0.25;

/// Time-frequency power grid
#[derive(Debug, Clone, Serialize)]
pub struct Spectrogram {
    /// Bin frequencies in Hz, DC to Nyquist
    pub frequencies: Vec<f64>,

    /// Segment centre times in seconds
    pub times: Vec<f64>,

    /// Power spectral density in V^2/Hz, indexed `[frequency][time]`
    pub power: Vec<Vec<f64>>,

    /// Segment length actually used
    pub nperseg: usize,
}

impl Spectrogram {
    /// Time, frequency and power of the strongest cell
    pub fn peak(&self) -> Option<(f64, f64, f64)> {
        let mut best: Option<(f64, f64, f64)> = None;
        for (fi, row) in self.power.iter().enumerate() {
            for (ti, &p) in row.iter().enumerate() {
                if best.map_or(true, |(_, _, b)| p > b) {
                    best = Some((self.times[ti], self.frequencies[fi], p));
                }
            }
        }
        best
    }
}

/// Spectrogram of `samples` with `nperseg`-sample Tukey segments
///
/// Segments overlap by `nperseg / 8` samples.
pub fn spectrogram(samples: &[f64], fs: f64, nperseg: usize) -> Result<Spectrogram, SpectralError> {
    let nperseg = check_input(samples, fs, nperseg, "spectrogram")?;
    let noverlap = nperseg / 8;
    let step = nperseg - noverlap;

    let periodogram = Periodogram::new(nperseg, WindowFunction::Tukey(TUKEY_ALPHA), fs);
    let starts: Vec<usize> = periodogram.segment_starts(samples.len(), noverlap).collect();

    let mut power = vec![Vec::with_capacity(starts.len()); periodogram.num_bins()];
    for &start in &starts {
        let density = periodogram.density(&samples[start..start + nperseg]);
        for (row, p) in power.iter_mut().zip(density) {
            row.push(p);
        }
    }

    let half = nperseg as f64 / 2.0;
    let times = (0..starts.len())
        .map(|k| (half + (k * step) as f64) / fs)
        .collect();

    log::debug!(
        "Spectrogram: nperseg={}, noverlap={}, {} time bins x {} frequency bins",
        nperseg,
        noverlap,
        starts.len(),
        periodogram.num_bins()
    );

    Ok(Spectrogram {
        frequencies: periodogram.frequencies(fs),
        times,
        power,
        nperseg,
    })
}
