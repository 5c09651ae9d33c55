//! Two-panel spectral artifact: spectrogram heatmap + amplitude spectral density

use super::config::PlotConfig;
use crate::spectral::{self, Psd, SpectralError, Spectrogram};
use serde::Serialize;

/// A named, labelled axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dimension {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
}

impl Dimension {
    pub const TIME: Dimension = Dimension {
        name: "time",
        label: "Time",
        unit: "s",
    };
    pub const FREQUENCY: Dimension = Dimension {
        name: "freq",
        label: "Frequency",
        unit: "Hz",
    };
    pub const POWER: Dimension = Dimension {
        name: "power",
        label: "Power",
        unit: "V^2/Hz",
    };

    /// Axis title, e.g. `Frequency (Hz)`
    pub fn title(&self) -> String {
        format!("{} ({})", self.label, self.unit)
    }
}

/// Time x frequency heatmap of power
#[derive(Debug, Clone, Serialize)]
pub struct QuadMesh {
    pub x: Dimension,
    pub y: Dimension,
    pub value: Dimension,

    /// Bin centre times (s)
    pub times: Vec<f64>,

    /// Bin centre frequencies (Hz)
    pub frequencies: Vec<f64>,

    /// Power, indexed `[frequency][time]`
    pub power: Vec<Vec<f64>>,
}

/// Amplitude spectral density curve
#[derive(Debug, Clone, Serialize)]
pub struct Curve {
    /// Horizontal axis (amplitude)
    pub x: Dimension,
    /// Vertical axis (frequency)
    pub y: Dimension,

    pub frequencies: Vec<f64>,

    /// `sqrt(psd)` at each frequency
    pub amplitude: Vec<f64>,
}

/// Spectrogram and PSD panels, ready to render
#[derive(Debug, Clone, Serialize)]
pub struct SpectralArtifact {
    pub heatmap: QuadMesh,
    pub curve: Curve,
    pub config: PlotConfig,
}

impl SpectralArtifact {
    /// Compose the two panels from precomputed estimates
    pub fn new(spec: Spectrogram, psd: &Psd, config: PlotConfig) -> Self {
        let heatmap = QuadMesh {
            x: Dimension::TIME,
            y: Dimension::FREQUENCY,
            value: Dimension::POWER,
            times: spec.times,
            frequencies: spec.frequencies,
            power: spec.power,
        };

        let curve = Curve {
            x: Dimension::POWER,
            y: Dimension::FREQUENCY,
            frequencies: psd.frequencies.clone(),
            amplitude: psd.amplitude(),
        };

        Self {
            heatmap,
            curve,
            config,
        }
    }

    /// Frequency range shown on the heatmap's y axis
    pub fn heatmap_freq_range(&self) -> (f64, f64) {
        self.config.freq_range
    }

    /// Frequency range shown on the curve's y axis
    pub fn curve_freq_range(&self) -> (f64, f64) {
        self.config.freq_range
    }

    /// Heatmap rows inside the display range: `(frequency, row)` pairs
    pub fn visible_heatmap(&self) -> Vec<(f64, &[f64])> {
        self.heatmap
            .frequencies
            .iter()
            .zip(&self.heatmap.power)
            .filter(|(f, _)| self.config.shows_frequency(**f))
            .map(|(&f, row)| (f, row.as_slice()))
            .collect()
    }

    /// Curve points inside the display range: `(frequency, amplitude)` pairs
    pub fn visible_curve(&self) -> Vec<(f64, f64)> {
        self.curve
            .frequencies
            .iter()
            .zip(&self.curve.amplitude)
            .filter(|(f, _)| self.config.shows_frequency(**f))
            .map(|(&f, &a)| (f, a))
            .collect()
    }

    /// Minimum and maximum power among visible heatmap cells
    pub fn visible_power_range(&self) -> Option<(f64, f64)> {
        self.visible_heatmap()
            .iter()
            .flat_map(|(_, row)| row.iter().copied())
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })
    }
}

/// Build the spectrogram + PSD artifact with the default configuration
pub fn plot_spectrogram(samples: &[f64], fs: f64) -> Result<SpectralArtifact, SpectralError> {
    plot_spectrogram_with(samples, fs, &PlotConfig::default())
}

/// Build the spectrogram + PSD artifact
///
/// PSD segments are 5 s long, spectrogram segments 1 s.
pub fn plot_spectrogram_with(
    samples: &[f64],
    fs: f64,
    config: &PlotConfig,
) -> Result<SpectralArtifact, SpectralError> {
    let psd_len = spectral::segment_len(fs, spectral::PSD_SEGMENT_SECONDS);
    let spec_len = spectral::segment_len(fs, spectral::SPECTROGRAM_SEGMENT_SECONDS);

    let psd = spectral::welch(samples, fs, psd_len)?;
    let spec = spectral::spectrogram(samples, fs, spec_len)?;

    log::info!(
        "Spectral analysis: {} samples at {} Hz, {} PSD bins, {}x{} spectrogram",
        samples.len(),
        fs,
        psd.frequencies.len(),
        spec.times.len(),
        spec.frequencies.len()
    );

    Ok(SpectralArtifact::new(spec, &psd, config.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::create_signal;
    use std::f64::consts::PI;

    #[test]
    fn test_panels_share_frequency_range() {
        let samples: Vec<f64> = (0..8192)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / 1024.0).sin())
            .collect();
        let artifact = plot_spectrogram(&samples, 1024.0).unwrap();

        assert_eq!(artifact.heatmap_freq_range(), (1.0, 50.0));
        assert_eq!(artifact.curve_freq_range(), (1.0, 50.0));

        let heat_freqs: Vec<f64> = artifact.visible_heatmap().iter().map(|(f, _)| *f).collect();
        assert_eq!(heat_freqs.first(), Some(&1.0));
        assert_eq!(heat_freqs.last(), Some(&50.0));

        let curve = artifact.visible_curve();
        assert!(curve.first().unwrap().0 >= 1.0);
        assert!(curve.last().unwrap().0 <= 50.0);
    }

    #[test]
    fn test_clipped_peak_outside_display_range() {
        let signal = create_signal(2.0, 1024.0, &[1.0], &[0.2], &[100.0], &[1.0]).unwrap();
        let artifact = plot_spectrogram(&signal.samples, 1024.0).unwrap();

        // The 100 Hz burst exists in the data...
        let spec = Spectrogram {
            frequencies: artifact.heatmap.frequencies.clone(),
            times: artifact.heatmap.times.clone(),
            power: artifact.heatmap.power.clone(),
            nperseg: 1024,
        };
        let (_, f, peak) = spec.peak().unwrap();
        assert!((f - 100.0).abs() <= 2.0, "peak at {} Hz", f);

        // ...but the visible band holds only leakage
        let (_, visible_max) = artifact.visible_power_range().unwrap();
        assert!(visible_max < peak * 1e-3);
    }

    #[test]
    fn test_custom_range() {
        let samples = vec![0.5; 4096];
        let config = PlotConfig::new().with_freq_range(10.0, 20.0);
        let artifact = plot_spectrogram_with(&samples, 1024.0, &config).unwrap();

        let visible = artifact.visible_heatmap();
        assert_eq!(visible.len(), 11);
        assert_eq!(artifact.heatmap.frequencies.len(), 513);
    }

    #[test]
    fn test_empty_waveform_rejected() {
        assert!(plot_spectrogram(&[], 1024.0).is_err());
    }

    #[test]
    fn test_dimension_title() {
        assert_eq!(Dimension::FREQUENCY.title(), "Frequency (Hz)");
        assert_eq!(Dimension::POWER.title(), "Power (V^2/Hz)");
    }
}
