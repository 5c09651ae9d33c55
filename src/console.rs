//! Load -> analyse -> render, as run by the `simplesig` binary

use crate::error::{Error, Result};
use crate::io;
use crate::plot::{plot_spectrogram_with, PlotConfig};
use crate::render;
use std::path::Path;

/// Sample rate assumed for input files (not stored in the file)
pub const DEFAULT_SAMPLE_RATE: f64 = 1024.0;

/// Spectrogram command: one file in, one document out
#[derive(Debug, Clone)]
pub struct SpectrogramCommand {
    config: PlotConfig,
    sample_rate: f64,
}

impl Default for SpectrogramCommand {
    fn default() -> Self {
        Self::new(PlotConfig::default())
    }
}

impl SpectrogramCommand {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }

    /// Override the assumed input sample rate
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Load `infile`, build the spectrogram plot and write it to `outfile`
    pub fn run(&self, infile: &Path, outfile: &Path) -> Result<()> {
        log::info!("Loading waveform from {:?}", infile);
        let samples = io::read_waveform(infile).map_err(|source| Error::Input {
            path: infile.to_path_buf(),
            source,
        })?;

        log::info!(
            "Loaded {} samples ({:.2}s at {} Hz)",
            samples.len(),
            samples.len() as f64 / self.sample_rate,
            self.sample_rate
        );

        let artifact = plot_spectrogram_with(&samples, self.sample_rate, &self.config)?;
        render::save(&artifact, outfile)
    }
}

/// Load data, create and save the spectrogram with default settings
pub fn command_plot_spectrogram(infile: &Path, outfile: &Path) -> Result<()> {
    SpectrogramCommand::default().run(infile, outfile)
}
