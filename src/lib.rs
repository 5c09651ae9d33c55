//! simplesig - synthetic test signals and spectrogram plots
//!
//! This library builds gaussian-modulated sinusoidal test signals and renders
//! their spectrogram and power spectral density as a two-panel document.

pub mod console;
pub mod error;
pub mod io;
pub mod plot;
pub mod render;
pub mod signal;
pub mod spectral;

pub use error::{Error, Result};
pub use plot::{plot_spectrogram, plot_spectrogram_with, PlotConfig, SpectralArtifact};
pub use signal::{create_signal, synthesize, PulseSpec, Signal};
