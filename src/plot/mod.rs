//! Plot composition
//!
//! Turns spectral estimates into a [`SpectralArtifact`]: a spectrogram heatmap
//! beside an amplitude spectral density curve, both clipped to the same
//! frequency range. Rendering to a document lives in [`crate::render`].

mod artifact;
mod colormap;
mod config;

pub use artifact::{
    plot_spectrogram, plot_spectrogram_with, Curve, Dimension, QuadMesh, SpectralArtifact,
};
pub use colormap::Colormap;
pub use config::{Backend, PlotConfig, Theme};

pub(crate) use config::Palette;
