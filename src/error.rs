//! Crate-level error type
//!
//! Each layer has its own error enum; this type tags them with the stage
//! (input, computation, output) they came from so the binary can report
//! which path or parameter was at fault.

use crate::io::NpyError;
use crate::render::RenderError;
use crate::signal::SignalError;
use crate::spectral::SpectralError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot read waveform from {path:?}: {source}")]
    Input { path: PathBuf, source: NpyError },

    #[error("cannot write output to {path:?}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot render document for {path:?}: {source}")]
    Render { path: PathBuf, source: RenderError },

    #[error("signal synthesis failed: {0}")]
    Signal(#[from] SignalError),

    #[error("spectral analysis failed: {0}")]
    Spectral(#[from] SpectralError),
}
