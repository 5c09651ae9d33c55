//! Document rendering
//!
//! Serializes a [`SpectralArtifact`] into the format selected by its
//! [`Backend`]. The whole document is built in memory before anything is
//! written, so a failed run never leaves a partial file behind.

mod html;
mod svg;

use crate::error::{Error, Result};
use crate::plot::{Backend, SpectralArtifact};
use std::fs;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("cannot serialize plot data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render `artifact` to a document string
pub fn render(artifact: &SpectralArtifact) -> std::result::Result<String, RenderError> {
    match artifact.config.backend {
        Backend::Html => html::document(artifact),
        Backend::Svg => {
            let chart = svg::panels(artifact, &artifact.config.theme.palette())?;
            let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
            out.push_str(&chart.svg);
            Ok(out)
        }
    }
}

/// Render `artifact` and write it to `path`
pub fn save(artifact: &SpectralArtifact, path: &Path) -> Result<()> {
    let document = render(artifact).map_err(|source| Error::Render {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, document.as_bytes()).map_err(|source| Error::Output {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!(
        "Wrote {:?} document ({} bytes) to {:?}",
        artifact.config.backend,
        document.len(),
        path
    );
    Ok(())
}
