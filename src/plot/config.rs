//! Plot configuration
//!
//! Everything that controls how an artifact looks is carried here and passed
//! once at construction; nothing is process-wide.

use super::colormap::Colormap;
use serde::Serialize;
use std::path::Path;
use std::str::FromStr;

/// Configuration for artifact construction and rendering
#[derive(Debug, Clone, Serialize)]
pub struct PlotConfig {
    /// Output document format
    pub backend: Backend,

    /// Colour theme for the document
    pub theme: Theme,

    /// Colour map for the spectrogram heatmap
    pub color_map: Colormap,

    /// Displayed frequency range (Hz), shared by both panels
    pub freq_range: (f64, f64),

    /// Frame widths in pixels: (heatmap, curve)
    pub panel_size_ratio: (u32, u32),

    /// Frame height in pixels, shared by both panels
    pub frame_height: u32,

    /// Number of ticks on the curve's amplitude axis
    pub curve_ticks: usize,
}

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Backend {
    /// Self-contained HTML page with inline SVG and embedded data
    Html,
    /// Standalone SVG image
    Svg,
}

impl Backend {
    /// Pick a backend from an output file extension (`.svg` or anything else)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Backend::Svg,
            _ => Backend::Html,
        }
    }
}

/// Document colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Theme {
    DarkMinimal,
    Light,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" | "dark_minimal" | "dark-minimal" => Ok(Theme::DarkMinimal),
            "light" => Ok(Theme::Light),
            _ => Err(format!("unknown theme {:?} (expected dark or light)", s)),
        }
    }
}

impl Theme {
    pub(crate) fn palette(&self) -> Palette {
        match self {
            Theme::DarkMinimal => Palette {
                background: [0x2f, 0x2f, 0x2f],
                frame: [0x2f, 0x2f, 0x2f],
                text: [0xe0, 0xe0, 0xe0],
                axis: [0xe0, 0xe0, 0xe0],
                line: [0x30, 0xa2, 0xda],
            },
            Theme::Light => Palette {
                background: [0xff, 0xff, 0xff],
                frame: [0xff, 0xff, 0xff],
                text: [0x33, 0x33, 0x33],
                axis: [0x44, 0x44, 0x44],
                line: [0x1f, 0x77, 0xb4],
            },
        }
    }
}

/// Resolved colours for a theme
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette {
    pub background: [u8; 3],
    pub frame: [u8; 3],
    pub text: [u8; 3],
    pub axis: [u8; 3],
    pub line: [u8; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotConfig {
    /// Create the default configuration: dark HTML, plasma, 1-50 Hz, 600:100 panels
    pub fn new() -> Self {
        Self {
            backend: Backend::Html,
            theme: Theme::DarkMinimal,
            color_map: Colormap::Plasma,
            freq_range: (1.0, 50.0),
            panel_size_ratio: (600, 100),
            frame_height: 400,
            curve_ticks: 3,
        }
    }

    /// Set output backend
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Set colour theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set heatmap colour map
    pub fn with_color_map(mut self, color_map: Colormap) -> Self {
        self.color_map = color_map;
        self
    }

    /// Set displayed frequency range
    pub fn with_freq_range(mut self, low: f64, high: f64) -> Self {
        self.freq_range = (low.min(high), low.max(high));
        self
    }

    /// Set panel frame widths (heatmap, curve)
    pub fn with_panel_size_ratio(mut self, heatmap: u32, curve: u32) -> Self {
        self.panel_size_ratio = (heatmap, curve);
        self
    }

    /// Whether `freq` falls inside the displayed range
    pub fn shows_frequency(&self, freq: f64) -> bool {
        freq >= self.freq_range.0 && freq <= self.freq_range.1
    }
}
