//! Perceptually-ordered colour maps for the heatmap

use serde::Serialize;
use std::str::FromStr;

/// Colormap for spectrogram visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Colormap {
    /// Plasma (perceptually uniform, high contrast)
    #[default]
    Plasma,
    /// Viridis (perceptually uniform, colorblind-friendly)
    Viridis,
    /// Magma (dark to light)
    Magma,
    /// Inferno (dark to bright yellow)
    Inferno,
    /// Grayscale (simple black to white)
    Grayscale,
}

impl Colormap {
    /// Map normalized value (0-1) to RGB color
    pub fn map(&self, value: f64) -> [u8; 3] {
        let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

        match self {
            Colormap::Plasma => poly(
                t,
                [0.050, 2.735, -2.811, 1.327, -0.259],
                [0.030, 0.259, 2.042, -2.802, 1.429],
                [0.528, 1.502, -3.489, 3.003, -0.985],
            ),
            Colormap::Viridis => poly(
                t,
                [0.267, 0.329, 1.451, -1.808, 0.758],
                [0.004, 1.513, -0.838, 0.731, -0.466],
                [0.329, 1.442, -2.642, 1.963, -0.440],
            ),
            Colormap::Magma => poly(
                t,
                [0.001, 0.912, 1.287, -1.466, 0.532],
                [0.000, 0.188, 1.612, -1.681, 0.859],
                [0.014, 1.937, -2.578, 2.079, -0.570],
            ),
            Colormap::Inferno => poly(
                t,
                [0.000, 1.132, 0.737, -0.972, 0.441],
                [0.000, 0.142, 1.746, -1.834, 0.926],
                [0.016, 1.980, -2.897, 2.182, -0.565],
            ),
            Colormap::Grayscale => {
                let v = (t * 255.0) as u8;
                [v, v, v]
            }
        }
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plasma" => Ok(Colormap::Plasma),
            "viridis" => Ok(Colormap::Viridis),
            "magma" => Ok(Colormap::Magma),
            "inferno" => Ok(Colormap::Inferno),
            "grayscale" | "gray" | "grey" => Ok(Colormap::Grayscale),
            _ => Err(format!("unknown colour map {:?}", s)),
        }
    }
}

// Polynomial approximations of the matplotlib colormaps
fn poly(t: f64, r: [f64; 5], g: [f64; 5], b: [f64; 5]) -> [u8; 3] {
    let eval = |c: [f64; 5]| {
        let v = c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4])));
        (v.clamp(0.0, 1.0) * 255.0) as u8
    };
    [eval(r), eval(g), eval(b)]
}
