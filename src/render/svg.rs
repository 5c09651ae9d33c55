//! Two-panel chart drawn with plotters into an SVG string
//!
//! Spectrogram on the left, amplitude spectral density on the right. The
//! drawing area is split at the configured frame widths and both charts use
//! the same frequency range on y.

use super::RenderError;
use crate::plot::{Palette, SpectralArtifact};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;

const MARGIN: u32 = 10;
const Y_LABEL_AREA: u32 = 60;
const X_LABEL_AREA: u32 = 45;
const PANEL_GAP: u32 = 15;
const FONT: &str = "sans-serif";

/// Pixel bounds and data ranges of the heatmap's plotting area
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(crate) struct HeatmapBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Rendered chart plus where its heatmap landed
#[derive(Debug, Clone)]
pub(crate) struct Chart {
    pub svg: String,
    pub heatmap: HeatmapBounds,
}

fn drawing_error<E: std::fmt::Debug>(e: E) -> RenderError {
    RenderError::Drawing(format!("{:?}", e))
}

fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

/// Draw both panels for `artifact`
pub(crate) fn panels(artifact: &SpectralArtifact, palette: &Palette) -> Result<Chart, RenderError> {
    let config = &artifact.config;
    let (heat_w, curve_w) = config.panel_size_ratio;
    let split = MARGIN + Y_LABEL_AREA + heat_w;
    let width = split + PANEL_GAP + curve_w + MARGIN;
    let height = MARGIN + config.frame_height + X_LABEL_AREA + MARGIN;

    let mut svg = String::new();
    let heatmap = {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&rgb(palette.background)).map_err(drawing_error)?;

        let (left, right) = root.split_horizontally(split);
        let bounds = draw_heatmap(&left, artifact, palette)?;
        draw_curve(&right, artifact, palette)?;

        root.present().map_err(drawing_error)?;
        bounds
    };

    log::debug!("Drew {}x{} chart ({} bytes of SVG)", width, height, svg.len());
    Ok(Chart { svg, heatmap })
}

fn draw_heatmap<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    artifact: &SpectralArtifact,
    palette: &Palette,
) -> Result<HeatmapBounds, RenderError>
where
    DB::ErrorType: 'static,
{
    let mesh = &artifact.heatmap;
    let config = &artifact.config;
    let (f_lo, f_hi) = config.freq_range;

    let time_edges = edges(&mesh.times);
    let freq_edges = edges(&mesh.frequencies);
    let (t_lo, t_hi) = match (time_edges.first(), time_edges.last()) {
        (Some(&a), Some(&b)) if b > a => (a, b),
        _ => (0.0, 1.0),
    };

    let mut chart = ChartBuilder::on(area)
        .margin_top(MARGIN)
        .margin_bottom(MARGIN)
        .margin_left(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(t_lo..t_hi, f_lo..f_hi)
        .map_err(drawing_error)?;

    chart
        .plotting_area()
        .fill(&rgb(palette.frame))
        .map_err(drawing_error)?;

    // Colour scale spans the visible cells only
    let (p_lo, p_hi) = artifact.visible_power_range().unwrap_or((0.0, 0.0));
    let span = p_hi - p_lo;
    let time_edges = &time_edges;

    let cells = mesh
        .frequencies
        .iter()
        .zip(&mesh.power)
        .enumerate()
        .filter(|(_, (f, _))| config.shows_frequency(**f))
        .flat_map(|(fi, (_, row))| {
            let y0 = freq_edges[fi].max(f_lo);
            let y1 = freq_edges[fi + 1].min(f_hi);
            row.iter().enumerate().map(move |(ti, &power)| {
                let level = if span > 0.0 { (power - p_lo) / span } else { 0.0 };
                Rectangle::new(
                    [(time_edges[ti], y0), (time_edges[ti + 1], y1)],
                    rgb(config.color_map.map(level)).filled(),
                )
            })
        });
    chart.draw_series(cells).map_err(drawing_error)?;

    let text = rgb(palette.text);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(mesh.x.title())
        .y_desc(mesh.y.title())
        .x_labels(8)
        .y_labels(6)
        .axis_style(rgb(palette.axis))
        .axis_desc_style((FONT, 13).into_font().color(&text))
        .label_style((FONT, 11).into_font().color(&text))
        .draw()
        .map_err(drawing_error)?;

    let (x_px, y_px) = chart.plotting_area().get_pixel_range();
    Ok(HeatmapBounds {
        left: x_px.start,
        top: y_px.start,
        right: x_px.end,
        bottom: y_px.end,
        x_range: (t_lo, t_hi),
        y_range: (f_lo, f_hi),
    })
}

fn draw_curve<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    artifact: &SpectralArtifact,
    palette: &Palette,
) -> Result<(), RenderError>
where
    DB::ErrorType: 'static,
{
    let config = &artifact.config;
    let (f_lo, f_hi) = config.freq_range;
    let points = artifact.visible_curve();

    let max_amp = points.iter().map(|&(_, a)| a).fold(0.0f64, f64::max);
    let amp_hi = if max_amp > 0.0 && max_amp.is_finite() {
        max_amp
    } else {
        1.0
    };

    // No y label area: the frequency axis is the heatmap's
    let mut chart = ChartBuilder::on(area)
        .margin_top(MARGIN)
        .margin_bottom(MARGIN)
        .margin_left(PANEL_GAP)
        .margin_right(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .build_cartesian_2d(0.0..amp_hi, f_lo..f_hi)
        .map_err(drawing_error)?;

    chart
        .plotting_area()
        .fill(&rgb(palette.frame))
        .map_err(drawing_error)?;

    let text = rgb(palette.text);
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_y_axis()
        .x_desc(artifact.curve.x.title())
        .x_labels(config.curve_ticks)
        .x_label_formatter(&|v: &f64| format!("{:.1e}", v))
        .axis_style(rgb(palette.axis))
        .axis_desc_style((FONT, 13).into_font().color(&text))
        .label_style((FONT, 11).into_font().color(&text))
        .draw()
        .map_err(drawing_error)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|&(f, a)| (a, f)),
            rgb(palette.line).stroke_width(2),
        ))
        .map_err(drawing_error)?;

    Ok(())
}

/// Cell boundaries for bins centred at `centers`
///
/// Interior edges are midpoints; the outer edges extend half a bin.
fn edges(centers: &[f64]) -> Vec<f64> {
    match centers.len() {
        0 => Vec::new(),
        1 => vec![centers[0] - 0.5, centers[0] + 0.5],
        n => {
            let mut out = Vec::with_capacity(n + 1);
            out.push(centers[0] - (centers[1] - centers[0]) / 2.0);
            for pair in centers.windows(2) {
                out.push((pair[0] + pair[1]) / 2.0);
            }
            out.push(centers[n - 1] + (centers[n - 1] - centers[n - 2]) / 2.0);
            out
        }
    }
}
