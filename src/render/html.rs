//! Self-contained HTML document
//!
//! The plotters chart inline, a hover readout driven by a few lines of
//! script, and the visible data as embedded JSON. No external resources are
//! referenced.

use super::svg::{self, HeatmapBounds};
use super::RenderError;
use crate::plot::{Dimension, PlotConfig, SpectralArtifact};
use serde::Serialize;

/// Data block embedded in the page for downstream tooling
#[derive(Serialize)]
struct EmbeddedData<'a> {
    generator: &'static str,
    generated_at: String,
    config: &'a PlotConfig,
    heatmap_bounds: HeatmapBounds,
    heatmap: EmbeddedMesh<'a>,
    curve: EmbeddedCurve<'a>,
}

#[derive(Serialize)]
struct EmbeddedMesh<'a> {
    x: &'a Dimension,
    y: &'a Dimension,
    value: &'a Dimension,
    times: &'a [f64],
    frequencies: Vec<f64>,
    power: Vec<&'a [f64]>,
}

#[derive(Serialize)]
struct EmbeddedCurve<'a> {
    x: &'a Dimension,
    y: &'a Dimension,
    frequencies: Vec<f64>,
    amplitude: Vec<f64>,
}

// Maps the pointer through the heatmap bounds to the nearest embedded bin
const HOVER_SCRIPT: &str = r##"(function () {
  var data = JSON.parse(document.getElementById("simplesig-data").textContent);
  var svg = document.querySelector("#simplesig-plot svg");
  var readout = document.getElementById("simplesig-readout");
  var area = data.heatmap_bounds;
  var mesh = data.heatmap;
  if (!svg || !mesh.frequencies.length || !mesh.times.length) return;

  function nearest(values, v) {
    var best = 0;
    for (var i = 1; i < values.length; i++) {
      if (Math.abs(values[i] - v) < Math.abs(values[best] - v)) best = i;
    }
    return best;
  }

  svg.addEventListener("mousemove", function (e) {
    var box = svg.getBoundingClientRect();
    var x = (e.clientX - box.left) * svg.width.baseVal.value / box.width;
    var y = (e.clientY - box.top) * svg.height.baseVal.value / box.height;
    if (x < area.left || x > area.right || y < area.top || y > area.bottom) {
      readout.textContent = "";
      return;
    }
    var t = area.x_range[0] +
      (x - area.left) / (area.right - area.left) * (area.x_range[1] - area.x_range[0]);
    var f = area.y_range[1] -
      (y - area.top) / (area.bottom - area.top) * (area.y_range[1] - area.y_range[0]);
    var ti = nearest(mesh.times, t);
    var fi = nearest(mesh.frequencies, f);
    readout.textContent = "t = " + mesh.times[ti].toFixed(3) + " s, f = " +
      mesh.frequencies[fi].toFixed(2) + " Hz, power = " +
      mesh.power[fi][ti].toExponential(3) + " V^2/Hz";
  });
})();"##;

fn css([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn embedded_json(
    artifact: &SpectralArtifact,
    heatmap_bounds: HeatmapBounds,
) -> serde_json::Result<String> {
    let visible = artifact.visible_heatmap();
    let (curve_freqs, curve_amps): (Vec<f64>, Vec<f64>) =
        artifact.visible_curve().into_iter().unzip();

    let data = EmbeddedData {
        generator: concat!("simplesig ", env!("CARGO_PKG_VERSION")),
        generated_at: chrono::Utc::now().to_rfc3339(),
        config: &artifact.config,
        heatmap_bounds,
        heatmap: EmbeddedMesh {
            x: &artifact.heatmap.x,
            y: &artifact.heatmap.y,
            value: &artifact.heatmap.value,
            times: &artifact.heatmap.times,
            frequencies: visible.iter().map(|(f, _)| *f).collect(),
            power: visible.iter().map(|(_, row)| *row).collect(),
        },
        curve: EmbeddedCurve {
            x: &artifact.curve.x,
            y: &artifact.curve.y,
            frequencies: curve_freqs,
            amplitude: curve_amps,
        },
    };

    // "</" would end the script element early
    Ok(serde_json::to_string(&data)?.replace("</", "<\\/"))
}

/// Render `artifact` as a complete HTML page
pub(crate) fn document(artifact: &SpectralArtifact) -> Result<String, RenderError> {
    let palette = artifact.config.theme.palette();
    let chart = svg::panels(artifact, &palette)?;
    let json = embedded_json(artifact, chart.heatmap)?;

    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<meta name=\"generator\" content=\"simplesig {}\">\n",
        env!("CARGO_PKG_VERSION")
    ));
    out.push_str("<title>Spectrogram and power spectral density</title>\n");
    out.push_str(&format!(
        "<style>\n\
         body {{ background: {bg}; color: {fg}; font-family: Helvetica, Arial, sans-serif; margin: 20px; }}\n\
         #simplesig-readout {{ min-height: 1.4em; font-size: 12px; color: {fg}; }}\n\
         </style>\n",
        bg = css(palette.background),
        fg = css(palette.text)
    ));
    out.push_str("</head>\n<body>\n<div id=\"simplesig-plot\">\n");
    out.push_str(&chart.svg);
    out.push_str("</div>\n<div id=\"simplesig-readout\"></div>\n");
    out.push_str(&format!(
        "<script type=\"application/json\" id=\"simplesig-data\">{}</script>\n",
        json
    ));
    out.push_str(&format!("<script>\n{}\n</script>\n", HOVER_SCRIPT));
    out.push_str("</body>\n</html>\n");

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::plot_spectrogram;

    fn artifact() -> SpectralArtifact {
        let samples: Vec<f64> = (0..6144)
            .map(|i| (2.0 * std::f64::consts::PI * 25.0 * i as f64 / 1024.0).sin())
            .collect();
        plot_spectrogram(&samples, 1024.0).unwrap()
    }

    #[test]
    fn test_document_is_self_contained() {
        let html = document(&artifact()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("id=\"simplesig-data\""));
        assert!(!html.contains("src="));
        assert!(!html.contains("href=\"http"));
        // Dark theme by default
        assert!(html.contains("background: #2f2f2f"));
    }

    fn embedded(artifact: &SpectralArtifact) -> serde_json::Value {
        let chart = svg::panels(artifact, &artifact.config.theme.palette()).unwrap();
        let json = embedded_json(artifact, chart.heatmap).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_chart_wrapped_for_hover_lookup() {
        let html = document(&artifact()).unwrap();
        let plot = html.find("id=\"simplesig-plot\"").unwrap();
        let svg = html.find("<svg").unwrap();
        assert!(plot < svg);
        assert!(html.contains("heatmap_bounds"));
    }

    #[test]
    fn test_embedded_json_parses() {
        let value = embedded(&artifact());

        let freqs = value["heatmap"]["frequencies"].as_array().unwrap();
        assert_eq!(freqs.first().unwrap().as_f64(), Some(1.0));
        assert_eq!(freqs.last().unwrap().as_f64(), Some(50.0));
        assert_eq!(value["heatmap"]["power"].as_array().unwrap().len(), 50);
        assert_eq!(value["config"]["theme"], "DarkMinimal");
        assert_eq!(value["config"]["color_map"], "Plasma");

        let curve = value["curve"]["frequencies"].as_array().unwrap();
        assert!(curve.iter().all(|f| {
            let f = f.as_f64().unwrap();
            (1.0..=50.0).contains(&f)
        }));
    }

    #[test]
    fn test_embedded_bounds_and_timestamp() {
        let value = embedded(&artifact());

        let bounds = &value["heatmap_bounds"];
        assert!(bounds["right"].as_i64().unwrap() > bounds["left"].as_i64().unwrap());
        assert!(bounds["bottom"].as_i64().unwrap() > bounds["top"].as_i64().unwrap());
        assert_eq!(bounds["y_range"][0].as_f64(), Some(1.0));
        assert_eq!(bounds["y_range"][1].as_f64(), Some(50.0));

        let stamp = value["generated_at"].as_str().unwrap();
        assert!(stamp.ends_with("+00:00"), "{}", stamp);
    }
}
