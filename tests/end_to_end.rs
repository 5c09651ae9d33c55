use simplesig::console::{command_plot_spectrogram, SpectrogramCommand};
use simplesig::io::{read_waveform, write_waveform};
use simplesig::plot::{plot_spectrogram, Backend, PlotConfig, Theme};
use simplesig::spectral;
use simplesig::{create_signal, Error};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

/// Two pulses inside the displayed band and one outside it
fn create_test_waveform() -> Vec<f64> {
    create_signal(
        12.0,
        1024.0,
        &[3.0, 6.0, 9.0],
        &[0.5, 1.0, 0.2],
        &[10.0, 30.0, 100.0],
        &[1.0, 0.5, 1.0],
    )
    .expect("Failed to create test signal")
    .samples
}

#[test]
fn test_waveform_file_roundtrip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("trace.npy");

    let samples = create_test_waveform();
    write_waveform(&path, &samples).unwrap();
    let loaded = read_waveform(&path).unwrap();

    assert_eq!(loaded.len(), samples.len());
    assert!(samples
        .iter()
        .zip(&loaded)
        .all(|(a, b)| a.to_bits() == b.to_bits()));
}

#[test]
fn test_end_to_end_pulse_example() {
    let signal = create_signal(2.0, 1024.0, &[1.0], &[0.2], &[100.0], &[1.0]).unwrap();
    assert_eq!(signal.len(), 2048);

    let (idx, peak) = signal.peak().unwrap();
    assert!((idx as i64 - 1024).abs() <= 1);
    assert!((peak.abs() - 1.0).abs() < 1e-6);

    // Power sits at 100 Hz in the data...
    let spec = spectral::spectrogram(&signal.samples, 1024.0, 1024).unwrap();
    let (_, freq, _) = spec.peak().unwrap();
    assert!((freq - 100.0).abs() <= 2.0);

    // ...while the display range stops at 50 Hz
    let artifact = plot_spectrogram(&signal.samples, 1024.0).unwrap();
    assert_eq!(artifact.heatmap_freq_range(), (1.0, 50.0));
    assert!(artifact.visible_heatmap().iter().all(|(f, _)| *f <= 50.0));
    assert!(artifact.heatmap.frequencies.iter().any(|f| *f >= 100.0));
}

#[test]
fn test_command_writes_html() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("trace.npy");
    let outfile = temp_dir.path().join("plot.html");

    write_waveform(&infile, &create_test_waveform()).unwrap();
    command_plot_spectrogram(&infile, &outfile).unwrap();

    let html = fs::read_to_string(&outfile).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("id=\"simplesig-plot\""));
    assert!(html.contains("<svg"));
    assert!(html.contains("Frequency (Hz)"));
    assert!(html.contains("id=\"simplesig-data\""));
}

#[test]
fn test_command_writes_svg_with_light_theme() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("trace.npy");
    let outfile = temp_dir.path().join("plot.svg");

    write_waveform(&infile, &create_test_waveform()).unwrap();

    let config = PlotConfig::new()
        .with_backend(Backend::from_path(&outfile))
        .with_theme(Theme::Light);
    SpectrogramCommand::new(config)
        .run(&infile, &outfile)
        .unwrap();

    let svg = fs::read_to_string(&outfile).unwrap();
    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains("<svg"));
    assert!(svg.to_uppercase().contains("#FFFFFF"));
}

#[test]
fn test_command_rejects_garbage_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("garbage.npy");
    let outfile = temp_dir.path().join("plot.html");

    fs::write(&infile, b"this is not an array").unwrap();
    let err = command_plot_spectrogram(&infile, &outfile).unwrap_err();

    assert!(matches!(err, Error::Input { .. }));
    assert!(err.to_string().contains("garbage.npy"));
    assert!(!outfile.exists());
}

#[test]
fn test_cli_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_simplesig"))
        .arg("only-one-argument.npy")
        .output()
        .expect("Failed to run simplesig");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_command_rejects_oversized_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("huge.npy");
    let outfile = temp_dir.path().join("plot.html");

    // Valid v1.0 preamble declaring far more samples than the file holds
    let header = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({},), }}\n",
        usize::MAX / 4 + 1
    );
    let mut bytes = b"\x93NUMPY\x01\x00".to_vec();
    bytes.extend_from_slice(&(header.len() as u16).to_le_bytes());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(&[0; 16]);
    fs::write(&infile, &bytes).unwrap();

    let err = command_plot_spectrogram(&infile, &outfile).unwrap_err();
    assert!(matches!(err, Error::Input { .. }));
    assert!(err.to_string().contains("huge.npy"));
    assert!(!outfile.exists());
}

#[test]
fn test_cli_rejects_unknown_theme() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("trace.npy");
    let outfile = temp_dir.path().join("plot.html");
    write_waveform(&infile, &create_test_waveform()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_simplesig"))
        .arg(&infile)
        .arg(&outfile)
        .arg("--theme")
        .arg("solarized")
        .output()
        .expect("Failed to run simplesig");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("solarized"));
    assert!(!outfile.exists());
}

#[test]
fn test_cli_missing_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("does-not-exist.npy");
    let outfile = temp_dir.path().join("plot.html");

    let output = Command::new(env!("CARGO_BIN_EXE_simplesig"))
        .arg(&infile)
        .arg(&outfile)
        .output()
        .expect("Failed to run simplesig");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does-not-exist.npy"));
    assert!(!outfile.exists());
}

#[test]
fn test_cli_success() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let infile = temp_dir.path().join("trace.npy");
    let outfile = temp_dir.path().join("plot.html");
    write_waveform(&infile, &create_test_waveform()).unwrap();

    let status = Command::new(env!("CARGO_BIN_EXE_simplesig"))
        .arg(&infile)
        .arg(&outfile)
        .arg("--colormap")
        .arg("viridis")
        .status()
        .expect("Failed to run simplesig");

    assert!(status.success());
    assert!(outfile.exists());
}
