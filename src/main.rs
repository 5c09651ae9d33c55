use anyhow::{Context, Result};
use clap::Parser;
use simplesig::console::{SpectrogramCommand, DEFAULT_SAMPLE_RATE};
use simplesig::plot::{Backend, Colormap, PlotConfig, Theme};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "simplesig")]
#[command(about = "Plot the spectrogram and PSD of a waveform", long_about = None)]
struct Args {
    /// Input waveform (.npy array of float samples)
    infile: String,

    /// Output document (.html, or .svg for a bare image)
    outfile: String,

    /// Sample rate of the input in Hz (not stored in the file)
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: f64,

    /// Colour theme: dark or light
    #[arg(long, default_value = "dark")]
    theme: Theme,

    /// Heatmap colour map: plasma, viridis, magma, inferno, grayscale
    #[arg(long, default_value = "plasma")]
    colormap: Colormap,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let infile = PathBuf::from(shellexpand::tilde(&args.infile).as_ref());
    let outfile = PathBuf::from(shellexpand::tilde(&args.outfile).as_ref());

    let config = PlotConfig::new()
        .with_backend(Backend::from_path(&outfile))
        .with_theme(args.theme)
        .with_color_map(args.colormap);

    SpectrogramCommand::new(config)
        .with_sample_rate(args.sample_rate)
        .run(&infile, &outfile)
        .with_context(|| format!("Failed to plot spectrogram of {:?}", infile))?;

    log::info!("Spectrogram written to {:?}", outfile);
    Ok(())
}
