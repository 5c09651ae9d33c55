//! Synthetic test signal generation
//!
//! Builds waveforms by superposing gaussian-modulated sinusoidal pulses on a
//! uniform time grid.

mod pulse;

pub use pulse::PulseSpec;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error(
        "pulse parameter lists differ in length: times={times}, widths={widths}, \
         frequencies={frequencies}, amplitudes={amplitudes}"
    )]
    LengthMismatch {
        times: usize,
        widths: usize,
        frequencies: usize,
        amplitudes: usize,
    },

    #[error(
        "invalid pulse {index}: frequency and width must be nonzero \
         (frequency={frequency}, width={width})"
    )]
    InvalidPulse {
        index: usize,
        frequency: f64,
        width: f64,
    },

    #[error("invalid pulse {index}: centre time and amplitude must be finite")]
    NonFinite { index: usize },

    #[error("duration and sample rate must be positive (duration={duration}, fs={fs})")]
    InvalidTiming { duration: f64, fs: f64 },
}

/// A synthesized waveform and the time grid it is sampled on
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Waveform samples
    pub samples: Vec<f64>,

    /// Sample times in seconds, `times[i] = i / fs`
    pub times: Vec<f64>,
}

impl Signal {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index and value of the largest absolute sample
    pub fn peak(&self) -> Option<(usize, f64)> {
        self.samples
            .iter()
            .copied()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
    }
}

/// Uniform grid `0, 1/fs, 2/fs, ... < duration`
pub fn time_grid(duration: f64, fs: f64) -> Result<Vec<f64>, SignalError> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(duration) || !positive(fs) {
        return Err(SignalError::InvalidTiming { duration, fs });
    }

    Ok((0..grid_len(duration, fs)).map(|i| i as f64 / fs).collect())
}

/// `floor(duration * fs)`, with products that land a rounding error below an
/// integer (e.g. `2.3 * 100.0 = 229.99999999999997`) snapped up to it
fn grid_len(duration: f64, fs: f64) -> usize {
    let n = duration * fs;
    let nearest = n.round();
    if (n - nearest).abs() <= 1e-9 * nearest.max(1.0) {
        nearest as usize
    } else {
        n.floor() as usize
    }
}

/// Superpose `pulses` on a `duration`-second grid sampled at `fs`
pub fn synthesize(duration: f64, fs: f64, pulses: &[PulseSpec]) -> Result<Signal, SignalError> {
    let times = time_grid(duration, fs)?;

    for (index, pulse) in pulses.iter().enumerate() {
        pulse.validate(index)?;
    }

    let mut samples = vec![0.0; times.len()];
    for pulse in pulses {
        pulse.accumulate(&times, &mut samples);
    }

    log::debug!(
        "Synthesized {} samples ({:.3}s at {} Hz) from {} pulse(s)",
        samples.len(),
        duration,
        fs,
        pulses.len()
    );

    Ok(Signal { samples, times })
}

/// Create a test signal of gaussian-modulated sinusoids
///
/// The four slices describe one pulse per index and must have equal length.
///
/// # Arguments
/// * `duration` - signal length in seconds
/// * `fs` - sample rate in Hz
/// * `times` - pulse centre times (seconds)
/// * `widths` - pulse widths (seconds)
/// * `frequencies` - pulse carrier frequencies (Hz)
/// * `amplitudes` - pulse peak amplitudes
pub fn create_signal(
    duration: f64,
    fs: f64,
    times: &[f64],
    widths: &[f64],
    frequencies: &[f64],
    amplitudes: &[f64],
) -> Result<Signal, SignalError> {
    let n = times.len();
    if widths.len() != n || frequencies.len() != n || amplitudes.len() != n {
        return Err(SignalError::LengthMismatch {
            times: times.len(),
            widths: widths.len(),
            frequencies: frequencies.len(),
            amplitudes: amplitudes.len(),
        });
    }

    let pulses: Vec<PulseSpec> = (0..n)
        .map(|i| PulseSpec::new(times[i], widths[i], frequencies[i], amplitudes[i]))
        .collect();

    synthesize(duration, fs, &pulses)
}
