//! Gaussian-modulated sinusoidal pulses

use super::SignalError;
use serde::Serialize;
use std::f64::consts::PI;

/// Envelope level (dB) at which the fractional bandwidth is measured
const BANDWIDTH_REF_DB: f64 = -6.0;

/// One gaussian-modulated cosine burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PulseSpec {
    /// Time of the envelope peak (seconds)
    pub center_time: f64,

    /// Pulse width (seconds)
    pub width: f64,

    /// Carrier frequency (Hz)
    pub frequency: f64,

    /// Peak amplitude
    pub amplitude: f64,
}

impl PulseSpec {
    pub fn new(center_time: f64, width: f64, frequency: f64, amplitude: f64) -> Self {
        Self {
            center_time,
            width,
            frequency,
            amplitude,
        }
    }

    /// Fractional bandwidth of the envelope: `2 / (frequency * width)`
    pub fn fractional_bandwidth(&self) -> f64 {
        2.0 / (self.frequency * self.width)
    }

    /// Check the pulse can be synthesized without producing NaNs
    ///
    /// `index` is only used to name the pulse in the error.
    pub fn validate(&self, index: usize) -> Result<(), SignalError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.frequency) || !ok(self.width) {
            return Err(SignalError::InvalidPulse {
                index,
                frequency: self.frequency,
                width: self.width,
            });
        }
        if !self.center_time.is_finite() || !self.amplitude.is_finite() {
            return Err(SignalError::NonFinite { index });
        }
        Ok(())
    }

    /// Envelope decay coefficient `a` in `exp(-a * tau^2)`
    fn envelope_coefficient(&self) -> f64 {
        let reference = 10f64.powf(BANDWIDTH_REF_DB / 20.0);
        let spread = PI * self.frequency * self.fractional_bandwidth();
        -(spread * spread) / (4.0 * reference.ln())
    }

    /// Add this pulse, sampled on `times`, into `out`
    ///
    /// Assumes `validate` has passed.
    pub fn accumulate(&self, times: &[f64], out: &mut [f64]) {
        let a = self.envelope_coefficient();
        let omega = 2.0 * PI * self.frequency;

        for (y, &t) in out.iter_mut().zip(times) {
            let tau = t - self.center_time;
            *y += self.amplitude * (-a * tau * tau).exp() * (omega * tau).cos();
        }
    }
}
