//! Magnitude response of designed FIR filters.

use rustfft::num_complex::Complex;
use sigsweep_core::{FirCoefficients, SampleRate};

use crate::fft::Fft;

/// Number of evaluation points used when none is configured.
pub const DEFAULT_RESPONSE_POINTS: usize = 8000;

/// `|H(f)|` sampled at equally spaced frequencies on `[0, Fs/2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyResponse {
    /// Evaluation frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Linear gain at each frequency.
    pub gains: Vec<f64>,
}

impl FrequencyResponse {
    /// Number of evaluation points.
    pub fn len(&self) -> usize {
        self.gains.len()
    }

    /// True when nothing was evaluated.
    pub fn is_empty(&self) -> bool {
        self.gains.is_empty()
    }

    /// Gain at the evaluation point closest to `freq_hz`.
    pub fn gain_at(&self, freq_hz: f64) -> Option<f64> {
        self.frequencies
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - freq_hz).abs().total_cmp(&(b.1 - freq_hz).abs()))
            .map(|(i, _)| self.gains[i])
    }

    /// Highest frequency whose gain is still at least `level` (e.g. `0.5`).
    pub fn edge_above(&self, level: f64) -> Option<f64> {
        self.gains
            .iter()
            .rposition(|&g| g >= level)
            .map(|i| self.frequencies[i])
    }
}

/// Evaluate `coeffs` at `points` frequencies `f_k = k·Fs/(2·points)`.
///
/// Uses a zero-padded FFT of length `2·points` when the taps fit in it and a
/// direct sum otherwise.
pub fn frequency_response(
    coeffs: &FirCoefficients,
    sample_rate: SampleRate,
    points: usize,
) -> FrequencyResponse {
    let step = sample_rate.nyquist() / points.max(1) as f64;
    let frequencies: Vec<f64> = (0..points).map(|k| k as f64 * step).collect();
    let taps = coeffs.as_slice();

    let gains = if points == 0 {
        Vec::new()
    } else if taps.len() <= 2 * points {
        let fft = Fft::new(2 * points);
        fft.forward(taps)
            .iter()
            .take(points)
            .map(|c| c.norm())
            .collect()
    } else {
        (0..points)
            .map(|k| {
                let omega = std::f64::consts::PI * k as f64 / points as f64;
                taps.iter()
                    .enumerate()
                    .map(|(n, &h)| Complex::from_polar(h, -omega * n as f64))
                    .sum::<Complex<f64>>()
                    .norm()
            })
            .collect()
    };

    FrequencyResponse { frequencies, gains }
}
