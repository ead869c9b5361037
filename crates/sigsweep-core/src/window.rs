//! Window functions for FIR design.
//!
//! All windows here are *symmetric* (length `N`, period `N - 1`), the form
//! used to taper a truncated ideal impulse response. Spectral-analysis
//! windows are periodic instead; do not reuse these for STFT framing.
//!
//! | Window | First sidelobe | Notes |
//! |--------|----------------|-------|
//! | [`WindowKind::Rectangular`] | -13 dB | plain truncation |
//! | [`WindowKind::Hann`] | -31 dB | |
//! | [`WindowKind::Hamming`] | -43 dB | default for the FIR tables |
//! | [`WindowKind::Blackman`] | -58 dB | wider main lobe |
//! | [`WindowKind::Kaiser`] | tunable | β trades width for attenuation |

#[cfg(not(feature = "std"))]
use alloc::{string::ToString, vec, vec::Vec};

use core::f64::consts::PI;
use core::str::FromStr;
use libm::{cos, exp, pow, sqrt};

use crate::error::FilterError;

/// Window function used to taper FIR coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowKind {
    /// No tapering.
    Rectangular,
    /// Raised cosine reaching zero at both ends.
    Hann,
    /// Raised cosine on a 0.08 pedestal.
    Hamming,
    /// Three-term cosine sum.
    Blackman,
    /// Kaiser–Bessel window with shape parameter β.
    Kaiser {
        /// Shape parameter; 0 is rectangular, larger values taper harder.
        beta: f64,
    },
}

impl WindowKind {
    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangular => "rectangular",
            Self::Hann => "hann",
            Self::Hamming => "hamming",
            Self::Blackman => "blackman",
            Self::Kaiser { .. } => "kaiser",
        }
    }

    /// Symmetric window coefficients of length `size`.
    ///
    /// A length-1 window is `[1.0]`.
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        if size == 0 {
            return Vec::new();
        }
        if size == 1 {
            return vec![1.0];
        }

        let span = (size - 1) as f64;
        match *self {
            Self::Rectangular => vec![1.0; size],
            Self::Hann => (0..size)
                .map(|i| 0.5 - 0.5 * cos(2.0 * PI * i as f64 / span))
                .collect(),
            Self::Hamming => (0..size)
                .map(|i| 0.54 - 0.46 * cos(2.0 * PI * i as f64 / span))
                .collect(),
            Self::Blackman => (0..size)
                .map(|i| {
                    let x = 2.0 * PI * i as f64 / span;
                    0.42 - 0.5 * cos(x) + 0.08 * cos(2.0 * x)
                })
                .collect(),
            Self::Kaiser { beta } => {
                // I0(β·s) / I0(β) as a ratio of scaled values; both overflow
                // separately once β passes ~713.
                let beta = beta.abs();
                let denom = bessel_i0e(beta);
                (0..size)
                    .map(|i| {
                        let r = 2.0 * i as f64 / span - 1.0;
                        let x = beta * sqrt((1.0 - r * r).max(0.0));
                        bessel_i0e(x) / denom * exp(x - beta)
                    })
                    .collect()
            }
        }
    }
}

impl FromStr for WindowKind {
    type Err = FilterError;

    /// Parse a window name. `kaiser` alone means β = 0; `kaiser:8.6` sets β.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (name, arg) = match lower.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (lower.as_str(), None),
        };

        let kind = match name {
            "rectangular" | "rect" | "boxcar" | "none" => Self::Rectangular,
            "hann" | "hanning" => Self::Hann,
            "hamming" => Self::Hamming,
            "blackman" => Self::Blackman,
            "kaiser" => {
                let beta = match arg {
                    Some(arg) => arg
                        .parse::<f64>()
                        .map_err(|_| FilterError::UnknownWindowType(s.to_string()))?,
                    None => 0.0,
                };
                return Ok(Self::Kaiser { beta });
            }
            _ => return Err(FilterError::UnknownWindowType(s.to_string())),
        };

        if arg.is_some() {
            return Err(FilterError::UnknownWindowType(s.to_string()));
        }
        Ok(kind)
    }
}

impl core::fmt::Display for WindowKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Kaiser { beta } => write!(f, "kaiser:{beta}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Modified Bessel function of the first kind, order zero.
///
/// Power series `I0(x) = Σ ((x/2)^k / k!)²`, summed until the next term is
/// below 1e-12 of the running total. Overflows to infinity for `|x|` above
/// ~713; use [`bessel_i0e`] there.
pub fn bessel_i0(x: f64) -> f64 {
    let half_x_sq = (x / 2.0) * (x / 2.0);
    let mut sum = 1.0;
    let mut term = 1.0;
    let mut k = 1.0;

    loop {
        term *= half_x_sq / (k * k);
        sum += term;
        if !sum.is_finite() || term < 1e-12 * sum {
            break;
        }
        k += 1.0;
    }

    sum
}

/// Largest argument for which the series in [`bessel_i0`] stays finite after
/// scaling.
const I0E_SERIES_LIMIT: f64 = 700.0;

/// Exponentially scaled Bessel function, `e^(-|x|) · I0(x)`.
///
/// Finite for every finite `x`. Above 700 the large-argument expansion
/// `I0(x) ≈ e^x / sqrt(2πx) · Σ ((2k-1)!!)² / (k! (8x)^k)` is used.
pub fn bessel_i0e(x: f64) -> f64 {
    let x = x.abs();
    if x <= I0E_SERIES_LIMIT {
        return bessel_i0(x) * exp(-x);
    }

    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..30 {
        let odd = (2 * k - 1) as f64;
        term *= odd * odd / (k as f64 * 8.0 * x);
        sum += term;
        if term < 1e-16 * sum {
            break;
        }
    }
    sum / sqrt(2.0 * PI * x)
}

/// Stop-band attenuation (dB) of a Kaiser-window FIR with `numtaps` taps and
/// a transition width given as a fraction of Nyquist.
pub fn kaiser_atten(numtaps: usize, width_norm: f64) -> f64 {
    2.285 * (numtaps as f64 - 1.0) * PI * width_norm + 7.95
}

/// Kaiser β that achieves `atten_db` of stop-band attenuation.
pub fn kaiser_beta(atten_db: f64) -> f64 {
    if atten_db > 50.0 {
        0.1102 * (atten_db - 8.7)
    } else if atten_db > 21.0 {
        let excess = atten_db - 21.0;
        0.5842 * pow(excess, 0.4) + 0.07886 * excess
    } else {
        0.0
    }
}
