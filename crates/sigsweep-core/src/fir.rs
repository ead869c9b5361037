//! Windowed-sinc FIR low-pass design and causal application.
//!
//! # Design
//!
//! For `N` taps and a cutoff `c` expressed as a fraction of Nyquist:
//!
//! ```text
//! m[n] = n - (N - 1) / 2
//! h[n] = c · sinc(c · m[n]) · w[n]          sinc(x) = sin(πx) / (πx)
//! h    = h / Σh                             (unit gain at DC)
//! ```
//!
//! When a transition width is requested, `w` is a Kaiser window whose β is
//! picked from the width and tap count (see [`kaiser_atten`]), replacing the
//! named window. Without a width the named window is used as-is.
//!
//! # Application
//!
//! ```text
//! out[i] = Σ_{j=0}^{min(i, N-1)} h[j] · y[i - j]
//! ```
//!
//! Samples before the start of the trace count as zero. The output is delayed
//! by `(N - 1) / 2` samples relative to the input and is left that way.
//!
//! # Usage
//!
//! ```rust
//! use sigsweep_core::{FirSpec, SampleRate, WindowKind, design_lowpass};
//!
//! let spec = FirSpec::new(101, 50.0, WindowKind::Hamming);
//! let coeffs = design_lowpass(&spec, SampleRate::new(1000.0).unwrap()).unwrap();
//! assert_eq!(coeffs.len(), 101);
//! let filtered = coeffs.apply(&[1.0; 500]);
//! assert!((filtered[499] - 1.0).abs() < 1e-9);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, vec, vec::Vec};

use core::f64::consts::PI;
use libm::sin;

use crate::error::FilterError;
use crate::signal::SampleRate;
use crate::window::{WindowKind, kaiser_atten, kaiser_beta};

/// Parameters of a low-pass FIR design, in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirSpec {
    /// Number of taps (filter length).
    pub numtaps: usize,
    /// Cutoff frequency in Hz (the -6 dB point of the response).
    pub cutoff_hz: f64,
    /// Optional transition width in Hz; selects a Kaiser window when set.
    pub width_hz: Option<f64>,
    /// Window applied when no width is given.
    pub window: WindowKind,
}

impl FirSpec {
    /// Design parameters without a transition width.
    pub fn new(numtaps: usize, cutoff_hz: f64, window: WindowKind) -> Self {
        Self {
            numtaps,
            cutoff_hz,
            width_hz: None,
            window,
        }
    }

    /// Request a transition band of `width_hz`.
    pub fn with_width(mut self, width_hz: f64) -> Self {
        self.width_hz = Some(width_hz);
        self
    }

    /// Check the parameters against a sample rate, returning the normalized
    /// cutoff and the window that will actually be applied.
    pub fn resolve(&self, sample_rate: SampleRate) -> Result<(f64, WindowKind), FilterError> {
        if self.numtaps == 0 {
            return Err(FilterError::invalid("numtaps", "must be at least 1"));
        }

        let cutoff_norm = normalized("cutoff_hz", self.cutoff_hz, sample_rate)?;

        let window = match self.width_hz {
            Some(width_hz) => {
                let width_norm = normalized("width_hz", width_hz, sample_rate)?;
                let beta = kaiser_beta(kaiser_atten(self.numtaps, width_norm));
                WindowKind::Kaiser { beta }
            }
            None => self.window,
        };

        Ok((cutoff_norm, window))
    }
}

/// Normalize a frequency to Nyquist and require it to lie strictly in (0, 1).
///
/// Values at or beyond Nyquist are rejected rather than clamped.
fn normalized(param: &'static str, freq_hz: f64, sample_rate: SampleRate) -> Result<f64, FilterError> {
    if !freq_hz.is_finite() {
        return Err(FilterError::invalid(param, format!("must be finite, got {freq_hz}")));
    }
    let norm = sample_rate.normalize(freq_hz);
    if norm > 0.0 && norm < 1.0 {
        Ok(norm)
    } else {
        Err(FilterError::invalid(
            param,
            format!(
                "{freq_hz} Hz is {norm} of Nyquist ({} Hz); must lie strictly between 0 and 1",
                sample_rate.nyquist()
            ),
        ))
    }
}

/// Designed FIR taps, `h[0]` first.
#[derive(Debug, Clone, PartialEq)]
pub struct FirCoefficients(Vec<f64>);

impl FirCoefficients {
    /// Wrap precomputed taps.
    pub fn from_taps(taps: Vec<f64>) -> Result<Self, FilterError> {
        if taps.is_empty() {
            return Err(FilterError::invalid("numtaps", "must be at least 1"));
        }
        Ok(Self(taps))
    }

    /// Taps as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for designed filters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of the taps, i.e. the gain at 0 Hz.
    pub fn dc_gain(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Delay introduced by a linear-phase filter of this length.
    pub fn group_delay_samples(&self) -> f64 {
        (self.0.len() as f64 - 1.0) / 2.0
    }

    /// Filter `input` causally with these taps.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        apply_fir(&self.0, input)
    }

    /// Consume and return the taps.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

#[inline]
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        sin(px) / px
    }
}

/// Design low-pass taps for `spec` at `sample_rate`.
pub fn design_lowpass(spec: &FirSpec, sample_rate: SampleRate) -> Result<FirCoefficients, FilterError> {
    let (cutoff, window) = spec.resolve(sample_rate)?;
    let numtaps = spec.numtaps;

    let alpha = 0.5 * (numtaps as f64 - 1.0);
    let weights = window.coefficients(numtaps);

    let mut taps: Vec<f64> = weights
        .iter()
        .enumerate()
        .map(|(n, w)| cutoff * sinc(cutoff * (n as f64 - alpha)) * w)
        .collect();

    let dc: f64 = taps.iter().sum();
    if !(dc.is_finite() && dc > f64::EPSILON) {
        return Err(FilterError::invalid(
            "numtaps",
            format!("design with {numtaps} taps has no usable DC gain"),
        ));
    }
    for h in &mut taps {
        *h /= dc;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        numtaps,
        cutoff_norm = cutoff,
        window = %window,
        "designed FIR low-pass"
    );

    Ok(FirCoefficients(taps))
}

/// Causal direct-form convolution of `input` with `taps`.
///
/// Output length equals input length; history before index 0 is zero.
pub fn apply_fir(taps: &[f64], input: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; input.len()];
    for (i, o) in out.iter_mut().enumerate() {
        let reach = (i + 1).min(taps.len());
        let mut acc = 0.0;
        for j in 0..reach {
            acc += taps[j] * input[i - j];
        }
        *o = acc;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(hz: f64) -> SampleRate {
        SampleRate::new(hz).unwrap()
    }

    #[test]
    fn length_matches_numtaps() {
        for numtaps in [1, 2, 7, 64, 201] {
            let spec = FirSpec::new(numtaps, 10.0, WindowKind::Hamming);
            let coeffs = design_lowpass(&spec, rate(100.0)).unwrap();
            assert_eq!(coeffs.len(), numtaps);
        }
    }

    #[test]
    fn unit_dc_gain() {
        let spec = FirSpec::new(51, 5.0, WindowKind::Blackman);
        let coeffs = design_lowpass(&spec, rate(100.0)).unwrap();
        assert!((coeffs.dc_gain() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn taps_are_symmetric() {
        let spec = FirSpec::new(31, 12.0, WindowKind::Hamming).with_width(5.0);
        let h = design_lowpass(&spec, rate(100.0)).unwrap();
        let h = h.as_slice();
        for i in 0..h.len() {
            assert!((h[i] - h[h.len() - 1 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn width_selects_kaiser() {
        let spec = FirSpec::new(201, 10.0, WindowKind::Hamming).with_width(5.0);
        let (cutoff, window) = spec.resolve(rate(100.0)).unwrap();
        assert!((cutoff - 0.2).abs() < 1e-12);
        let expected = kaiser_beta(kaiser_atten(201, 0.1));
        assert_eq!(window, WindowKind::Kaiser { beta: expected });
    }

    #[test]
    fn no_width_keeps_named_window() {
        let spec = FirSpec::new(11, 10.0, WindowKind::Hann);
        let (_, window) = spec.resolve(rate(100.0)).unwrap();
        assert_eq!(window, WindowKind::Hann);
    }

    #[test]
    fn rejects_zero_taps() {
        let spec = FirSpec::new(0, 10.0, WindowKind::Hamming);
        let err = design_lowpass(&spec, rate(100.0)).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidFilterParameter { param: "numtaps", .. }
        ));
    }

    #[test]
    fn rejects_cutoff_at_or_above_nyquist() {
        // cutoff 1 Hz against a 1.5 Hz sample rate is 1.33 of Nyquist
        let spec = FirSpec::new(11, 1.0, WindowKind::Hamming);
        let err = design_lowpass(&spec, rate(1.5)).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidFilterParameter { param: "cutoff_hz", .. }
        ));

        let spec = FirSpec::new(11, 50.0, WindowKind::Hamming);
        assert!(design_lowpass(&spec, rate(100.0)).is_err());
    }

    #[test]
    fn rejects_wide_transition() {
        let spec = FirSpec::new(11, 1.0, WindowKind::Hamming).with_width(10.0);
        let err = design_lowpass(&spec, rate(10.0)).unwrap_err();
        assert!(matches!(
            err,
            FilterError::InvalidFilterParameter { param: "width_hz", .. }
        ));
    }

    #[test]
    fn rejects_non_positive_cutoff() {
        let spec = FirSpec::new(11, 0.0, WindowKind::Hamming);
        assert!(design_lowpass(&spec, rate(100.0)).is_err());
        let spec = FirSpec::new(11, f64::NAN, WindowKind::Hamming);
        assert!(design_lowpass(&spec, rate(100.0)).is_err());
    }

    #[test]
    fn two_tap_hann_has_no_dc_gain() {
        // symmetric Hann of length 2 is all zeros
        let spec = FirSpec::new(2, 10.0, WindowKind::Hann);
        assert!(design_lowpass(&spec, rate(100.0)).is_err());
    }

    #[test]
    fn apply_matches_difference_equation() {
        let h = [0.5, 0.25, 0.25];
        let y = [4.0, 8.0, 0.0, 4.0];
        let out = apply_fir(&h, &y);
        assert_eq!(out, vec![2.0, 5.0, 3.0, 4.0]);
    }

    #[test]
    fn apply_keeps_length_with_long_filter() {
        let h = vec![0.1; 10];
        let out = apply_fir(&h, &[1.0, 2.0, 3.0]);
        assert_eq!(out.len(), 3);
        assert!((out[2] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn impulse_returns_taps() {
        let spec = FirSpec::new(9, 20.0, WindowKind::Hamming);
        let coeffs = design_lowpass(&spec, rate(100.0)).unwrap();
        let mut impulse = vec![0.0; 12];
        impulse[0] = 1.0;
        let out = coeffs.apply(&impulse);
        assert_eq!(&out[..9], coeffs.as_slice());
        assert!(out[9..].iter().all(|&x| x == 0.0));
    }

    #[test]
    fn group_delay_is_half_length() {
        let coeffs = FirCoefficients::from_taps(vec![0.2; 5]).unwrap();
        assert_eq!(coeffs.group_delay_samples(), 2.0);
        assert!(FirCoefficients::from_taps(Vec::new()).is_err());
    }

    #[test]
    fn low_cutoff_passes_dc_after_settling() {
        let spec = FirSpec::new(101, 0.5, WindowKind::Hamming);
        let coeffs = design_lowpass(&spec, rate(1000.0)).unwrap();
        let out = coeffs.apply(&[3.0; 400]);
        for &x in &out[100..] {
            assert!((x - 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn long_kaiser_design_at_low_rate() {
        // 10 Hz width at 100 Hz drives beta past 1500
        let spec = FirSpec::new(10000, 1.0, WindowKind::Hamming).with_width(10.0);
        let (_, window) = spec.resolve(rate(100.0)).unwrap();
        assert!(matches!(window, WindowKind::Kaiser { beta } if beta > 1500.0));

        let coeffs = design_lowpass(&spec, rate(100.0)).unwrap();
        assert_eq!(coeffs.len(), 10000);
        assert!(coeffs.as_slice().iter().all(|h| h.is_finite()));
        assert!((coeffs.dc_gain() - 1.0).abs() < 1e-9);
    }
}
