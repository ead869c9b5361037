//! Captured traces and the sample rate derived from them.
//!
//! A [`Signal`] is an ordered sequence of `(time, amplitude)` samples. The
//! sample rate is inferred from the first time step:
//!
//! ```text
//! Fs = 1 / (t[1] - t[0])
//! ```
//!
//! Spacing is assumed uniform. Only the first step is checked; jitter later in
//! the trace goes unnoticed.
//!
//! # Usage
//!
//! ```rust
//! use sigsweep_core::Signal;
//!
//! let signal = Signal::from_pairs(&[(0.0, 1.0), (0.001, 2.0), (0.002, 3.0)]).unwrap();
//! assert!((signal.sample_rate().hz() - 1000.0).abs() < 1e-9);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

use crate::error::FilterError;

/// Sample rate in Hz, derived from a signal's time axis.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SampleRate(f64);

impl SampleRate {
    /// Wrap a rate in Hz. Rejects non-finite and non-positive values.
    pub fn new(hz: f64) -> Result<Self, FilterError> {
        if hz.is_finite() && hz > 0.0 {
            Ok(Self(hz))
        } else {
            Err(FilterError::invalid(
                "sample_rate",
                format!("must be finite and positive, got {hz}"),
            ))
        }
    }

    /// Rate in Hz.
    #[inline]
    pub fn hz(self) -> f64 {
        self.0
    }

    /// Nyquist frequency (`Fs / 2`).
    #[inline]
    pub fn nyquist(self) -> f64 {
        self.0 / 2.0
    }

    /// Sample period in seconds.
    #[inline]
    pub fn period(self) -> f64 {
        1.0 / self.0
    }

    /// Express a frequency in Hz relative to Nyquist.
    #[inline]
    pub fn normalize(self, freq_hz: f64) -> f64 {
        freq_hz / self.nyquist()
    }
}

/// A finite, already-captured trace.
///
/// # Invariants
///
/// - `time.len() == amplitude.len() >= 2`
/// - `time[1] - time[0]` is finite and positive
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    time: Vec<f64>,
    amplitude: Vec<f64>,
    sample_rate: SampleRate,
}

impl Signal {
    /// Build a signal from separate time and amplitude columns.
    pub fn new(time: Vec<f64>, amplitude: Vec<f64>) -> Result<Self, FilterError> {
        if time.len() != amplitude.len() {
            return Err(FilterError::LengthMismatch {
                time: time.len(),
                amplitude: amplitude.len(),
            });
        }
        if time.len() < 2 {
            return Err(FilterError::InsufficientSamples { found: time.len() });
        }

        let dt = time[1] - time[0];
        if !(dt.is_finite() && dt > 0.0) {
            return Err(FilterError::InvalidTimeAxis { dt });
        }

        Ok(Self {
            time,
            amplitude,
            sample_rate: SampleRate(1.0 / dt),
        })
    }

    /// Build a signal from `(time, amplitude)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, FilterError> {
        let (time, amplitude) = pairs.iter().copied().unzip();
        Self::new(time, amplitude)
    }

    /// Build a signal sampled at `sample_rate_hz` starting at `t = 0`.
    pub fn uniform(amplitude: Vec<f64>, sample_rate_hz: f64) -> Result<Self, FilterError> {
        let rate = SampleRate::new(sample_rate_hz)?;
        let period = rate.period();
        let time = (0..amplitude.len()).map(|i| i as f64 * period).collect();
        Self::new(time, amplitude)
    }

    /// Time axis in seconds.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Amplitude samples.
    pub fn amplitude(&self) -> &[f64] {
        &self.amplitude
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false; a signal holds at least two samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Sample rate inferred from the first time step.
    pub fn sample_rate(&self) -> SampleRate {
        self.sample_rate
    }

    /// First time step `t[1] - t[0]`.
    pub fn dt(&self) -> f64 {
        self.time[1] - self.time[0]
    }

    /// Span between the first and last timestamp.
    pub fn duration(&self) -> f64 {
        self.time[self.time.len() - 1] - self.time[0]
    }

    /// Whole-trace rate estimate: sample count over duration.
    ///
    /// Differs from [`sample_rate`](Self::sample_rate) by roughly one sample
    /// per trace even for perfectly uniform spacing, and is the figure to
    /// look at when the capture jittered.
    pub fn mean_sample_rate(&self) -> f64 {
        self.len() as f64 / self.duration()
    }

    /// Split back into `(time, amplitude)` columns.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.time, self.amplitude)
    }
}
