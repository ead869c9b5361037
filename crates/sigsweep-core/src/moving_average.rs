//! Causal moving average with zero-filled history.
//!
//! The trace is conceptually prefixed with `X - 1` zeros, then averaged over
//! a sliding window of `X` samples:
//!
//! ```text
//! out[i] = (1/X) · Σ_{j = max(0, i-X+1)}^{i} y[j]
//! ```
//!
//! The missing left-hand samples count as zero, so the first `X - 1` outputs
//! read low. That is the intended edge policy.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::error::FilterError;

/// Window length of a moving-average filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MovingAverageSpec {
    /// Number of samples averaged (`X`).
    pub window: usize,
}

impl MovingAverageSpec {
    /// Create a spec; the window must be at least one sample.
    pub fn new(window: usize) -> Result<Self, FilterError> {
        if window == 0 {
            return Err(FilterError::invalid("window", "must be at least 1"));
        }
        Ok(Self { window })
    }

    /// Apply to `input`.
    pub fn apply(&self, input: &[f64]) -> Result<Vec<f64>, FilterError> {
        moving_average(input, self.window)
    }
}

/// Zero-padded causal moving average of `input` over `window` samples.
///
/// The window may be longer than the trace; every output then averages
/// against mostly zeros.
pub fn moving_average(input: &[f64], window: usize) -> Result<Vec<f64>, FilterError> {
    if window == 0 {
        return Err(FilterError::invalid("window", "must be at least 1"));
    }

    let scale = window as f64;
    let mut out = vec![0.0; input.len()];
    let mut sum = 0.0;
    for (i, (o, &x)) in out.iter_mut().zip(input).enumerate() {
        // Drop the outgoing sample before adding the new one so `X = 1`
        // reproduces the input exactly.
        if i >= window {
            sum -= input[i - window];
        }
        sum += x;
        *o = sum / scale;
    }
    Ok(out)
}
