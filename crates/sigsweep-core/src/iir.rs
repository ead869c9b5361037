//! First-order recursive exponential smoothing.
//!
//! ```text
//! out[0] = y[0]
//! out[i] = A · out[i-1] + B · y[i]      for i >= 1
//! ```
//!
//! `A` and `B` are not tied together: `A + B = 1` gives unity DC gain but is
//! not required. `A` close to 1 means heavier smoothing and more lag. Any
//! finite pair is accepted; `|A| >= 1` makes the recursion unstable, which
//! [`IirWeights::is_stable`] reports so callers can warn.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

use crate::error::FilterError;

/// Feedback (`a`) and input (`b`) weights of the smoother.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IirWeights {
    /// Weight on the previous output.
    pub a: f64,
    /// Weight on the current input.
    pub b: f64,
}

impl IirWeights {
    /// Create a weight pair. Both values must be finite.
    pub fn new(a: f64, b: f64) -> Result<Self, FilterError> {
        if !a.is_finite() {
            return Err(FilterError::invalid("a", format!("must be finite, got {a}")));
        }
        if !b.is_finite() {
            return Err(FilterError::invalid("b", format!("must be finite, got {b}")));
        }
        Ok(Self { a, b })
    }

    /// Weights with unity DC gain: `a = alpha`, `b = 1 - alpha`.
    pub fn exponential(alpha: f64) -> Result<Self, FilterError> {
        Self::new(alpha, 1.0 - alpha)
    }

    /// True when the recursion decays (`|a| < 1`).
    pub fn is_stable(&self) -> bool {
        self.a.abs() < 1.0
    }

    /// Steady-state gain for a constant input, `b / (1 - a)`.
    ///
    /// Infinite when `a == 1`.
    pub fn dc_gain(&self) -> f64 {
        self.b / (1.0 - self.a)
    }

    /// Tag used in reports and artifact names, e.g. `IIR_A0.995_B0.005`.
    ///
    /// Whole-number weights keep one decimal, so `(1, 0)` reads
    /// `IIR_A1.0_B0.0`.
    pub fn label(&self) -> String {
        format!("IIR_A{}_B{}", format_weight(self.a), format_weight(self.b))
    }
}

fn format_weight(value: f64) -> String {
    if value.is_finite() && value == libm::trunc(value) {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

/// One-state exponential smoother.
///
/// The first sample after construction or [`reset`](Self::reset) passes
/// through unchanged and seeds the state.
#[derive(Debug, Clone)]
pub struct ExponentialSmoother {
    weights: IirWeights,
    prev: Option<f64>,
}

impl ExponentialSmoother {
    /// Create a smoother with empty state.
    pub fn new(weights: IirWeights) -> Self {
        Self {
            weights,
            prev: None,
        }
    }

    /// Weights in use.
    pub fn weights(&self) -> IirWeights {
        self.weights
    }

    /// Feed one sample and return the smoothed value.
    #[inline]
    pub fn process(&mut self, input: f64) -> f64 {
        let out = match self.prev {
            None => input,
            Some(prev) => self.weights.a * prev + self.weights.b * input,
        };
        self.prev = Some(out);
        out
    }

    /// Forget the previous output.
    pub fn reset(&mut self) {
        self.prev = None;
    }
}

/// Smooth a whole trace with fresh state.
pub fn smooth(weights: IirWeights, input: &[f64]) -> Vec<f64> {
    let mut smoother = ExponentialSmoother::new(weights);
    input.iter().map(|&x| smoother.process(x)).collect()
}
