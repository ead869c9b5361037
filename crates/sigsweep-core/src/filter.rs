//! Uniform entry point over the three filter families.

#[cfg(not(feature = "std"))]
use alloc::{format, string::String, vec::Vec};

use crate::error::FilterError;
use crate::fir::{FirCoefficients, FirSpec, design_lowpass};
use crate::iir::{IirWeights, smooth};
use crate::moving_average::MovingAverageSpec;
use crate::signal::Signal;

/// One filter configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterSpec {
    /// Windowed-sinc FIR low-pass.
    Fir(FirSpec),
    /// First-order exponential smoother.
    Iir(IirWeights),
    /// Zero-padded causal moving average.
    MovingAverage(MovingAverageSpec),
}

/// Output of [`FilterSpec::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOutput {
    /// Filtered amplitude, one value per input sample.
    pub filtered: Vec<f64>,
    /// Taps used, for FIR filters only.
    pub coefficients: Option<FirCoefficients>,
}

impl FilterSpec {
    /// Short family tag: `FIR`, `IIR` or `MAF`.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Fir(_) => "FIR",
            Self::Iir(_) => "IIR",
            Self::MovingAverage(_) => "MAF",
        }
    }

    /// Tag naming this configuration, e.g. `IIR_A0.9_B0.1` or `MAF_X100`.
    pub fn label(&self) -> String {
        match self {
            Self::Fir(spec) => format!("FIR_N{}_C{}", spec.numtaps, spec.cutoff_hz),
            Self::Iir(w) => w.label(),
            Self::MovingAverage(spec) => format!("MAF_X{}", spec.window),
        }
    }

    /// Filter the amplitude column of `signal`.
    pub fn apply(&self, signal: &Signal) -> Result<FilterOutput, FilterError> {
        match self {
            Self::Fir(spec) => {
                let coefficients = design_lowpass(spec, signal.sample_rate())?;
                let filtered = coefficients.apply(signal.amplitude());
                Ok(FilterOutput {
                    filtered,
                    coefficients: Some(coefficients),
                })
            }
            Self::Iir(weights) => {
                #[cfg(feature = "tracing")]
                warn_if_unstable(weights);
                Ok(FilterOutput {
                    filtered: smooth(*weights, signal.amplitude()),
                    coefficients: None,
                })
            }
            Self::MovingAverage(spec) => Ok(FilterOutput {
                filtered: spec.apply(signal.amplitude())?,
                coefficients: None,
            }),
        }
    }
}

#[cfg(feature = "tracing")]
fn warn_if_unstable(weights: &IirWeights) {
    if !weights.is_stable() {
        tracing::warn!(a = weights.a, b = weights.b, "IIR feedback weight |a| >= 1");
    }
}

impl From<FirSpec> for FilterSpec {
    fn from(spec: FirSpec) -> Self {
        Self::Fir(spec)
    }
}

impl From<IirWeights> for FilterSpec {
    fn from(weights: IirWeights) -> Self {
        Self::Iir(weights)
    }
}

impl From<MovingAverageSpec> for FilterSpec {
    fn from(spec: MovingAverageSpec) -> Self {
        Self::MovingAverage(spec)
    }
}
