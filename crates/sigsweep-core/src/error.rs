//! Error type shared by every filtering primitive.

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Errors raised while building a signal or designing/applying a filter.
///
/// Every error is local to the (signal, configuration) unit that produced it;
/// callers are expected to report it and move on to the next unit.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Fewer than two samples were supplied, so the sample rate is undefined.
    InsufficientSamples {
        /// Number of samples actually supplied.
        found: usize,
    },
    /// A filter parameter is outside its valid domain.
    InvalidFilterParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// Human-readable description of the violation.
        reason: String,
    },
    /// The window name did not match any known window function.
    UnknownWindowType(String),
    /// The time and amplitude columns have different lengths.
    LengthMismatch {
        /// Length of the time column.
        time: usize,
        /// Length of the amplitude column.
        amplitude: usize,
    },
    /// The first time step is not a finite positive number.
    InvalidTimeAxis {
        /// The offending step `t[1] - t[0]`.
        dt: f64,
    },
}

impl FilterError {
    /// Create an invalid-parameter error.
    pub fn invalid(param: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidFilterParameter {
            param,
            reason: reason.into(),
        }
    }
}

impl core::fmt::Display for FilterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InsufficientSamples { found } => {
                write!(f, "need at least 2 samples to infer a sample rate, got {found}")
            }
            Self::InvalidFilterParameter { param, reason } => {
                write!(f, "invalid filter parameter '{param}': {reason}")
            }
            Self::UnknownWindowType(name) => write!(f, "unknown window type: {name}"),
            Self::LengthMismatch { time, amplitude } => write!(
                f,
                "time column has {time} samples but amplitude column has {amplitude}"
            ),
            Self::InvalidTimeAxis { dt } => {
                write!(f, "time step must be finite and positive, got {dt}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FilterError {}
