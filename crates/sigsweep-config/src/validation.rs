//! Filter table validation.
//!
//! Two levels of checking:
//!
//! - [`validate_table`] checks every entry on its own: tap counts, positive
//!   finite frequencies, known window names, finite IIR weights, non-zero
//!   moving-average windows. All problems are collected, not just the first.
//! - [`validate_for_sample_rate`] additionally checks one entry against the
//!   sample rate of the trace it will run on, so a cutoff at or above Nyquist
//!   is caught before the batch starts.
//!
//! # Example
//!
//! ```rust
//! use sigsweep_config::{get_factory_table, validate_table};
//!
//! let table = get_factory_table("hw10").unwrap();
//! validate_table(&table).expect("factory tables are valid");
//! ```

use sigsweep_core::{SampleRate, WindowKind};
use thiserror::Error;

use crate::table::{FilterTable, SignalConfig};

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Entry produces no operations.
    #[error("signal '{signal}' has no operations")]
    EmptyPlan {
        /// Signal the entry belongs to.
        signal: String,
    },

    /// Window name not recognized.
    #[error("unknown window '{window}' for signal '{signal}'")]
    UnknownWindow {
        /// Signal the entry belongs to.
        signal: String,
        /// The unrecognized name.
        window: String,
    },

    /// Parameter value outside its domain.
    #[error("{filter} parameter '{param}' for signal '{signal}': {reason}")]
    InvalidParameter {
        /// Signal the entry belongs to.
        signal: String,
        /// Filter family: `FIR`, `IIR` or `MAF`.
        filter: &'static str,
        /// Name of the parameter.
        param: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn collapse(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn positive_finite(value: f64) -> Option<String> {
    if !value.is_finite() {
        Some(format!("must be finite, got {value}"))
    } else if value <= 0.0 {
        Some(format!("must be positive, got {value}"))
    } else {
        None
    }
}

fn check_entry(signal: &str, config: &SignalConfig, errors: &mut Vec<ValidationError>) {
    let invalid = |filter: &'static str, param: &'static str, reason: String| {
        ValidationError::InvalidParameter {
            signal: signal.to_string(),
            filter,
            param,
            reason,
        }
    };

    if config.operation_count() == 0 {
        errors.push(ValidationError::EmptyPlan {
            signal: signal.to_string(),
        });
    }

    if let Some(fir) = &config.fir {
        if fir.numtaps == 0 {
            errors.push(invalid("FIR", "numtaps", "must be at least 1".to_string()));
        }
        if let Some(reason) = positive_finite(fir.cutoff_hz) {
            errors.push(invalid("FIR", "cutoff_hz", reason));
        }
        if let Some(reason) = fir.width_hz.and_then(positive_finite) {
            errors.push(invalid("FIR", "width_hz", reason));
        }
        if fir.window.parse::<WindowKind>().is_err() {
            errors.push(ValidationError::UnknownWindow {
                signal: signal.to_string(),
                window: fir.window.clone(),
            });
        }
    }

    for pair in &config.iir {
        if !pair.a.is_finite() || !pair.b.is_finite() {
            errors.push(invalid(
                "IIR",
                "weights",
                format!("must be finite, got A={} B={}", pair.a, pair.b),
            ));
        }
    }

    if config.moving_average.contains(&0) {
        errors.push(invalid("MAF", "window", "must be at least 1".to_string()));
    }
}

/// Validate a single entry.
pub fn validate_signal_config(signal: &str, config: &SignalConfig) -> ValidationResult<()> {
    let mut errors = Vec::new();
    check_entry(signal, config, &mut errors);
    collapse(errors)
}

/// Validate every entry of a table, including its default.
pub fn validate_table(table: &FilterTable) -> ValidationResult<()> {
    let mut errors = Vec::new();
    for (signal, config) in &table.signals {
        check_entry(signal, config, &mut errors);
    }
    if let Some(default) = &table.default {
        check_entry("default", default, &mut errors);
    }
    collapse(errors)
}

/// Validate an entry against the sample rate of the trace it will run on.
///
/// Catches FIR cutoffs and transition widths at or beyond Nyquist, and warns
/// (without failing) about IIR weights with `|A| >= 1`.
pub fn validate_for_sample_rate(
    signal: &str,
    config: &SignalConfig,
    sample_rate: SampleRate,
) -> ValidationResult<()> {
    let mut errors = Vec::new();
    check_entry(signal, config, &mut errors);

    if let Some(fir) = &config.fir
        && let Ok(spec) = fir.to_spec()
        && let Err(sigsweep_core::FilterError::InvalidFilterParameter { param, reason }) =
            spec.resolve(sample_rate)
    {
        errors.push(ValidationError::InvalidParameter {
            signal: signal.to_string(),
            filter: "FIR",
            param,
            reason,
        });
    }

    for pair in &config.iir {
        if pair.a.abs() >= 1.0 {
            tracing::warn!(signal, a = pair.a, b = pair.b, "IIR feedback weight |A| >= 1");
        }
    }

    collapse(errors)
}
