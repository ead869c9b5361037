//! sigsweep Analysis - spectra, filter responses, and the batch sweep
//!
//! This crate builds on [`sigsweep_core`] with the pieces that need `std`:
//!
//! - [`fft`] - planned forward FFT (rustfft) over `f64` traces
//! - [`spectrum`] - one-sided `|Y[k]|/n` magnitude spectrum
//! - [`response`] - magnitude response of designed FIR taps
//! - [`pipeline`] - per-signal operation plans, lazy sweeps, batch runs
//!
//! ## Example Workflow
//!
//! ```rust
//! use sigsweep_analysis::{one_sided_spectrum, frequency_response};
//! use sigsweep_core::{FirSpec, Signal, WindowKind, design_lowpass};
//!
//! let y: Vec<f64> = (0..1000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 1000.0).sin())
//!     .collect();
//! let signal = Signal::uniform(y, 1000.0).unwrap();
//!
//! // 1. Where is the energy?
//! let (peak_hz, _) = one_sided_spectrum(&signal).peak().unwrap();
//! assert!((peak_hz - 5.0).abs() <= 1.0);
//!
//! // 2. Design a low-pass above it and check its response
//! let spec = FirSpec::new(201, 20.0, WindowKind::Hamming);
//! let taps = design_lowpass(&spec, signal.sample_rate()).unwrap();
//! let response = frequency_response(&taps, signal.sample_rate(), 2000);
//! assert!(response.gain_at(5.0).unwrap() > 0.99);
//! ```

pub mod fft;
pub mod pipeline;
pub mod response;
pub mod spectrum;

pub use fft::Fft;
pub use pipeline::{
    AnalysisResult, BatchSummary, Operation, Pipeline, PlanTable, SignalPlan, UnitOutcome,
};
pub use response::{DEFAULT_RESPONSE_POINTS, FrequencyResponse, frequency_response};
pub use spectrum::{Spectrum, magnitude_spectrum, one_sided_spectrum};
