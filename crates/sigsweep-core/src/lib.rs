//! sigsweep Core - filtering primitives for captured sensor traces
//!
//! This crate holds the numeric building blocks of the sweep pipeline. Every
//! function works on whole, already-captured traces; nothing here streams,
//! allocates beyond its output, or touches the filesystem.
//!
//! # Signals
//!
//! - [`Signal`] - `(time, amplitude)` trace with at least two samples
//! - [`SampleRate`] - `1 / (t[1] - t[0])`, with Nyquist helpers
//!
//! # Filters
//!
//! - [`design_lowpass`] / [`FirCoefficients`] - windowed-sinc FIR low-pass
//! - [`apply_fir`] - causal direct-form convolution (group delay kept)
//! - [`smooth`] / [`ExponentialSmoother`] - first-order recursive smoothing
//! - [`moving_average`] - zero-padded causal moving average
//! - [`FilterSpec`] - one configuration of any of the above
//!
//! # Windows
//!
//! - [`WindowKind`] - rectangular, Hann, Hamming, Blackman, Kaiser
//!
//! # no_std Support
//!
//! The crate is `no_std` + `alloc` with `libm` for math. Disable the default
//! `std` feature to build it that way:
//!
//! ```toml
//! [dependencies]
//! sigsweep-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use sigsweep_core::{FilterSpec, IirWeights, Signal};
//!
//! let signal = Signal::from_pairs(&[(0.0, 2.0), (0.1, 4.0), (0.2, 6.0)]).unwrap();
//! let spec = FilterSpec::Iir(IirWeights::new(0.5, 0.5).unwrap());
//! let out = spec.apply(&signal).unwrap();
//! assert_eq!(out.filtered, vec![2.0, 3.0, 4.5]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod error;
pub mod filter;
pub mod fir;
pub mod iir;
pub mod moving_average;
pub mod signal;
pub mod window;

// Re-export main types at crate root
pub use error::FilterError;
pub use filter::{FilterOutput, FilterSpec};
pub use fir::{FirCoefficients, FirSpec, apply_fir, design_lowpass};
pub use iir::{ExponentialSmoother, IirWeights, smooth};
pub use moving_average::{MovingAverageSpec, moving_average};
pub use signal::{SampleRate, Signal};
pub use window::{WindowKind, bessel_i0, bessel_i0e, kaiser_atten, kaiser_beta};
