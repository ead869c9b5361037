//! Batch sweep: per-signal operation plans, lazily evaluated with failure
//! isolation.
//!
//! A [`PlanTable`] maps signal names to the list of [`Operation`]s to run on
//! them. [`Pipeline::sweep`] turns one signal into a lazy stream of
//! [`UnitOutcome`]s, one per operation; [`Pipeline::run`] drives a whole batch
//! and hands every successful [`AnalysisResult`] to a caller-supplied sink.
//!
//! A failing unit (bad filter parameters, a trace too short for a filter)
//! is logged and counted; the batch always continues.
//!
//! # Example
//!
//! ```rust
//! use sigsweep_analysis::{Operation, Pipeline, PlanTable, SignalPlan};
//! use sigsweep_core::{IirWeights, MovingAverageSpec, Signal};
//!
//! let plan = SignalPlan::new()
//!     .with(Operation::Spectrum)
//!     .with(IirWeights::new(0.5, 0.5).unwrap())
//!     .with(MovingAverageSpec::new(2).unwrap());
//! let pipeline = Pipeline::new(PlanTable::new().with_plan("sigA", plan));
//!
//! let signal = Signal::from_pairs(&[(0.0, 2.0), (0.1, 4.0), (0.2, 6.0)]).unwrap();
//! let outcomes: Vec<_> = pipeline.sweep("sigA.csv", &signal).collect();
//! assert_eq!(outcomes.len(), 3);
//! assert!(outcomes.iter().all(|o| o.result.is_ok()));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use sigsweep_core::{
    FilterError, FilterSpec, FirCoefficients, FirSpec, IirWeights, MovingAverageSpec, Signal,
};

use crate::response::{DEFAULT_RESPONSE_POINTS, FrequencyResponse, frequency_response};
use crate::spectrum::{Spectrum, one_sided_spectrum};

/// One unit of work applied to a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// One-sided magnitude spectrum.
    Spectrum,
    /// Any filter configuration.
    Filter(FilterSpec),
}

impl Operation {
    /// Artifact tag: `FFT` or the filter's label.
    pub fn label(&self) -> String {
        match self {
            Self::Spectrum => "FFT".to_string(),
            Self::Filter(spec) => spec.label(),
        }
    }
}

impl From<FilterSpec> for Operation {
    fn from(spec: FilterSpec) -> Self {
        Self::Filter(spec)
    }
}

impl From<FirSpec> for Operation {
    fn from(spec: FirSpec) -> Self {
        Self::Filter(spec.into())
    }
}

impl From<IirWeights> for Operation {
    fn from(weights: IirWeights) -> Self {
        Self::Filter(weights.into())
    }
}

impl From<MovingAverageSpec> for Operation {
    fn from(spec: MovingAverageSpec) -> Self {
        Self::Filter(spec.into())
    }
}

/// Ordered operations for one signal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalPlan {
    /// Operations, run in order.
    pub operations: Vec<Operation>,
}

impl SignalPlan {
    /// Empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    #[must_use]
    pub fn with(mut self, op: impl Into<Operation>) -> Self {
        self.operations.push(op.into());
        self
    }

    /// Append an operation.
    pub fn push(&mut self, op: impl Into<Operation>) {
        self.operations.push(op.into());
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// True when nothing is planned.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Plans keyed by signal name, with an optional fallback for unlisted signals.
#[derive(Debug, Clone, Default)]
pub struct PlanTable {
    plans: BTreeMap<String, SignalPlan>,
    fallback: Option<SignalPlan>,
}

impl PlanTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_plan(mut self, name: impl Into<String>, plan: SignalPlan) -> Self {
        self.insert(name, plan);
        self
    }

    /// Builder-style fallback.
    #[must_use]
    pub fn with_fallback(mut self, plan: SignalPlan) -> Self {
        self.fallback = Some(plan);
        self
    }

    /// Insert or replace the plan for `name`.
    pub fn insert(&mut self, name: impl Into<String>, plan: SignalPlan) {
        self.plans.insert(name.into(), plan);
    }

    /// Set the plan used for names with no entry.
    pub fn set_fallback(&mut self, plan: Option<SignalPlan>) {
        self.fallback = plan;
    }

    /// Plan for a signal.
    ///
    /// Tries the exact name, then its file stem (`sigA.csv` finds `sigA`),
    /// then the fallback.
    pub fn get(&self, name: &str) -> Option<&SignalPlan> {
        self.plans
            .get(name)
            .or_else(|| {
                Path::new(name)
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| self.plans.get(stem))
            })
            .or(self.fallback.as_ref())
    }

    /// Names with an explicit plan, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }

    /// Number of named plans.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// True when there are no named plans.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Output of one operation on one signal.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResult {
    /// One-sided magnitude spectrum.
    Spectrum(Spectrum),
    /// FIR low-pass output with its taps and magnitude response.
    Fir {
        /// Time axis of the input.
        time: Vec<f64>,
        /// Filtered amplitude.
        filtered: Vec<f64>,
        /// Designed taps.
        coefficients: FirCoefficients,
        /// Magnitude response of the taps.
        response: FrequencyResponse,
        /// Configuration that produced the taps.
        spec: FirSpec,
    },
    /// Exponential smoother output.
    Iir {
        /// Time axis of the input.
        time: Vec<f64>,
        /// Filtered amplitude.
        filtered: Vec<f64>,
        /// Weights used.
        weights: IirWeights,
    },
    /// Moving average output.
    MovingAverage {
        /// Time axis of the input.
        time: Vec<f64>,
        /// Filtered amplitude.
        filtered: Vec<f64>,
        /// Window length `X`.
        window: usize,
    },
}

impl AnalysisResult {
    /// Family tag: `FFT`, `FIR`, `IIR` or `MAF`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Spectrum(_) => "FFT",
            Self::Fir { .. } => "FIR",
            Self::Iir { .. } => "IIR",
            Self::MovingAverage { .. } => "MAF",
        }
    }

    /// Filtered amplitude, for filter results.
    pub fn filtered(&self) -> Option<&[f64]> {
        match self {
            Self::Spectrum(_) => None,
            Self::Fir { filtered, .. }
            | Self::Iir { filtered, .. }
            | Self::MovingAverage { filtered, .. } => Some(filtered),
        }
    }
}

/// Result of one `(signal, operation)` unit.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    /// Signal name as given to [`Pipeline::sweep`].
    pub signal: String,
    /// Operation label.
    pub operation: String,
    /// Analysis output or the reason the unit failed.
    pub result: Result<AnalysisResult, FilterError>,
}

/// Counts from a [`Pipeline::run`] batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Units that produced a result and were accepted by the sink.
    pub succeeded: usize,
    /// Units that failed, or whose result the sink rejected.
    pub failed: usize,
    /// Signals that could not be loaded or had no plan.
    pub skipped_signals: usize,
}

impl BatchSummary {
    /// True when nothing failed or was skipped.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped_signals == 0
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} succeeded, {} failed, {} signals skipped",
            self.succeeded, self.failed, self.skipped_signals
        )
    }
}

/// Runs plans from a [`PlanTable`] over signals.
#[derive(Debug, Clone)]
pub struct Pipeline {
    table: PlanTable,
    response_points: usize,
}

impl Pipeline {
    /// Pipeline over `table`, evaluating FIR responses at the default
    /// resolution.
    pub fn new(table: PlanTable) -> Self {
        Self {
            table,
            response_points: DEFAULT_RESPONSE_POINTS,
        }
    }

    /// Set how many points FIR frequency responses are evaluated at.
    #[must_use]
    pub fn with_response_points(mut self, points: usize) -> Self {
        self.response_points = points;
        self
    }

    /// The plan table.
    pub fn table(&self) -> &PlanTable {
        &self.table
    }

    /// Run a single operation.
    pub fn execute(&self, op: &Operation, signal: &Signal) -> Result<AnalysisResult, FilterError> {
        let spec = match op {
            Operation::Spectrum => return Ok(AnalysisResult::Spectrum(one_sided_spectrum(signal))),
            Operation::Filter(spec) => spec,
        };

        let output = spec.apply(signal)?;
        let time = signal.time().to_vec();
        let result = match (spec, output.coefficients) {
            (FilterSpec::Fir(fir), Some(coefficients)) => {
                let response =
                    frequency_response(&coefficients, signal.sample_rate(), self.response_points);
                AnalysisResult::Fir {
                    time,
                    filtered: output.filtered,
                    coefficients,
                    response,
                    spec: *fir,
                }
            }
            (FilterSpec::Fir(_), None) => {
                return Err(FilterError::invalid("numtaps", "design produced no taps"));
            }
            (FilterSpec::Iir(weights), _) => AnalysisResult::Iir {
                time,
                filtered: output.filtered,
                weights: *weights,
            },
            (FilterSpec::MovingAverage(ma), _) => AnalysisResult::MovingAverage {
                time,
                filtered: output.filtered,
                window: ma.window,
            },
        };
        Ok(result)
    }

    /// Lazy stream of outcomes for every operation planned for `name`.
    ///
    /// Yields nothing when the table has no plan for the signal. Each call
    /// starts a fresh stream.
    pub fn sweep<'a>(
        &'a self,
        name: &'a str,
        signal: &'a Signal,
    ) -> impl Iterator<Item = UnitOutcome> + 'a {
        self.table
            .get(name)
            .map(|plan| plan.operations.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |op| {
                let operation = op.label();
                tracing::debug!(signal = name, operation = %operation, "running unit");
                UnitOutcome {
                    signal: name.to_string(),
                    operation,
                    result: self.execute(op, signal),
                }
            })
    }

    /// Sweep a batch of loaded (or failed-to-load) signals.
    ///
    /// Every successful result is passed to `sink`. Load failures, missing
    /// plans, unit failures, and sink errors are logged and counted; none of
    /// them stops the batch.
    pub fn run<I, E, F, SE>(&self, signals: I, mut sink: F) -> BatchSummary
    where
        I: IntoIterator<Item = (String, Result<Signal, E>)>,
        E: fmt::Display,
        F: FnMut(&str, &AnalysisResult) -> Result<(), SE>,
        SE: fmt::Display,
    {
        let mut summary = BatchSummary::default();

        for (name, loaded) in signals {
            let signal = match loaded {
                Ok(signal) => signal,
                Err(e) => {
                    tracing::error!(signal = %name, error = %e, "failed to load signal");
                    summary.skipped_signals += 1;
                    continue;
                }
            };

            if self.table.get(&name).is_none() {
                tracing::warn!(signal = %name, "no plan for signal, skipping");
                summary.skipped_signals += 1;
                continue;
            }

            tracing::info!(
                signal = %name,
                samples = signal.len(),
                sample_rate_hz = signal.sample_rate().hz(),
                "sweeping signal"
            );
            warn_on_irregular_rate(&name, &signal);

            for outcome in self.sweep(&name, &signal) {
                match outcome.result {
                    Ok(result) => match sink(&name, &result) {
                        Ok(()) => summary.succeeded += 1,
                        Err(e) => {
                            tracing::error!(
                                signal = %name,
                                operation = %outcome.operation,
                                error = %e,
                                "failed to store result"
                            );
                            summary.failed += 1;
                        }
                    },
                    Err(e) => {
                        tracing::warn!(
                            signal = %name,
                            operation = %outcome.operation,
                            error = %e,
                            "unit failed"
                        );
                        summary.failed += 1;
                    }
                }
            }
        }

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped_signals,
            "batch complete"
        );
        summary
    }
}

/// Log when the first-step rate disagrees with the whole-trace estimate.
fn warn_on_irregular_rate(name: &str, signal: &Signal) {
    let first_step = signal.sample_rate().hz();
    let mean = signal.mean_sample_rate();
    // n / duration overshoots 1/dt by n/(n-1) on a perfectly uniform trace.
    let uniform = first_step * signal.len() as f64 / (signal.len() - 1) as f64;
    if (mean - uniform).abs() > 0.01 * uniform {
        tracing::warn!(
            signal = %name,
            first_step_hz = first_step,
            mean_hz = mean,
            "time axis is not uniformly spaced"
        );
    }
}
