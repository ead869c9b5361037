//! Trace loading and result storage for sigsweep.
//!
//! This crate provides:
//!
//! - **Loading**: [`read_signal_csv`] for headerless `time,amplitude` files and
//!   [`discover_signals`] to find a batch of them
//! - **Storage**: the [`ResultSink`] trait, with [`CsvResultSink`] writing one
//!   CSV per artifact and [`MemorySink`] keeping results for inspection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sigsweep_analysis::Pipeline;
//! use sigsweep_config::get_factory_table;
//! use sigsweep_io::{CsvResultSink, ResultSink, discover_signals, read_signal_csv, signal_name};
//!
//! let table = get_factory_table("hw10").unwrap().to_plan_table().unwrap();
//! let pipeline = Pipeline::new(table);
//! let mut sink = CsvResultSink::new("out");
//! sink.prepare().unwrap();
//!
//! let paths = discover_signals(".", "sig").unwrap();
//! let signals = paths.iter().map(|p| (signal_name(p), read_signal_csv(p)));
//! let summary = pipeline.run(signals, |name, result| sink.write(name, result));
//! println!("{summary}");
//! ```

mod csv_source;
mod sink;

pub use csv_source::{discover_signals, parse_signal_csv, read_signal_csv, signal_name};
pub use sink::{CsvResultSink, MemorySink, ResultSink, artifact_name};

/// Error types for trace I/O.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row that is not two numeric columns.
    #[error("line {line}: {reason}")]
    MalformedRow {
        /// 1-based line number in the file.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// The columns do not form a valid signal.
    #[error("invalid signal: {0}")]
    Signal(#[from] sigsweep_core::FilterError),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for trace I/O.
pub type Result<T> = std::result::Result<T, Error>;
