//! Shared CLI helpers used across multiple commands.

use sigsweep_analysis::{AnalysisResult, Operation, Pipeline, PlanTable};
use sigsweep_config::{FilterTable, resolve_table};
use sigsweep_core::Signal;
use sigsweep_io::{CsvResultSink, ResultSink, artifact_name, read_signal_csv, signal_name};
use std::path::Path;

/// Load a trace and print a one-line summary of it.
pub fn load_signal(path: &Path) -> anyhow::Result<(String, Signal)> {
    let signal = read_signal_csv(path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {}", path.display(), e))?;

    println!(
        "  {} samples, {:.3} Hz, {:.3}s",
        signal.len(),
        signal.sample_rate().hz(),
        signal.duration()
    );

    Ok((signal_name(path), signal))
}

/// Load a filter table by name or path.
///
/// Searches in this order:
/// 1. File path (if it points at a .toml file)
/// 2. User tables (by name)
/// 3. Factory tables (by name)
pub fn load_table(name: &str) -> anyhow::Result<FilterTable> {
    resolve_table(name).map_err(|e| {
        anyhow::anyhow!("{e}. Use 'sigsweep tables list' to see available tables.")
    })
}

/// Run one operation on one trace, optionally writing its artifacts under
/// `output`.
///
/// Only the result's family folder is created; existing artifacts from
/// earlier runs are left alone.
pub fn analyze_one(
    input: &Path,
    op: impl Into<Operation>,
    output: Option<&Path>,
    response_points: usize,
) -> anyhow::Result<(String, Signal, AnalysisResult)> {
    let op = op.into();
    println!("Running {} on {}...", op.label(), input.display());

    let (name, signal) = load_signal(input)?;
    let pipeline = Pipeline::new(PlanTable::new()).with_response_points(response_points);
    let result = pipeline.execute(&op, &signal)?;

    if let Some(root) = output {
        let dir = root.join(result.kind());
        std::fs::create_dir_all(&dir)?;
        let mut sink = CsvResultSink::new(root);
        sink.write(&name, &result)?;
        println!("Wrote {}", dir.join(artifact_name(&name, &result)).display());
    }

    Ok((name, signal, result))
}

/// Largest and smallest value, or `(0, 0)` for an empty slice.
pub fn value_range(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Root-mean-square of the difference between two equally long traces.
pub fn rms_difference(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }
    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    (sum / n as f64).sqrt()
}
