//! Destinations for analysis results.

use crate::Result;
use sigsweep_analysis::AnalysisResult;
use std::path::{Path, PathBuf};

/// Receives every successful analysis result of a batch.
pub trait ResultSink {
    /// Get the destination ready before the first result.
    fn prepare(&mut self) -> Result<()>;

    /// Store one result for the named signal.
    fn write(&mut self, signal: &str, result: &AnalysisResult) -> Result<()>;
}

/// Folders written by [`CsvResultSink`], one per result family.
const FAMILY_DIRS: [&str; 4] = ["FFT", "FIR", "IIR", "MAF"];

/// Folders emptied by [`CsvResultSink::prepare`] so stale sweeps don't linger.
const RECREATED_DIRS: [&str; 2] = ["FIR", "IIR"];

/// Base name of a signal: its file stem (`sigA.csv` becomes `sigA`).
fn base_name(signal: &str) -> &str {
    Path::new(signal)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(signal)
}

/// File name of the primary artifact for `result`, relative to its family
/// folder.
///
/// | Result | Name |
/// |--------|------|
/// | Spectrum | `{base}.csv` |
/// | FIR | `{base}_filtered.csv` (plus `{base}_freq_response.csv`) |
/// | IIR | `{base}_IIR_A{A}_B{B}.csv` |
/// | Moving average | `{base}_MAF_X{X}.csv` |
pub fn artifact_name(signal: &str, result: &AnalysisResult) -> String {
    let base = base_name(signal);
    match result {
        AnalysisResult::Spectrum(_) => format!("{base}.csv"),
        AnalysisResult::Fir { .. } => format!("{base}_filtered.csv"),
        AnalysisResult::Iir { weights, .. } => format!("{base}_{}.csv", weights.label()),
        AnalysisResult::MovingAverage { window, .. } => format!("{base}_MAF_X{window}.csv"),
    }
}

/// Writes each result as CSV under `FFT/`, `FIR/`, `IIR/` and `MAF/` folders
/// of an output root.
#[derive(Debug, Clone)]
pub struct CsvResultSink {
    root: PathBuf,
}

impl CsvResultSink {
    /// Sink rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn family_dir(&self, result: &AnalysisResult) -> PathBuf {
        self.root.join(result.kind())
    }

    fn write_columns(path: &Path, header: [&str; 2], x: &[f64], y: &[f64]) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(header)?;
        for (a, b) in x.iter().zip(y) {
            writer.serialize((a, b))?;
        }
        writer.flush()?;
        tracing::debug!(path = %path.display(), rows = x.len(), "wrote artifact");
        Ok(())
    }
}

impl ResultSink for CsvResultSink {
    fn prepare(&mut self) -> Result<()> {
        for dir in FAMILY_DIRS {
            let path = self.root.join(dir);
            if RECREATED_DIRS.contains(&dir) && path.exists() {
                std::fs::remove_dir_all(&path)?;
            }
            std::fs::create_dir_all(&path)?;
        }
        tracing::info!(root = %self.root.display(), "prepared output folders");
        Ok(())
    }

    fn write(&mut self, signal: &str, result: &AnalysisResult) -> Result<()> {
        let dir = self.family_dir(result);
        let path = dir.join(artifact_name(signal, result));

        match result {
            AnalysisResult::Spectrum(spectrum) => Self::write_columns(
                &path,
                ["frequency_hz", "magnitude"],
                &spectrum.frequencies,
                &spectrum.magnitudes,
            ),
            AnalysisResult::Fir {
                time,
                filtered,
                response,
                ..
            } => {
                Self::write_columns(&path, ["time", "filtered"], time, filtered)?;
                let response_path =
                    dir.join(format!("{}_freq_response.csv", base_name(signal)));
                Self::write_columns(
                    &response_path,
                    ["frequency_hz", "gain"],
                    &response.frequencies,
                    &response.gains,
                )
            }
            AnalysisResult::Iir { time, filtered, .. }
            | AnalysisResult::MovingAverage { time, filtered, .. } => {
                Self::write_columns(&path, ["time", "filtered"], time, filtered)
            }
        }
    }
}

/// Keeps results in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// `(signal, result)` pairs received so far.
    pub records: Vec<(String, AnalysisResult)>,
    prepared: bool,
}

impl MemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once [`ResultSink::prepare`] has been called.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Results recorded for one signal.
    pub fn for_signal<'a>(&'a self, signal: &'a str) -> impl Iterator<Item = &'a AnalysisResult> {
        self.records
            .iter()
            .filter(move |(name, _)| name == signal)
            .map(|(_, result)| result)
    }
}

impl ResultSink for MemorySink {
    fn prepare(&mut self) -> Result<()> {
        self.records.clear();
        self.prepared = true;
        Ok(())
    }

    fn write(&mut self, signal: &str, result: &AnalysisResult) -> Result<()> {
        self.records.push((signal.to_string(), result.clone()));
        Ok(())
    }
}
