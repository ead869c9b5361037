//! Two-column CSV trace loading.

use crate::{Error, Result};
use csv::{ReaderBuilder, Trim};
use sigsweep_core::Signal;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read a headerless `time,amplitude` CSV file into a [`Signal`].
///
/// Fields are trimmed, blank lines and lines starting with `#` are skipped.
/// A row that is not exactly two numbers is reported with its line number.
pub fn read_signal_csv<P: AsRef<Path>>(path: P) -> Result<Signal> {
    let file = std::fs::File::open(path)?;
    parse_signal_csv(std::io::BufReader::new(file))
}

/// Parse CSV text from any reader, as [`read_signal_csv`] does for files.
pub fn parse_signal_csv<R: Read>(reader: R) -> Result<Signal> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut time = Vec::new();
    let mut amplitude = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() != 2 {
            return Err(Error::MalformedRow {
                line,
                reason: format!("expected 2 columns, found {}", record.len()),
            });
        }

        let field = |col: usize| {
            record[col].parse::<f64>().map_err(|_| Error::MalformedRow {
                line,
                reason: format!("column {}: '{}' is not a number", col + 1, &record[col]),
            })
        };
        time.push(field(0)?);
        amplitude.push(field(1)?);
    }

    tracing::debug!(samples = time.len(), "parsed signal CSV");
    Ok(Signal::new(time, amplitude)?)
}

/// CSV files in `dir` whose names start with `prefix`, sorted by name.
pub fn discover_signals<P: AsRef<Path>>(dir: P, prefix: &str) -> Result<Vec<PathBuf>> {
    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(prefix))
        })
        .collect();
    found.sort();
    Ok(found)
}

/// Name a signal by its file name (`data/sigA.csv` becomes `sigA.csv`).
pub fn signal_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
