//! Integration tests for sigsweep-io: CSV traces in, CSV artifacts out.

use sigsweep_analysis::{Operation, Pipeline, PlanTable, SignalPlan};
use sigsweep_core::{FirSpec, IirWeights, MovingAverageSpec, WindowKind};
use sigsweep_io::{
    CsvResultSink, MemorySink, ResultSink, discover_signals, read_signal_csv, signal_name,
};
use std::fmt::Write as _;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write a headerless `time,amplitude` file of a sine plus offset.
fn write_trace(path: &Path, fs: f64, n: usize, freq_hz: f64) {
    let mut text = String::new();
    for i in 0..n {
        let t = i as f64 / fs;
        let y = 1.0 + (2.0 * std::f64::consts::PI * freq_hz * t).sin();
        writeln!(text, "{t},{y}").unwrap();
    }
    std::fs::write(path, text).unwrap();
}

fn plan() -> SignalPlan {
    SignalPlan::new()
        .with(Operation::Spectrum)
        .with(FirSpec::new(31, 20.0, WindowKind::Hamming).with_width(10.0))
        .with(IirWeights::new(0.9, 0.1).unwrap())
        .with(IirWeights::new(0.99, 0.01).unwrap())
        .with(MovingAverageSpec::new(10).unwrap())
}

fn count_rows(path: &Path) -> usize {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    rdr.records().count()
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn batch_writes_every_artifact() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_trace(&input.path().join("sigA.csv"), 200.0, 400, 5.0);
    write_trace(&input.path().join("sigB.csv"), 200.0, 300, 50.0);

    let pipeline = Pipeline::new(PlanTable::new().with_fallback(plan())).with_response_points(100);
    let mut sink = CsvResultSink::new(output.path());
    sink.prepare().unwrap();

    let paths = discover_signals(input.path(), "sig").unwrap();
    let signals = paths.iter().map(|p| (signal_name(p), read_signal_csv(p)));
    let summary = pipeline.run(signals, |name, result| sink.write(name, result));

    assert!(summary.is_clean(), "{summary}");
    assert_eq!(summary.succeeded, 10);

    let out = output.path();
    assert_eq!(count_rows(&out.join("FFT/sigA.csv")), 200);
    assert_eq!(count_rows(&out.join("FIR/sigA_filtered.csv")), 400);
    assert_eq!(count_rows(&out.join("FIR/sigA_freq_response.csv")), 100);
    assert_eq!(count_rows(&out.join("IIR/sigB_IIR_A0.9_B0.1.csv")), 300);
    assert_eq!(count_rows(&out.join("IIR/sigB_IIR_A0.99_B0.01.csv")), 300);
    assert_eq!(count_rows(&out.join("MAF/sigB_MAF_X10.csv")), 300);
}

#[test]
fn spectrum_artifact_shows_the_tone() {
    let input = TempDir::new().unwrap();
    let path = input.path().join("sigA.csv");
    write_trace(&path, 200.0, 400, 25.0);

    let pipeline =
        Pipeline::new(PlanTable::new().with_plan("sigA", SignalPlan::new().with(Operation::Spectrum)));
    let signal = read_signal_csv(&path).unwrap();
    let mut sink = MemorySink::new();
    sink.prepare().unwrap();
    let summary = pipeline.run([(signal_name(&path), Ok::<_, sigsweep_io::Error>(signal))], |n, r| {
        sink.write(n, r)
    });
    assert_eq!(summary.succeeded, 1);

    let (_, result) = &sink.records[0];
    let sigsweep_analysis::AnalysisResult::Spectrum(spectrum) = result else {
        panic!("expected spectrum, got {}", result.kind());
    };
    // DC offset of 1.0 stays in bin 0; the tone is the peak above it.
    assert!((spectrum.magnitudes[0] - 1.0).abs() < 1e-9);
    let (freq, mag) = spectrum.peak().unwrap();
    assert!((freq - 25.0).abs() < 1e-9);
    assert!((mag - 0.5).abs() < 1e-6);
}

#[test]
fn unreadable_signal_is_skipped() {
    let input = TempDir::new().unwrap();
    write_trace(&input.path().join("sigA.csv"), 100.0, 50, 2.0);
    std::fs::write(input.path().join("sigB.csv"), "0.0,1.0\n0.1,oops\n").unwrap();

    let pipeline = Pipeline::new(PlanTable::new().with_fallback(plan())).with_response_points(16);
    let mut sink = MemorySink::new();
    sink.prepare().unwrap();

    let paths = discover_signals(input.path(), "sig").unwrap();
    let signals = paths.iter().map(|p| (signal_name(p), read_signal_csv(p)));
    let summary = pipeline.run(signals, |name, result| sink.write(name, result));

    assert_eq!(summary.skipped_signals, 1);
    assert_eq!(summary.succeeded, 5);
    assert_eq!(sink.for_signal("sigB.csv").count(), 0);
}

#[test]
fn factory_table_runs_on_bench_like_capture() {
    // sigC-style capture: 1 kHz for 6 s, enough for the 5000-sample window.
    let input = TempDir::new().unwrap();
    let path = input.path().join("sigC.csv");
    write_trace(&path, 1000.0, 6000, 3.0);

    let table = sigsweep_config::get_factory_table("hw10")
        .unwrap()
        .to_plan_table()
        .unwrap();
    let pipeline = Pipeline::new(table).with_response_points(256);
    let mut sink = MemorySink::new();
    let signals = [(signal_name(&path), read_signal_csv(&path))];
    let summary = pipeline.run(signals, |name, result| sink.write(name, result));

    assert!(summary.is_clean(), "{summary}");
    assert_eq!(summary.succeeded, 10);
}
