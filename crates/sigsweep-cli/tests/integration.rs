//! Integration tests for sigsweep-cli.
//!
//! Tests cover the CLI binary invocation and end-to-end sweeps over traces
//! written to temporary folders.

use std::fmt::Write as _;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `sigsweep` binary built by cargo.
fn sigsweep_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sigsweep"))
}

fn run_ok(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run sigsweep");
    assert!(
        output.status.success(),
        "sigsweep failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn run_err(cmd: &mut Command) -> Output {
    let output = cmd.output().expect("failed to run sigsweep");
    assert!(!output.status.success(), "sigsweep should have failed");
    output
}

/// Write `offset + sin(2π·f·t)` as a headerless two-column trace.
fn write_trace(path: &Path, fs: f64, n: usize, freq_hz: f64) {
    let mut text = String::new();
    for i in 0..n {
        let t = i as f64 / fs;
        let y = 1.0 + (2.0 * std::f64::consts::PI * freq_hz * t).sin();
        writeln!(text, "{t},{y}").unwrap();
    }
    std::fs::write(path, text).unwrap();
}

const SMALL_TABLE: &str = r#"
name = "small"
description = "Short filters for test traces"

[default]
spectrum = true
moving_average = [4, 16]

[default.fir]
numtaps = 21
cutoff_hz = 10.0
width_hz = 5.0

[[default.iir]]
a = 0.9
b = 0.1
"#;

// ---------------------------------------------------------------------------
// Help and single-trace commands
// ---------------------------------------------------------------------------

#[test]
fn cli_help_lists_commands() {
    let stdout = run_ok(sigsweep_bin().arg("--help"));
    for command in ["info", "spectrum", "fir", "iir", "maf", "run", "tables"] {
        assert!(stdout.contains(command), "help should list '{command}'");
    }
}

#[test]
fn cli_info_reports_rate_and_length() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigA.csv");
    write_trace(&path, 100.0, 250, 3.0);

    let stdout = run_ok(sigsweep_bin().arg("info").arg(&path));
    assert!(stdout.contains("Samples:     250"), "{stdout}");
    assert!(stdout.contains("100.000 Hz"), "{stdout}");
    assert!(stdout.contains("Nyquist:     50.000 Hz"), "{stdout}");
}

#[test]
fn cli_info_missing_file_fails() {
    run_err(sigsweep_bin().args(["info", "/nonexistent/sigZ.csv"]));
}

#[test]
fn cli_spectrum_finds_tone_and_writes_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigA.csv");
    let json = dir.path().join("spectrum.json");
    write_trace(&path, 200.0, 400, 25.0);

    let stdout = run_ok(
        sigsweep_bin()
            .arg("spectrum")
            .arg(&path)
            .args(["--peaks", "1", "--json"])
            .arg(&json)
            .arg("--output")
            .arg(dir.path()),
    );
    assert!(stdout.contains("25.0000"), "{stdout}");
    assert!(dir.path().join("FFT/sigA.csv").is_file());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
    assert_eq!(value["num_bins"], 200);
    assert_eq!(value["signal"], "sigA.csv");
}

#[test]
fn cli_fir_writes_filtered_and_response() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigC.csv");
    write_trace(&path, 200.0, 400, 2.0);

    let stdout = run_ok(
        sigsweep_bin()
            .arg("fir")
            .arg(&path)
            .args(["--numtaps", "31", "--cutoff", "10", "--width", "5"])
            .args(["--response-points", "64", "--output"])
            .arg(dir.path()),
    );
    assert!(stdout.contains("Taps:        31"), "{stdout}");
    assert!(stdout.contains("kaiser"), "{stdout}");
    assert!(stdout.contains("Group delay: 15.0 samples"), "{stdout}");
    assert!(dir.path().join("FIR/sigC_filtered.csv").is_file());
    assert!(dir.path().join("FIR/sigC_freq_response.csv").is_file());
}

#[test]
fn cli_fir_rejects_cutoff_beyond_nyquist() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigA.csv");
    write_trace(&path, 10.0, 50, 1.0);

    let output = run_err(
        sigsweep_bin()
            .arg("fir")
            .arg(&path)
            .args(["--numtaps", "11", "--cutoff", "8"]),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cutoff"), "{stderr}");
}

#[test]
fn cli_fir_rejects_unknown_window() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigA.csv");
    write_trace(&path, 100.0, 50, 1.0);

    run_err(
        sigsweep_bin()
            .arg("fir")
            .arg(&path)
            .args(["--numtaps", "11", "--cutoff", "5", "--window", "triangle"]),
    );
}

#[test]
fn cli_iir_names_artifact_by_weights() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigB.csv");
    write_trace(&path, 100.0, 100, 1.0);

    run_ok(
        sigsweep_bin()
            .arg("iir")
            .arg(&path)
            .args(["-a", "0.9", "-b", "0.1", "--output"])
            .arg(dir.path()),
    );
    assert!(dir.path().join("IIR/sigB_IIR_A0.9_B0.1.csv").is_file());
}

#[test]
fn cli_maf_zero_window_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigB.csv");
    write_trace(&path, 100.0, 100, 1.0);

    run_err(sigsweep_bin().arg("maf").arg(&path).args(["-x", "0"]));
}

#[test]
fn cli_maf_writes_artifact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sigD.csv");
    write_trace(&path, 100.0, 100, 1.0);

    let stdout = run_ok(
        sigsweep_bin()
            .arg("maf")
            .arg(&path)
            .args(["-x", "10", "--output"])
            .arg(dir.path()),
    );
    assert!(stdout.contains("Window:   10 samples"), "{stdout}");
    assert!(dir.path().join("MAF/sigD_MAF_X10.csv").is_file());
}

// ---------------------------------------------------------------------------
// Batch runs
// ---------------------------------------------------------------------------

#[test]
fn cli_run_sweeps_folder_with_table_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_trace(&input.path().join("sigA.csv"), 100.0, 300, 2.0);
    write_trace(&input.path().join("sigB.csv"), 100.0, 200, 30.0);
    write_trace(&input.path().join("other.csv"), 100.0, 200, 30.0);
    let table = input.path().join("small.toml");
    std::fs::write(&table, SMALL_TABLE).unwrap();
    let summary = output.path().join("summary.json");

    let stdout = run_ok(
        sigsweep_bin()
            .arg("run")
            .arg("--input")
            .arg(input.path())
            .arg("--output")
            .arg(output.path())
            .arg("--table")
            .arg(&table)
            .args(["--response-points", "32", "--strict", "--summary"])
            .arg(&summary),
    );
    assert!(stdout.contains("10 succeeded, 0 failed, 0 signals skipped"), "{stdout}");

    let out = output.path();
    for name in [
        "FFT/sigA.csv",
        "FIR/sigA_filtered.csv",
        "FIR/sigA_freq_response.csv",
        "IIR/sigA_IIR_A0.9_B0.1.csv",
        "MAF/sigA_MAF_X4.csv",
        "MAF/sigB_MAF_X16.csv",
    ] {
        assert!(out.join(name).is_file(), "missing {name}");
    }
    assert!(!out.join("FFT/other.csv").exists());

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&summary).unwrap()).unwrap();
    assert_eq!(value["succeeded"], 10);
    assert_eq!(value["table"], "small");
}

#[test]
fn cli_run_continues_past_bad_trace() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_trace(&input.path().join("sigA.csv"), 100.0, 100, 2.0);
    std::fs::write(input.path().join("sigB.csv"), "0,1\n0.01,x\n").unwrap();

    let mut cmd = sigsweep_bin();
    cmd.arg("run")
        .arg("--input")
        .arg(input.path())
        .arg("--output")
        .arg(output.path())
        .args(["--table", "survey"]);

    let stdout = run_ok(&mut cmd);
    assert!(stdout.contains("1 succeeded, 0 failed, 1 signals skipped"), "{stdout}");
    assert!(output.path().join("FFT/sigA.csv").is_file());

    run_err(cmd.arg("--strict"));
}

#[test]
fn cli_run_empty_folder_fails() {
    let input = TempDir::new().unwrap();
    let output = run_err(
        sigsweep_bin()
            .arg("run")
            .arg("--input")
            .arg(input.path())
            .arg("--output")
            .arg(input.path()),
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("No sig*.csv files"));
}

#[test]
fn cli_run_unknown_table_fails() {
    let input = TempDir::new().unwrap();
    write_trace(&input.path().join("sigA.csv"), 100.0, 100, 2.0);
    run_err(
        sigsweep_bin()
            .arg("run")
            .arg("--input")
            .arg(input.path())
            .args(["--table", "no-such-table"]),
    );
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[test]
fn cli_tables_list_shows_factory_tables() {
    let stdout = run_ok(sigsweep_bin().args(["tables", "list", "--factory"]));
    assert!(stdout.contains("hw10"));
    assert!(stdout.contains("survey"));
}

#[test]
fn cli_tables_show_lists_operations() {
    let stdout = run_ok(sigsweep_bin().args(["tables", "show", "hw10"]));
    assert!(stdout.contains("sigC (10 operations)"), "{stdout}");
    assert!(stdout.contains("FIR_N201_C10"), "{stdout}");
    assert!(stdout.contains("IIR_A0.7_B0.3"), "{stdout}");
    assert!(stdout.contains("MAF_X5000"), "{stdout}");
}

#[test]
fn cli_tables_check_accepts_factory_table() {
    let stdout = run_ok(sigsweep_bin().args(["tables", "check", "hw10"]));
    assert!(stdout.contains("is valid"));
}

#[test]
fn cli_tables_check_rejects_bad_window() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "name = \"bad\"\n[signals.sigA.fir]\nnumtaps = 11\ncutoff_hz = 1.0\nwindow = \"triangle\"\n",
    )
    .unwrap();
    run_err(sigsweep_bin().args(["tables", "check"]).arg(&path));
}

#[cfg(target_os = "linux")]
#[test]
fn cli_tables_copy_and_delete_in_user_dir() {
    let config = TempDir::new().unwrap();
    let with_config = |args: &[&str]| {
        let mut cmd = sigsweep_bin();
        cmd.env("XDG_CONFIG_HOME", config.path()).args(args);
        cmd
    };

    run_ok(&mut with_config(&["tables", "copy", "survey", "--name", "mine"]));
    let saved = config.path().join("sigsweep/tables/mine.toml");
    assert!(saved.is_file());

    let stdout = run_ok(&mut with_config(&["tables", "list", "--user"]));
    assert!(stdout.contains("mine"), "{stdout}");

    run_err(&mut with_config(&["tables", "copy", "survey", "--name", "mine"]));
    run_err(&mut with_config(&["tables", "delete", "survey", "--force"]));
    run_err(&mut with_config(&["tables", "delete", "mine"]));
    run_ok(&mut with_config(&["tables", "delete", "mine", "--force"]));
    assert!(!saved.exists());
}
