//! Magnitude spectrum of a trace.

use super::common::analyze_one;
use clap::Args;
use sigsweep_analysis::{AnalysisResult, DEFAULT_RESPONSE_POINTS, Operation};
use std::path::PathBuf;

#[derive(Args)]
pub struct SpectrumArgs {
    /// Input CSV trace
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Show top N peaks
    #[arg(long, default_value = "5")]
    peaks: usize,

    /// Output root; the spectrum lands in `<root>/FFT/`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the spectrum as JSON
    #[arg(long)]
    json: Option<PathBuf>,
}

pub fn run(args: SpectrumArgs) -> anyhow::Result<()> {
    let (name, signal, result) = analyze_one(
        &args.input,
        Operation::Spectrum,
        args.output.as_deref(),
        DEFAULT_RESPONSE_POINTS,
    )?;
    let AnalysisResult::Spectrum(spectrum) = &result else {
        anyhow::bail!("spectrum produced a {} result", result.kind());
    };

    println!(
        "  {} bins, {:.4} Hz resolution",
        spectrum.len(),
        spectrum.bin_width()
    );
    if let Some(&dc) = spectrum.magnitudes.first() {
        println!("  DC: {dc:.6}");
    }

    println!("\nTop {} peaks:", args.peaks);
    println!("  {:>12}  {:>12}", "Freq (Hz)", "Magnitude");
    for (freq, mag) in spectrum.top_peaks(args.peaks) {
        println!("  {freq:>12.4}  {mag:>12.6}");
    }

    if let Some(path) = args.json {
        let json = serde_json::json!({
            "signal": name,
            "sample_rate": signal.sample_rate().hz(),
            "num_bins": spectrum.len(),
            "frequencies": spectrum.frequencies,
            "magnitudes": spectrum.magnitudes,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&json)?)?;
        println!("\nWrote spectrum to {}", path.display());
    }

    Ok(())
}
