//! Windowed-sinc low-pass filtering.

use super::common::{analyze_one, rms_difference};
use clap::Args;
use sigsweep_analysis::{AnalysisResult, DEFAULT_RESPONSE_POINTS};
use sigsweep_core::{FirSpec, WindowKind};
use std::path::PathBuf;

#[derive(Args)]
pub struct FirArgs {
    /// Input CSV trace
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Number of taps
    #[arg(short, long)]
    numtaps: usize,

    /// Cutoff frequency in Hz
    #[arg(short, long)]
    cutoff: f64,

    /// Transition width in Hz (selects a Kaiser window sized for it)
    #[arg(short, long)]
    width: Option<f64>,

    /// Window function (hamming, hann, blackman, rectangular, kaiser:BETA)
    #[arg(long, default_value = "hamming")]
    window: WindowKind,

    /// Frequency response evaluation points
    #[arg(long, default_value_t = DEFAULT_RESPONSE_POINTS)]
    response_points: usize,

    /// Output root; artifacts land in `<root>/FIR/`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: FirArgs) -> anyhow::Result<()> {
    let mut spec = FirSpec::new(args.numtaps, args.cutoff, args.window);
    if let Some(width) = args.width {
        spec = spec.with_width(width);
    }

    let (_, signal, result) = analyze_one(
        &args.input,
        spec,
        args.output.as_deref(),
        args.response_points,
    )?;
    let AnalysisResult::Fir {
        filtered,
        coefficients,
        response,
        ..
    } = &result
    else {
        anyhow::bail!("FIR produced a {} result", result.kind());
    };

    let (_, window) = spec.resolve(signal.sample_rate())?;
    let delay = coefficients.group_delay_samples();

    println!("\nFilter:");
    println!("  Taps:        {}", coefficients.len());
    println!("  Window:      {window}");
    println!("  DC gain:     {:.6}", coefficients.dc_gain());
    println!(
        "  Group delay: {delay:.1} samples ({:.4}s)",
        delay * signal.dt()
    );
    if let Some(gain) = response.gain_at(args.cutoff) {
        println!("  Gain @ {:.3} Hz: {gain:.4}", args.cutoff);
    }
    match response.edge_above(core::f64::consts::FRAC_1_SQRT_2) {
        Some(edge) => println!("  -3 dB edge:  {edge:.4} Hz"),
        None => println!("  -3 dB edge:  below first response point"),
    }

    println!(
        "\nRemoved: {:.6} RMS",
        rms_difference(signal.amplitude(), filtered)
    );

    Ok(())
}
