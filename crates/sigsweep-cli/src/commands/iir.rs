//! First-order IIR smoothing.

use super::common::{analyze_one, rms_difference, value_range};
use clap::Args;
use sigsweep_analysis::DEFAULT_RESPONSE_POINTS;
use sigsweep_core::IirWeights;
use std::path::PathBuf;

#[derive(Args)]
pub struct IirArgs {
    /// Input CSV trace
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Feedback weight A
    #[arg(short = 'a', long = "feedback")]
    a: f64,

    /// Input weight B
    #[arg(short = 'b', long = "input-weight")]
    b: f64,

    /// Output root; the smoothed trace lands in `<root>/IIR/`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: IirArgs) -> anyhow::Result<()> {
    let weights = IirWeights::new(args.a, args.b)?;

    let (_, signal, result) = analyze_one(
        &args.input,
        weights,
        args.output.as_deref(),
        DEFAULT_RESPONSE_POINTS,
    )?;
    let filtered = result.filtered().unwrap_or_default();
    let (lo, hi) = value_range(filtered);

    println!("\nSmoother:");
    println!("  A = {}, B = {}", weights.a, weights.b);
    println!("  DC gain:  {:.6}", weights.dc_gain());
    println!("  Range:    {lo:.4} .. {hi:.4}");
    println!(
        "  Removed:  {:.6} RMS",
        rms_difference(signal.amplitude(), filtered)
    );

    Ok(())
}
