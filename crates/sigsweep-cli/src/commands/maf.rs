//! Moving-average smoothing.

use super::common::{analyze_one, rms_difference, value_range};
use clap::Args;
use sigsweep_analysis::DEFAULT_RESPONSE_POINTS;
use sigsweep_core::MovingAverageSpec;
use std::path::PathBuf;

#[derive(Args)]
pub struct MafArgs {
    /// Input CSV trace
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Window length in samples
    #[arg(short = 'x', long)]
    window: usize,

    /// Output root; the smoothed trace lands in `<root>/MAF/`
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: MafArgs) -> anyhow::Result<()> {
    let spec = MovingAverageSpec::new(args.window)?;

    let (_, signal, result) = analyze_one(
        &args.input,
        spec,
        args.output.as_deref(),
        DEFAULT_RESPONSE_POINTS,
    )?;
    let filtered = result.filtered().unwrap_or_default();
    let (lo, hi) = value_range(filtered);

    if args.window > signal.len() {
        tracing::warn!(
            window = args.window,
            samples = signal.len(),
            "window longer than the trace, output never reaches full average"
        );
    }

    println!("\nMoving average:");
    println!(
        "  Window:   {} samples ({:.4}s)",
        args.window,
        args.window as f64 * signal.dt()
    );
    println!("  Range:    {lo:.4} .. {hi:.4}");
    println!(
        "  Removed:  {:.6} RMS",
        rms_difference(signal.amplitude(), filtered)
    );

    Ok(())
}
