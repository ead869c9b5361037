//! Display trace metadata.

use super::common::value_range;
use clap::Args;
use sigsweep_io::read_signal_csv;

/// Display trace information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the two-column CSV trace
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let signal = read_signal_csv(&args.file)?;
    let rate = signal.sample_rate();
    let (lo, hi) = value_range(signal.amplitude());
    let mean = signal.amplitude().iter().sum::<f64>() / signal.len() as f64;

    println!("File:        {}", args.file.display());
    println!("Samples:     {}", signal.len());
    println!("Sample Rate: {:.3} Hz (dt = {:.6}s)", rate.hz(), signal.dt());
    println!("Mean Rate:   {:.3} Hz", signal.mean_sample_rate());
    println!("Nyquist:     {:.3} Hz", rate.nyquist());
    println!("Duration:    {:.3}s", signal.duration());
    println!("Range:       {lo:.4} .. {hi:.4} (mean {mean:.4})");

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
