//! sigsweep CLI - spectra and smoothing sweeps over sampled traces.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sigsweep")]
#[command(author, version, about = "Spectra and smoothing sweeps for sampled traces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show sample count, rate and range of a trace
    Info(commands::info::InfoArgs),

    /// Compute the one-sided magnitude spectrum of a trace
    Spectrum(commands::spectrum::SpectrumArgs),

    /// Low-pass a trace with a windowed-sinc FIR filter
    Fir(commands::fir::FirArgs),

    /// Smooth a trace with a first-order IIR recursion
    Iir(commands::iir::IirArgs),

    /// Smooth a trace with a causal moving average
    Maf(commands::maf::MafArgs),

    /// Sweep every trace in a folder through a filter table
    Run(commands::run::RunArgs),

    /// List, show and manage filter tables
    Tables(commands::tables::TablesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Spectrum(args) => commands::spectrum::run(args),
        Commands::Fir(args) => commands::fir::run(args),
        Commands::Iir(args) => commands::iir::run(args),
        Commands::Maf(args) => commands::maf::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Tables(args) => commands::tables::run(args),
    }
}
