//! Batch sweep over a folder of traces.

use super::common::load_table;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use sigsweep_analysis::{DEFAULT_RESPONSE_POINTS, Pipeline};
use sigsweep_config::{validate_for_sample_rate, validate_table};
use sigsweep_io::{CsvResultSink, ResultSink, discover_signals, read_signal_csv, signal_name};
use std::path::PathBuf;

#[derive(Args)]
pub struct RunArgs {
    /// Folder holding the traces
    #[arg(short, long, default_value = ".")]
    input: PathBuf,

    /// Only traces whose file names start with this prefix
    #[arg(long, default_value = "sig")]
    prefix: String,

    /// Output root for the FFT/, FIR/, IIR/ and MAF/ folders
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Filter table name or path to a .toml file
    #[arg(short, long, default_value = "hw10")]
    table: String,

    /// FIR frequency response evaluation points
    #[arg(long, default_value_t = DEFAULT_RESPONSE_POINTS)]
    response_points: usize,

    /// Write the batch summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Exit with an error if any unit failed or any trace was skipped
    #[arg(long)]
    strict: bool,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let table = load_table(&args.table)?;
    validate_table(&table)?;

    let pipeline =
        Pipeline::new(table.to_plan_table()?).with_response_points(args.response_points);

    let paths = discover_signals(&args.input, &args.prefix)?;
    if paths.is_empty() {
        anyhow::bail!(
            "No {}*.csv files in {}",
            args.prefix,
            args.input.display()
        );
    }

    println!(
        "Sweeping {} trace(s) with table '{}'...",
        paths.len(),
        table.name
    );

    let mut sink = CsvResultSink::new(&args.output);
    sink.prepare()?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );

    let signals = paths.iter().enumerate().map(|(i, path)| {
        let name = signal_name(path);
        pb.set_position(i as u64);
        pb.set_message(name.clone());

        let loaded = read_signal_csv(path);
        if let (Ok(signal), Some(entry)) = (&loaded, table.entry(&name))
            && let Err(e) = validate_for_sample_rate(&name, entry, signal.sample_rate())
        {
            tracing::warn!(signal = %name, error = %e, "table entry does not fit this trace");
        }
        (name, loaded)
    });

    let summary = pipeline.run(signals, |name, result| sink.write(name, result));
    pb.finish_with_message("done");

    println!("\n{summary}");
    println!("Results in {}", args.output.display());

    if let Some(path) = &args.summary {
        let json = serde_json::json!({
            "table": table.name,
            "signals": paths.iter().map(|p| signal_name(p)).collect::<Vec<_>>(),
            "succeeded": summary.succeeded,
            "failed": summary.failed,
            "skipped_signals": summary.skipped_signals,
        });
        std::fs::write(path, serde_json::to_string_pretty(&json)?)?;
        println!("Wrote summary to {}", path.display());
    }

    if args.strict && !summary.is_clean() {
        anyhow::bail!("batch was not clean: {summary}");
    }

    Ok(())
}
