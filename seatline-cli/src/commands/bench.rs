//! Command to run the multi-threaded load generator.

use crate::error::CliError;
use crate::utils::{csv_error, json_error, load_configuration, GlobalOptions, OutputFormat};
use clap::Args;
use seatline::bench::{BenchReport, LoadGenerator};
use seatline::config::{BenchConfig, Config, Engine};
use seatline::RouteLayout;
use std::io::Write;

/// Column headers for CSV output.
const COLUMN_HEADERS: &[&str] = &[
    "engine",
    "threads",
    "ops_per_thread",
    "seed",
    "operation",
    "calls",
    "succeeded",
    "mean_us",
];

/// Run the load generator against a fresh system.
#[derive(Args)]
pub struct BenchCommand {
    /// Worker threads
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Operations drawn by each worker
    #[arg(long, value_name = "N")]
    pub ops: Option<usize>,

    /// Base RNG seed
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Seat engine to drive (bitmap or tree)
    #[arg(long, value_name = "ENGINE")]
    pub engine: Option<Engine>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

impl BenchCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let overrides = Config {
            layout: None,
            bench: Some(BenchConfig {
                threads: self.threads,
                ops_per_thread: self.ops,
                seed: self.seed,
                engine: self.engine,
                mix: None,
            }),
        };
        let config = load_configuration(global, Some(overrides))?;

        let layout = RouteLayout::from_config(&config)?;
        let generator = LoadGenerator::from_config(&config)?;

        if !global.quiet && self.format == OutputFormat::Human {
            eprintln!(
                "Running {} worker(s) x {} ops on {} route(s) of {} seat(s)",
                generator.threads,
                generator.ops_per_thread,
                layout.route_count,
                layout.seats_per_route()
            );
        }

        let report = generator.run_engine(layout)?;

        match self.format {
            OutputFormat::Human => format_as_human(&report)?,
            OutputFormat::Json => format_as_json(&report)?,
            OutputFormat::Csv => format_as_csv(&report)?,
        }

        Ok(())
    }
}

fn format_as_human(report: &BenchReport) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{report}")?;
    Ok(())
}

fn format_as_json(report: &BenchReport) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(report).map_err(json_error)?;
    println!("{json}");
    Ok(())
}

/// One row per operation kind.
fn format_as_csv(report: &BenchReport) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::Writer::from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for (operation, stats) in [
        ("buy", &report.buy),
        ("refund", &report.refund),
        ("inquiry", &report.inquiry),
    ] {
        writer
            .write_record(&[
                report.engine.to_string(),
                report.threads.to_string(),
                report.ops_per_thread.to_string(),
                report.seed.to_string(),
                operation.to_string(),
                stats.calls.to_string(),
                stats.succeeded.to_string(),
                format!("{:.3}", stats.mean_micros()),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
