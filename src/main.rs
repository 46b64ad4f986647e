use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use spc_limits::config::{CliOverrides, SpcConfig};
use spc_limits::ingest::read_subgroups_csv;
use spc_limits::spc::{filter_by_date, ChartReport, ChartType};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format for the chart report
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "spc-limits")]
#[command(version)]
#[command(about = "Compute SPC control limits for subgroup data and flag out-of-control points", long_about = None)]
struct Cli {
    /// CSV file: header row, then subgroup id followed by measurements
    #[arg(value_name = "CSV")]
    input: PathBuf,

    /// Chart type (xbar, r, c, p)
    #[arg(long = "chart", value_name = "TYPE")]
    chart_type: Option<ChartType>,

    /// Subgroup size used to look up A2/D3/D4 (2..=10)
    #[arg(short = 'n', long = "subgroup-size")]
    subgroup_size: Option<usize>,

    /// Units inspected per subgroup (required for P charts)
    #[arg(long = "sample-size")]
    sample_size: Option<u64>,

    /// Show only subgroups dated on or after this day (YYYY-MM-DD)
    #[arg(long = "from", value_name = "DATE")]
    from: Option<NaiveDate>,

    /// Show only subgroups dated on or before this day (YYYY-MM-DD)
    #[arg(long = "to", value_name = "DATE")]
    to: Option<NaiveDate>,

    /// Directory containing spc.toml (defaults to the current directory)
    #[arg(long = "config-dir", value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable debug logging on stderr
    #[arg(long)]
    debug: bool,
}

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_text(report: &ChartReport) {
    let l = &report.limits;
    println!("{}", report.chart_type.title());
    println!("UCL: {:.3}  CL: {:.3}  LCL: {:.3}", l.ucl, l.cl, l.lcl);
    println!();
    for p in report.points() {
        let mark = if p.out_of_control { "  OUT" } else { "" };
        println!("{:>8}  {:>12.4}{}", p.subgroup_id, p.value, mark);
    }
    println!();
    println!(
        "{} of {} points out of control",
        report.out_of_control_count(),
        report.points().len()
    );
}

fn run(cli: Cli) -> Result<ExitCode> {
    let root = match cli.config_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("cannot determine working directory")?,
    };
    let overrides = CliOverrides {
        chart_type: cli.chart_type,
        subgroup_size: cli.subgroup_size,
        sample_size: cli.sample_size,
    };
    let config = SpcConfig::load(&root, Some(&overrides))?;
    let chart_type = config.chart_type();
    let constants = config.resolved_constants()?;

    let sample_size = match (chart_type, config.sample_size) {
        (_, Some(n)) => n,
        (ChartType::P, None) => bail!("P charts need --sample-size (or sample_size in spc.toml)"),
        // Not read by the other charts.
        (_, None) => 0,
    };

    let subgroups = read_subgroups_csv(&cli.input, &config.production, None)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let Some(mut report) = ChartReport::build(&subgroups, chart_type, &constants, sample_size)
    else {
        eprintln!("No data: {} contains no usable subgroups", cli.input.display());
        return Ok(ExitCode::FAILURE);
    };

    // Limits always come from the full data set; the window only narrows
    // which points are shown.
    if cli.from.is_some() || cli.to.is_some() {
        let window = filter_by_date(&subgroups, cli.from, cli.to);
        debug!(kept = window.len(), total = subgroups.len(), "applied date window");
        report = ChartReport::with_limits(&window, chart_type, report.limits);
    }

    match cli.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    run(cli)
}
