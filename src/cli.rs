//! Command-line interface components.

use crate::config::{AggregationConfig, CodeSelector, YearRange};
use crate::constants::{DEFAULT_END_YEAR, DEFAULT_MIN_COVERAGE, DEFAULT_START_YEAR};
use crate::discovery::{DataSource, default_data_dir};
use crate::models::{AggregateSeries, SeriesScope};
use crate::presenter::{DisplayMode, TableRenderer};
use crate::session::Session;
use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "ghcn-trends")]
#[command(about = "Aggregate GHCN-M station temperature records into annual trends")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute monthly averages from a GHCN-M data file
    Aggregate(AggregateArgs),
    /// Show a previously saved aggregate table
    Show(ShowArgs),
}

#[derive(ClapArgs, Debug)]
pub struct AggregateArgs {
    /// Data source (GHCN_QCU, GHCN_QCF or GHCN_QFE)
    #[arg(short, long, default_value = "GHCN_QCU")]
    pub source: String,

    /// Directory holding ghcnm.tavg.v4.*.dat files
    #[arg(long, conflicts_with = "data_file")]
    pub data_dir: Option<PathBuf>,

    /// Explicit data file, bypassing discovery
    #[arg(long)]
    pub data_file: Option<PathBuf>,

    /// Station code prefix; repeat to average a group of codes
    #[arg(short, long = "code", value_name = "CODE")]
    pub codes: Vec<String>,

    /// First year of the range
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start: i32,

    /// Last year of the range
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end: i32,

    /// Minimum number of stations for a year to be kept
    #[arg(long, default_value_t = DEFAULT_MIN_COVERAGE)]
    pub min_coverage: usize,

    /// Only use stations with complete data for every year in range
    #[arg(long)]
    pub full_range: bool,

    /// Print the station count for every kept year (with --full-range)
    #[arg(long)]
    pub per_year: bool,

    /// Write the aggregate table to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Display mode: a month name, OVERLAY or ANNUAL
    #[arg(short, long)]
    pub mode: Option<String>,
}

#[derive(ClapArgs, Debug)]
pub struct ShowArgs {
    /// Aggregate table written by `aggregate --output`
    #[arg(short, long)]
    pub input: PathBuf,

    /// Data source the table was computed from
    #[arg(short, long, default_value = "GHCN_QCU")]
    pub source: String,

    /// Station codes the table was computed for (title only)
    #[arg(short, long = "code", value_name = "CODE")]
    pub codes: Vec<String>,

    /// Display mode: a month name, OVERLAY or ANNUAL
    #[arg(short, long, default_value = "ANNUAL")]
    pub mode: String,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        // --per-year lines survive --quiet
        if self.verbose {
            "debug"
        } else if matches!(&self.command, Command::Aggregate(a) if a.per_year) {
            "info"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

impl AggregateArgs {
    /// Aggregation settings described by these arguments
    pub fn aggregation_config(&self) -> Result<AggregationConfig> {
        let year_range = YearRange::new(self.start, self.end)?;
        let mut config = AggregationConfig::default()
            .with_selector(CodeSelector::from_codes(self.codes.clone()))
            .with_year_range(year_range)
            .with_min_coverage(self.min_coverage);
        if self.full_range {
            config = config.with_full_range();
        }
        if self.per_year {
            config = config.with_verbose();
        }
        Ok(config)
    }
}

/// Set up structured logging
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ghcn_trends={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Aggregate(aggregate) => run_aggregate(aggregate, args.quiet),
        Command::Show(show) => run_show(show),
    }
}

fn run_aggregate(args: AggregateArgs, quiet: bool) -> Result<()> {
    let start_time = Instant::now();
    let source: DataSource = args.source.parse()?;
    let config = args.aggregation_config()?;
    let mode = args
        .mode
        .as_deref()
        .map(str::parse::<DisplayMode>)
        .transpose()?;

    let mut session = Session::new();
    if !quiet {
        session = session.with_progress();
    }

    match &args.data_file {
        Some(path) => session
            .load_file(source, path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
            session
                .load_data(source, &data_dir)
                .with_context(|| format!("Failed to load {} from {}", source, data_dir.display()))?;
        }
    }

    let series = session.compute(&config).context("Aggregation failed")?;
    if !quiet {
        print_summary(series, start_time);
    }

    if let Some(output) = &args.output {
        session
            .save_averages(output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        if !quiet {
            println!("  {} {}", "Saved:".bright_cyan(), output.display());
        }
    }

    if let Some(mode) = mode {
        let mut renderer = TableRenderer::new(std::io::stdout().lock());
        session.show(mode, &mut renderer)?;
    }

    Ok(())
}

fn run_show(args: ShowArgs) -> Result<()> {
    let source: DataSource = args.source.parse()?;
    let mode: DisplayMode = args.mode.parse()?;
    let scope = SeriesScope::from(CodeSelector::from_codes(args.codes));

    let mut session = Session::new();
    session
        .load_averages(&args.input, source, scope)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut renderer = TableRenderer::new(std::io::stdout().lock());
    session.show(mode, &mut renderer)?;
    Ok(())
}

fn print_summary(series: &AggregateSeries, start_time: Instant) {
    println!("{}", "Aggregation complete".bright_green().bold());
    println!("  {} {}", "Scope:".bright_cyan(), series.scope);
    match (series.rows.first(), series.rows.last()) {
        (Some(first), Some(last)) => println!(
            "  {} {} ({}-{})",
            "Years:".bright_cyan(),
            series.len().to_string().bright_white().bold(),
            first.year,
            last.year
        ),
        _ => println!("  {} {}", "Years:".bright_cyan(), "none".yellow()),
    }
    println!(
        "  {} {:.2}s",
        "Elapsed:".bright_cyan(),
        start_time.elapsed().as_secs_f64()
    );
}
