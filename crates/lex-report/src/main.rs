//! CLI entry point for the indicator report pipeline.

use anyhow::Result;
use clap::Parser;
use lex_report::{
    DEFAULT_OUTPUT_PATH, DEFAULT_PREVIEW_ROWS, Indicator, Pipeline, PipelineResult, ReportConfig,
    ReportError, ReportWriter, parse_date_bound, render_preview,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author = "Lex Machina Team",
    version,
    about = "Clean a CSV dataset and compute a grouped indicator",
    long_about = "Removes duplicate rows, coerces the value column to numbers, optionally \
                  filters by date and computes one indicator per category.\n\n\
                  EXAMPLES:\n  \
                  # Mean revenue per product\n  \
                  lex-report --csv data/sales.csv --categoria producto --valor ingresos\n\n  \
                  # Median for 2025 only, written to a custom path\n  \
                  lex-report --csv data/sales.csv --categoria producto --valor ingresos \\\n    \
                  --indicador median --desde 2025-01-01 --hasta 2025-12-31 --out outputs/reporte.csv"
)]
struct Args {
    /// Path to the input CSV file
    #[arg(long)]
    csv: PathBuf,

    /// Categorical column used for grouping
    #[arg(long, visible_alias = "category")]
    categoria: String,

    /// Numeric column the indicator is computed on
    #[arg(long, visible_alias = "value")]
    valor: String,

    /// Indicator to compute: sum, mean, median or count
    ///
    /// Spanish names (suma, promedio, mediana, conteo) are accepted too
    #[arg(long, visible_alias = "indicator", default_value = "mean")]
    indicador: String,

    /// Earliest date to include (YYYY-MM-DD)
    #[arg(long, visible_alias = "from")]
    desde: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(long, visible_alias = "to")]
    hasta: Option<String>,

    /// Output path for the report CSV
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    out: PathBuf,

    /// Number of rows shown in the console preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Print the run summary as JSON instead of the preview
    ///
    /// Disables all progress logs; only the JSON summary goes to stdout.
    #[arg(long)]
    json: bool,

    /// Write the run summary as JSON next to the report
    ///
    /// The summary is saved as <report_name>_summary.json
    #[arg(short = 'r', long)]
    emit_summary: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is disabled so stdout only carries JSON.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Exit status when the input file or the arguments are invalid.
const EXIT_INVALID_INPUT: u8 = 2;

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<ReportError>() {
        Some(e) if e.is_validation() => ExitCode::from(EXIT_INVALID_INPUT),
        _ => ExitCode::FAILURE,
    }
}

fn run(args: &Args) -> Result<()> {
    let config = build_config(args)?;
    let result = Pipeline::new(config)?.run()?;

    if args.emit_summary {
        let summary_path = ReportWriter.write_summary(&result.summary, &result.output_path)?;
        info!("Summary written to: {}", summary_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.summary)?);
        return Ok(());
    }

    print_report(&result, args.preview_rows)
}

/// Turn CLI arguments into a validated configuration.
fn build_config(args: &Args) -> Result<ReportConfig> {
    let indicator: Indicator = args.indicador.parse()?;
    let date_from = args.desde.as_deref().map(parse_date_bound).transpose()?;
    let date_to = args.hasta.as_deref().map(parse_date_bound).transpose()?;

    let config = ReportConfig::builder()
        .input_path(&args.csv)
        .category_column(&args.categoria)
        .value_column(&args.valor)
        .indicator(indicator)
        .date_range(date_from, date_to)
        .output_path(&args.out)
        .preview_rows(args.preview_rows)
        .build()?;

    Ok(config)
}

/// Print the confirmation line and the preview table.
///
/// Uses `println!` on purpose: this is the result of the command and must be
/// visible whatever the log level.
fn print_report(result: &PipelineResult, preview_rows: usize) -> Result<()> {
    println!();
    println!("Report generated: {}", result.output_path.display());
    println!();
    println!("Preview:");
    println!("{}", render_preview(&result.report, preview_rows)?);
    Ok(())
}
