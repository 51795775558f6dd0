//! Main report pipeline.
//!
//! Wires loader → cleaner → date filter → aggregator → writer for one
//! [`ReportConfig`].

use crate::aggregator::aggregate;
use crate::cleaner::{CleaningOutcome, DataCleaner};
use crate::config::ReportConfig;
use crate::error::{Result, ResultExt};
use crate::filter::{DateFilter, FilterOutcome};
use crate::loader::load_csv;
use crate::pipeline::PipelineStage;
use crate::reporting::ReportWriter;
use crate::types::{PipelineResult, RunSummary};
use chrono::Local;
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, error, info};

/// The in-memory part of a run: everything except reading and writing.
#[derive(Debug, Clone)]
pub struct ProcessedReport {
    /// Aggregated frame: category column plus the statistic column
    pub report: DataFrame,
    pub cleaning: CleaningOutcome,
    pub filtering: FilterOutcome,
    /// Rows that reached the aggregator
    pub rows_aggregated: usize,
}

/// The report pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use lex_report::{Pipeline, ReportConfig};
///
/// let config = ReportConfig::builder()
///     .input_path("data/sales.csv")
///     .category_column("producto")
///     .value_column("ingresos")
///     .build()?;
///
/// let result = Pipeline::new(config)?.run()?;
/// println!("Report written to {}", result.output_path.display());
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: ReportConfig,
    cleaner: DataCleaner,
    date_filter: DateFilter,
    writer: ReportWriter,
}

impl Pipeline {
    /// Create a pipeline for a configuration, validating it first.
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        let date_filter = DateFilter::new(&config.date_column_names);
        Ok(Self {
            config,
            cleaner: DataCleaner,
            date_filter,
            writer: ReportWriter,
        })
    }

    /// Load the input, build the report and write it to the output path.
    ///
    /// Nothing is written unless every earlier stage succeeds.
    pub fn run(&self) -> Result<PipelineResult> {
        self.run_internal().inspect_err(|e| error!("Pipeline error: {}", e))
    }

    fn run_internal(&self) -> Result<PipelineResult> {
        let start_time = Instant::now();
        let config = &self.config;

        info!("{}", PipelineStage::Loading.label());
        let df = load_csv(&config.input_path)?;
        let rows_loaded = df.height();

        let processed = self.process(df)?;
        let mut report = processed.report;

        info!("{}", PipelineStage::Writing.label());
        let output_path = self
            .writer
            .write_csv(&mut report, &config.output_path)
            .context(format!(
                "Failed to write report to {}",
                config.output_path.display()
            ))?;

        let summary = RunSummary {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: config.input_path.display().to_string(),
            output_file: output_path.display().to_string(),
            category_column: config.category_column.clone(),
            value_column: config.value_column.clone(),
            indicator: config.indicator,
            date_from: config.date_from,
            date_to: config.date_to,
            date_column: processed.filtering.date_column,
            rows_loaded,
            duplicates_removed: processed.cleaning.duplicates_removed,
            invalid_values_removed: processed.cleaning.invalid_values_removed,
            rows_outside_range: processed.filtering.rows_removed,
            rows_aggregated: processed.rows_aggregated,
            groups: report.height(),
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Pipeline completed: {} rows -> {} groups in {}ms",
            summary.rows_loaded, summary.groups, summary.duration_ms
        );

        Ok(PipelineResult {
            report,
            output_path,
            summary,
        })
    }

    /// Clean, filter and aggregate an already loaded frame.
    pub fn process(&self, df: DataFrame) -> Result<ProcessedReport> {
        let config = &self.config;

        info!("{}", PipelineStage::Cleaning.label());
        let (df, cleaning) = self.cleaner.clean(df, &config.value_column)?;

        info!("{}", PipelineStage::DateFiltering.label());
        let (df, filtering) = self.date_filter.apply(df, &config.date_range())?;
        let rows_aggregated = df.height();
        debug!("{} rows left for aggregation", rows_aggregated);

        info!("{}", PipelineStage::Aggregating.label());
        let report = aggregate(
            df,
            &config.category_column,
            &config.value_column,
            config.indicator,
        )?;

        Ok(ProcessedReport {
            report,
            cleaning,
            filtering,
            rows_aggregated,
        })
    }
}
