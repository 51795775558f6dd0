use crate::aggregator::Indicator;
use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Counters and settings recorded for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Timestamp when the run finished
    pub generated_at: String,
    pub input_file: String,
    /// Absolute path of the written report
    pub output_file: String,
    pub category_column: String,
    pub value_column: String,
    pub indicator: Indicator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    /// Date column used by the filter, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_column: Option<String>,
    pub rows_loaded: usize,
    pub duplicates_removed: usize,
    pub invalid_values_removed: usize,
    pub rows_outside_range: usize,
    pub rows_aggregated: usize,
    pub groups: usize,
    pub duration_ms: u64,
}

/// Output of [`crate::Pipeline::run`].
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The aggregated frame that was written to disk
    pub report: DataFrame,
    /// Absolute path of the written CSV
    pub output_path: PathBuf,
    pub summary: RunSummary,
}
