//! Configuration for a report run.
//!
//! Use [`ReportConfig::builder()`] to assemble a validated configuration.

use crate::aggregator::Indicator;
use crate::filter::{DEFAULT_DATE_COLUMNS, DateRange};
use crate::reporting::DEFAULT_PREVIEW_ROWS;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default report path when none is given.
pub const DEFAULT_OUTPUT_PATH: &str = "reporte.csv";

/// Configuration for one pipeline run.
///
/// # Example
///
/// ```rust,ignore
/// use lex_report::{Indicator, ReportConfig};
///
/// let config = ReportConfig::builder()
///     .input_path("data/sales.csv")
///     .category_column("producto")
///     .value_column("ingresos")
///     .indicator(Indicator::Median)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// CSV file to read.
    pub input_path: PathBuf,

    /// Column whose distinct values define the groups.
    pub category_column: String,

    /// Column reduced by the indicator.
    pub value_column: String,

    /// Statistic computed per group.
    /// Default: Mean
    #[serde(default)]
    pub indicator: Indicator,

    /// Inclusive lower date bound.
    #[serde(default)]
    pub date_from: Option<NaiveDate>,

    /// Inclusive upper date bound.
    #[serde(default)]
    pub date_to: Option<NaiveDate>,

    /// Where the report CSV is written.
    /// Default: "reporte.csv"
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Rows shown in the console preview.
    /// Default: 10
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,

    /// Column names recognised as the date column (case-insensitive).
    /// Default: ["fecha", "date", "dia", "day"]
    #[serde(default = "default_date_columns")]
    pub date_column_names: Vec<String>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_preview_rows() -> usize {
    DEFAULT_PREVIEW_ROWS
}

fn default_date_columns() -> Vec<String> {
    DEFAULT_DATE_COLUMNS.iter().map(|s| s.to_string()).collect()
}

impl ReportConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// The configured date bounds.
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.date_from, self.date_to)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingField("input_path"));
        }

        if self.category_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("category_column"));
        }

        if self.value_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName("value_column"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingField("output_path"));
        }

        if self.preview_rows == 0 {
            return Err(ConfigValidationError::InvalidPreviewRows(self.preview_rows));
        }

        if self.date_column_names.is_empty() {
            return Err(ConfigValidationError::NoDateColumnNames);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(&'static str),

    #[error("Invalid preview rows: {0} (must be at least 1)")]
    InvalidPreviewRows(usize),

    #[error("At least one date column name is required")]
    NoDateColumnNames,
}

impl From<ConfigValidationError> for crate::error::ReportError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::ReportError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`ReportConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    input_path: Option<PathBuf>,
    category_column: Option<String>,
    value_column: Option<String>,
    indicator: Option<Indicator>,
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
    output_path: Option<PathBuf>,
    preview_rows: Option<usize>,
    date_column_names: Option<Vec<String>>,
}

impl ReportConfigBuilder {
    /// Set the CSV file to read.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the grouping column.
    pub fn category_column(mut self, column: impl Into<String>) -> Self {
        self.category_column = Some(column.into());
        self
    }

    /// Set the numeric column to reduce.
    pub fn value_column(mut self, column: impl Into<String>) -> Self {
        self.value_column = Some(column.into());
        self
    }

    pub fn indicator(mut self, indicator: Indicator) -> Self {
        self.indicator = Some(indicator);
        self
    }

    /// Set the inclusive lower date bound.
    pub fn date_from(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Set the inclusive upper date bound.
    pub fn date_to(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// Set both date bounds at once; `None` leaves a side open.
    pub fn date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Set the report output path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Replace the list of recognised date column names.
    pub fn date_column_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_column_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `ReportConfig` or an error if a required field is
    /// missing or a value is out of range.
    pub fn build(self) -> Result<ReportConfig, ConfigValidationError> {
        let config = ReportConfig {
            input_path: self
                .input_path
                .ok_or(ConfigValidationError::MissingField("input_path"))?,
            category_column: self
                .category_column
                .ok_or(ConfigValidationError::MissingField("category_column"))?,
            value_column: self
                .value_column
                .ok_or(ConfigValidationError::MissingField("value_column"))?,
            indicator: self.indicator.unwrap_or_default(),
            date_from: self.date_from,
            date_to: self.date_to,
            output_path: self.output_path.unwrap_or_else(default_output_path),
            preview_rows: self.preview_rows.unwrap_or(DEFAULT_PREVIEW_ROWS),
            date_column_names: self
                .date_column_names
                .unwrap_or_else(default_date_columns),
        };

        config.validate()?;
        Ok(config)
    }
}
