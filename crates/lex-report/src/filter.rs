//! Optional date-range filtering.
//!
//! The date column is found by name, not by type: the first column whose
//! lowercased name is in the accepted list is used. Rows whose date cannot
//! be parsed are dropped whenever a bound is set.

use crate::cleaner::to_datetimes;
use crate::error::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Column names recognised as the date column.
pub const DEFAULT_DATE_COLUMNS: [&str; 4] = ["fecha", "date", "dia", "day"];

/// Inclusive date range. A missing side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// True when neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Bounds are compared as midnight of their day.
    pub fn contains(&self, value: &NaiveDateTime) -> bool {
        let after_start = self
            .from
            .is_none_or(|d| *value >= d.and_time(NaiveTime::MIN));
        let before_end = self
            .to
            .is_none_or(|d| *value <= d.and_time(NaiveTime::MIN));
        after_start && before_end
    }
}

/// What the filter did to the dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Column used for filtering, if one was detected and a bound was set
    pub date_column: Option<String>,
    /// Rows dropped for unparseable or out-of-range dates
    pub rows_removed: usize,
}

/// Restricts a dataset to a date range.
#[derive(Debug, Clone)]
pub struct DateFilter {
    column_names: Vec<String>,
}

impl Default for DateFilter {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_COLUMNS)
    }
}

impl DateFilter {
    /// Create a filter that recognises the given column names (case-insensitive).
    pub fn new<I, S>(column_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            column_names: column_names
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Find the first column whose name matches an accepted date column name.
    pub fn detect_date_column(&self, df: &DataFrame) -> Option<String> {
        df.get_column_names()
            .iter()
            .find(|name| self.column_names.contains(&name.to_lowercase()))
            .map(|name| name.to_string())
    }

    /// Keep the rows whose date lies within `range`.
    ///
    /// Returns the frame unchanged when no date column exists or the range
    /// is unbounded.
    pub fn apply(&self, df: DataFrame, range: &DateRange) -> Result<(DataFrame, FilterOutcome)> {
        if range.is_unbounded() {
            debug!("No date bounds given, skipping date filter");
            return Ok((df, FilterOutcome::default()));
        }

        let Some(date_column) = self.detect_date_column(&df) else {
            debug!("No date column found, skipping date filter");
            return Ok((df, FilterOutcome::default()));
        };

        if let (Some(from), Some(to)) = (range.from, range.to)
            && from > to
        {
            warn!("Date range is empty: {} is after {}", from, to);
        }

        info!(
            "Filtering on '{}' (from: {:?}, to: {:?})",
            date_column, range.from, range.to
        );

        let parsed = to_datetimes(df.column(&date_column)?.as_materialized_series())?;
        let keep: Vec<bool> = parsed
            .iter()
            .map(|value| value.as_ref().is_some_and(|dt| range.contains(dt)))
            .collect();
        let mask = BooleanChunked::from_slice(PlSmallStr::from_static("in_range"), &keep);

        let before = df.height();
        let filtered = df.filter(&mask)?;
        let rows_removed = before - filtered.height();
        debug!("Date filter removed {} rows", rows_removed);

        Ok((
            filtered,
            FilterOutcome {
                date_column: Some(date_column),
                rows_removed,
            },
        ))
    }
}
