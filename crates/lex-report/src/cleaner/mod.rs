//! Data cleaning module.
//!
//! This module provides functionality for:
//! - Removing fully duplicated rows (first occurrence wins, order preserved)
//! - Coercing the value column to `Float64`
//! - Dropping rows whose value could not be coerced

mod converters;

pub(crate) use converters::to_datetimes;

use crate::error::Result;
use crate::utils::require_column;
use converters::to_float64;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Row counts recorded while cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningOutcome {
    /// Rows handed to the cleaner
    pub rows_before: usize,
    /// Rows dropped as exact duplicates
    pub duplicates_removed: usize,
    /// Rows dropped because the value column was not numeric
    pub invalid_values_removed: usize,
}

impl CleaningOutcome {
    /// Rows left after cleaning.
    pub fn rows_after(&self) -> usize {
        self.rows_before - self.duplicates_removed - self.invalid_values_removed
    }
}

/// Data cleaner for the value column of a report.
#[derive(Debug, Default, Clone, Copy)]
pub struct DataCleaner;

impl DataCleaner {
    /// Run the full cleaning pass.
    ///
    /// 1. Remove duplicate rows
    /// 2. Coerce `value_column` to numeric
    /// 3. Drop rows where the coerced value is missing
    pub fn clean(&self, df: DataFrame, value_column: &str) -> Result<(DataFrame, CleaningOutcome)> {
        info!("Cleaning dataset on value column '{}'...", value_column);

        let mut outcome = CleaningOutcome {
            rows_before: df.height(),
            ..Default::default()
        };

        let df = self.remove_duplicates(df)?;
        outcome.duplicates_removed = outcome.rows_before - df.height();

        if outcome.duplicates_removed > 0 {
            debug!("Removed {} duplicate rows", outcome.duplicates_removed);
        } else {
            debug!("No duplicate rows found");
        }

        let df = self.coerce_numeric(df, value_column)?;
        let before_drop = df.height();
        let df = self.drop_missing(df, value_column)?;
        outcome.invalid_values_removed = before_drop - df.height();

        if outcome.invalid_values_removed > 0 {
            debug!(
                "Removed {} rows with non-numeric '{}'",
                outcome.invalid_values_removed, value_column
            );
        }

        Ok((df, outcome))
    }

    /// Remove rows that repeat an earlier row across all columns.
    pub fn remove_duplicates(&self, df: DataFrame) -> Result<DataFrame> {
        Ok(df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?)
    }

    /// Replace `value_column` with its `Float64` coercion.
    ///
    /// Non-numeric values become null; this never fails on data, only on a
    /// missing column.
    pub fn coerce_numeric(&self, mut df: DataFrame, value_column: &str) -> Result<DataFrame> {
        let column = require_column(&df, value_column)?;
        let converted = to_float64(column.as_materialized_series())?;
        df.replace(value_column, converted)?;
        Ok(df)
    }

    /// Drop rows where `column` is null.
    pub fn drop_missing(&self, df: DataFrame, column: &str) -> Result<DataFrame> {
        let mask = require_column(&df, column)?.is_not_null();
        Ok(df.filter(&mask)?)
    }
}
