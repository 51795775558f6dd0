//! Group-by aggregation of the value column.
//!
//! Rows are grouped by the category column (nulls form their own group) and
//! the value column is reduced with one [`Indicator`]. Groups come out in the
//! order they are first seen in the input.

use crate::error::{ReportError, Result};
use crate::utils::require_column;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Summary statistic computed per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    /// Arithmetic sum
    Sum,
    /// Arithmetic mean
    #[default]
    Mean,
    /// Median, averaging the two middle values for even-sized groups
    Median,
    /// Number of rows in the group
    Count,
}

impl Indicator {
    /// Every indicator, in the order they are listed to users.
    pub const ALL: [Indicator; 4] = [
        Indicator::Count,
        Indicator::Mean,
        Indicator::Median,
        Indicator::Sum,
    ];

    /// Canonical lowercase name, used in output column names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Count => "count",
        }
    }

    /// Name of the statistic column: `{indicator}_{value_column}`.
    pub fn output_column(&self, value_column: &str) -> String {
        format!("{}_{}", self.as_str(), value_column)
    }

    /// Comma-separated list of the canonical names.
    pub fn valid_options() -> String {
        Self::ALL
            .iter()
            .map(Indicator::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn expr(&self, value_column: &str) -> Expr {
        let value = col(value_column);
        match self {
            Self::Sum => value.sum(),
            Self::Mean => value.mean(),
            Self::Median => value.median(),
            Self::Count => value.count(),
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Indicator {
    type Err = ReportError;

    /// Accepts the English names and their Spanish equivalents.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sum" | "suma" => Ok(Self::Sum),
            "mean" | "avg" | "average" | "promedio" => Ok(Self::Mean),
            "median" | "mediana" => Ok(Self::Median),
            "count" | "conteo" => Ok(Self::Count),
            _ => Err(ReportError::InvalidIndicator {
                given: s.to_string(),
                valid: Self::valid_options(),
            }),
        }
    }
}

/// Group `df` by `category_column` and reduce `value_column`.
///
/// `value_column` must already be numeric (see [`crate::cleaner::DataCleaner`]).
/// The result has two columns: the category and `{indicator}_{value_column}`.
pub fn aggregate(
    df: DataFrame,
    category_column: &str,
    value_column: &str,
    indicator: Indicator,
) -> Result<DataFrame> {
    require_column(&df, category_column)?;
    require_column(&df, value_column)?;

    let output_name = indicator.output_column(value_column);
    info!(
        "Aggregating '{}' by '{}' ({})",
        value_column, category_column, indicator
    );

    let result = df
        .lazy()
        .group_by_stable([col(category_column)])
        .agg([indicator.expr(value_column).alias(output_name.as_str())])
        .collect()?;

    debug!("Aggregation produced {} groups", result.height());
    Ok(result)
}
