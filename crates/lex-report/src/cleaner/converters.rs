//! Type conversion functions for data cleaning.
//!
//! Conversions are total: values that cannot be converted become null.

use crate::error::Result;
use crate::utils::{is_numeric_dtype, parse_datetime, parse_number};
use chrono::NaiveDateTime;
use polars::prelude::*;

/// Convert any series to `Float64`, nulling values that are not numbers.
///
/// Numeric and boolean series are cast directly. Everything else is read as
/// text and parsed value by value. `NaN` is treated as missing.
pub(crate) fn to_float64(series: &Series) -> Result<Series> {
    let dtype = series.dtype();

    if is_numeric_dtype(dtype) || matches!(dtype, DataType::Boolean) {
        let casted = series.cast(&DataType::Float64)?;
        let values: Vec<Option<f64>> = casted
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        return Ok(Series::new(series.name().clone(), values));
    }

    let as_text = series.cast(&DataType::String)?;
    let values: Vec<Option<f64>> = as_text
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_number))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Parse every value of a series as a date-time.
///
/// The source column is left untouched; callers use the parsed values to
/// build row masks.
pub(crate) fn to_datetimes(series: &Series) -> Result<Vec<Option<NaiveDateTime>>> {
    let as_text = series.cast(&DataType::String)?;
    Ok(as_text
        .str()?
        .into_iter()
        .map(|v| v.and_then(parse_datetime))
        .collect())
}
