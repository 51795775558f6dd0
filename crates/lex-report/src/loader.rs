//! CSV loading.

use crate::error::{ReportError, Result, ResultExt};
use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Load a comma-delimited, header-row CSV file into a DataFrame.
///
/// Column types are inferred from the whole file, so a stray token late in
/// an otherwise numeric column makes it a string column instead of failing
/// the read.
///
/// # Errors
///
/// - [`ReportError::FileNotFound`] if `path` does not exist
/// - [`ReportError::EmptyData`] if the file has no data rows
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ReportError::FileNotFound(path.to_path_buf()));
    }

    info!("Loading dataset from: {}", path.display());

    if std::fs::metadata(path)?.len() == 0 {
        return Err(ReportError::EmptyData(path.to_path_buf()));
    }

    let read = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Failed to open {}", path.display()))?
        .finish();

    let df = match read {
        Ok(df) => df,
        Err(PolarsError::NoData(msg)) => {
            debug!("CSV reader found no data: {}", msg);
            return Err(ReportError::EmptyData(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    if df.height() == 0 {
        return Err(ReportError::EmptyData(path.to_path_buf()));
    }

    let df = blank_strings_to_null(df)?;

    info!("Dataset loaded successfully: {:?}", df.shape());
    Ok(df)
}

/// Turn empty strings into nulls in every string column.
///
/// The reader only nulls unquoted empty fields; a quoted `""` would otherwise
/// survive as a distinct empty value.
fn blank_strings_to_null(df: DataFrame) -> Result<DataFrame> {
    let exprs: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|c| c.dtype() == &DataType::String)
        .map(|c| {
            let name = c.name().clone();
            when(col(name.clone()).eq(lit(PlSmallStr::from_static(""))))
                .then(Null {}.lit())
                .otherwise(col(name.clone()))
                .alias(name)
        })
        .collect();

    if exprs.is_empty() {
        return Ok(df);
    }

    Ok(df.lazy().with_columns(exprs).collect()?)
}
