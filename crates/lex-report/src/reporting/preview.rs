use crate::error::Result;
use polars::prelude::*;

/// Default number of rows shown in the console preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Render the first `max_rows` rows of `df` as a right-aligned text table.
///
/// The first line holds the column names; there is no index column. Nulls
/// render as `null`.
pub fn render_preview(df: &DataFrame, max_rows: usize) -> Result<String> {
    let head = df.head(Some(max_rows));

    let mut columns: Vec<Vec<String>> = Vec::with_capacity(head.width());
    for column in head.get_columns() {
        let mut cells = vec![column.name().to_string()];
        let as_text = column.as_materialized_series().cast(&DataType::String)?;
        cells.extend(
            as_text
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or("null").to_string()),
        );
        columns.push(cells);
    }

    let widths: Vec<usize> = columns
        .iter()
        .map(|cells| cells.iter().map(|c| c.chars().count()).max().unwrap_or(0))
        .collect();

    let lines: Vec<String> = (0..=head.height())
        .map(|row| {
            columns
                .iter()
                .zip(&widths)
                .map(|(cells, width)| format!("{:>width$}", cells[row], width = *width))
                .collect::<Vec<_>>()
                .join("  ")
        })
        .collect();

    Ok(lines.join("\n"))
}
