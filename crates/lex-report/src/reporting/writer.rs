use crate::error::Result;
use crate::types::RunSummary;
use polars::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes report files to disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportWriter;

impl ReportWriter {
    /// Write `df` as a UTF-8, comma-separated CSV with a header row.
    ///
    /// Missing parent directories are created and an existing file is
    /// overwritten. Returns the absolute path of the written file.
    pub fn write_csv(&self, df: &mut DataFrame, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        ensure_parent_dir(path)?;

        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)?;

        let resolved = fs::canonicalize(path)?;
        info!("Report saved: {}", resolved.display());
        Ok(resolved)
    }

    /// Write the run summary as pretty JSON next to the report.
    ///
    /// The file is named `{report_stem}_summary.json`.
    pub fn write_summary(&self, summary: &RunSummary, report_path: &Path) -> Result<PathBuf> {
        let stem = report_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("reporte");
        let summary_path = report_path.with_file_name(format!("{}_summary.json", stem));
        ensure_parent_dir(&summary_path)?;

        let mut file = File::create(&summary_path)?;
        file.write_all(serde_json::to_string_pretty(summary)?.as_bytes())?;

        info!("Summary saved: {}", summary_path.display());
        Ok(summary_path)
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_csv_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/report.csv");
        let mut df = df!("cat" => &["A", "B"], "sum_val" => &[30.0f64, 1.5]).unwrap();

        let written = ReportWriter.write_csv(&mut df, &path).unwrap();

        assert!(written.is_absolute());
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "cat,sum_val");
        assert!(lines[1].starts_with("A,30"));
        assert_eq!(lines[2], "B,1.5");
    }

    #[test]
    fn test_write_csv_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        fs::write(&path, "old contents that are much longer than the new ones\n").unwrap();

        let mut df = df!("cat" => &["A"], "count_val" => &[1u32]).unwrap();
        ReportWriter.write_csv(&mut df, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "cat,count_val\nA,1\n");
    }

    #[test]
    fn test_write_csv_null_category_is_empty_field() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let mut df = df!("cat" => &[Some("A"), None], "count_val" => &[2u32, 1]).unwrap();

        ReportWriter.write_csv(&mut df, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "cat,count_val\nA,2\n,1\n");
    }
}
