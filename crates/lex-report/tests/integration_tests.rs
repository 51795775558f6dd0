//! Integration tests for the report pipeline.
//!
//! These tests run the full pipeline against CSV fixtures and check both the
//! written report and the run summary.

use chrono::NaiveDate;
use lex_report::{
    DataCleaner, DateFilter, DateRange, Indicator, Pipeline, PipelineResult, ReportConfig,
    ReportError, aggregate, load_csv, render_preview,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_path().join(name)
}

fn run_sales(indicator: Indicator, range: DateRange, out_dir: &TempDir) -> PipelineResult {
    let config = ReportConfig::builder()
        .input_path(fixture("sales.csv"))
        .category_column("producto")
        .value_column("ingresos")
        .indicator(indicator)
        .date_range(range.from, range.to)
        .output_path(out_dir.path().join("out/reporte.csv"))
        .build()
        .expect("valid config");

    Pipeline::new(config)
        .expect("pipeline")
        .run()
        .expect("pipeline run")
}

fn categories(df: &DataFrame) -> Vec<Option<String>> {
    df.column("producto")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

fn stat_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("statistic should not be null"))
        .collect()
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// ============================================================================
// Full Pipeline Tests
// ============================================================================

#[test]
fn test_full_pipeline_sum_without_dates() {
    let dir = tempdir().unwrap();
    let result = run_sales(Indicator::Sum, DateRange::default(), &dir);

    assert_eq!(
        categories(&result.report),
        vec![
            Some("Café".to_string()),
            Some("Té".to_string()),
            None,
            Some("Chocolate".to_string()),
        ]
    );
    assert_eq!(
        stat_values(&result.report, "sum_ingresos"),
        vec![1400.0, 120.0, 40.0, 25.5]
    );

    let summary = &result.summary;
    assert_eq!(summary.rows_loaded, 9);
    assert_eq!(summary.duplicates_removed, 1);
    assert_eq!(summary.invalid_values_removed, 1);
    assert_eq!(summary.rows_outside_range, 0);
    assert_eq!(summary.date_column, None);
    assert_eq!(summary.rows_aggregated, 7);
    assert_eq!(summary.groups, 4);
}

#[test]
fn test_full_pipeline_writes_csv() {
    let dir = tempdir().unwrap();
    let result = run_sales(Indicator::Count, DateRange::default(), &dir);

    assert!(result.output_path.is_absolute());
    assert!(result.output_path.ends_with("out/reporte.csv"));

    let lines = read_lines(&result.output_path);
    assert_eq!(
        lines,
        vec![
            "producto,count_ingresos",
            "Café,3",
            "Té,2",
            ",1",
            "Chocolate,1",
        ]
    );
}

#[test]
fn test_full_pipeline_with_date_range() {
    let dir = tempdir().unwrap();
    let range = DateRange::new(date(2025, 1, 1), date(2025, 2, 28));
    let result = run_sales(Indicator::Sum, range, &dir);

    assert_eq!(
        categories(&result.report),
        vec![Some("Café".to_string()), Some("Té".to_string())]
    );
    assert_eq!(stat_values(&result.report, "sum_ingresos"), vec![400.0, 50.0]);
    assert_eq!(result.summary.date_column.as_deref(), Some("fecha"));
    assert_eq!(result.summary.rows_outside_range, 4);
    assert_eq!(result.summary.rows_aggregated, 3);
}

#[test]
fn test_full_pipeline_median_and_mean() {
    let dir = tempdir().unwrap();

    let median = run_sales(Indicator::Median, DateRange::default(), &dir);
    assert_eq!(
        stat_values(&median.report, "median_ingresos"),
        vec![300.0, 60.0, 40.0, 25.5]
    );

    let mean = run_sales(Indicator::Mean, DateRange::default(), &dir);
    let means = stat_values(&mean.report, "mean_ingresos");
    assert!((means[0] - 1400.0 / 3.0).abs() < 1e-9);
    assert_eq!(means[1], 60.0);
}

#[test]
fn test_count_sums_to_rows_aggregated() {
    let dir = tempdir().unwrap();
    let range = DateRange::new(date(2025, 1, 1), None);
    let result = run_sales(Indicator::Count, range, &dir);

    let total: f64 = stat_values(&result.report, "count_ingresos").iter().sum();
    assert_eq!(total as usize, result.summary.rows_aggregated);
}

#[test]
fn test_median_fixture_even_group() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::builder()
        .input_path(fixture("median.csv"))
        .category_column("grupo")
        .value_column("valor")
        .indicator("mediana".parse().unwrap())
        .output_path(dir.path().join("median.csv"))
        .build()
        .unwrap();

    let result = Pipeline::new(config).unwrap().run().unwrap();

    assert_eq!(stat_values(&result.report, "median_valor"), vec![2.5]);
}

#[test]
fn test_quoted_and_unquoted_blank_categories_share_one_group() {
    let dir = tempdir().unwrap();
    let config = ReportConfig::builder()
        .input_path(fixture("blank_categories.csv"))
        .category_column("categoria")
        .value_column("valor")
        .indicator(Indicator::Count)
        .output_path(dir.path().join("blank.csv"))
        .build()
        .unwrap();

    let result = Pipeline::new(config).unwrap().run().unwrap();

    // `A,"",3` and `A,,3` are the same row once blanks are null
    assert_eq!(result.summary.duplicates_removed, 1);
    assert_eq!(result.summary.groups, 2);
    assert_eq!(
        read_lines(&result.output_path),
        vec!["categoria,count_valor", ",2", "A,2"]
    );
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.csv");
    let config = ReportConfig::builder()
        .input_path(fixture("does_not_exist.csv"))
        .category_column("producto")
        .value_column("ingresos")
        .output_path(&out)
        .build()
        .unwrap();

    let err = Pipeline::new(config).unwrap().run().unwrap_err();

    assert!(matches!(err, ReportError::FileNotFound(_)));
    assert!(!out.exists());
}

#[test]
fn test_header_only_file_is_empty_data() {
    let err = load_csv(fixture("header_only.csv")).unwrap_err();
    assert!(matches!(err, ReportError::EmptyData(_)));
}

#[test]
fn test_missing_category_column_writes_nothing() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reporte.csv");
    let config = ReportConfig::builder()
        .input_path(fixture("sales.csv"))
        .category_column("cliente")
        .value_column("ingresos")
        .output_path(&out)
        .build()
        .unwrap();

    let err = Pipeline::new(config).unwrap().run().unwrap_err();

    assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    assert!(err.to_string().contains("cliente"));
    assert!(!out.exists());
}

#[test]
fn test_missing_value_column() {
    let df = load_csv(fixture("sales.csv")).unwrap();
    let err = DataCleaner.clean(df, "precio").unwrap_err();
    assert!(matches!(err, ReportError::ColumnNotFound(ref c) if c == "precio"));
}

// ============================================================================
// Stage Composition Tests
// ============================================================================

#[test]
fn test_stages_compose_without_pipeline() {
    let df = load_csv(fixture("sales.csv")).unwrap();
    let (df, _) = DataCleaner.clean(df, "ingresos").unwrap();
    let (df, _) = DateFilter::default()
        .apply(df, &DateRange::new(None, date(2025, 1, 31)))
        .unwrap();
    let report = aggregate(df, "producto", "ingresos", Indicator::Count).unwrap();

    // 2024-12-31 Café, 2025-01-05 Café, 2025-01-20 Té
    assert_eq!(stat_values(&report, "count_ingresos"), vec![2.0, 1.0]);

    let preview = render_preview(&report, 10).unwrap();
    assert_eq!(preview.lines().count(), 3);
    assert!(preview.lines().next().unwrap().contains("count_ingresos"));
}

// ============================================================================
// CLI Tests
// ============================================================================

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lex-report"))
}

#[test]
fn test_cli_success_prints_path_and_preview() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reports/reporte.csv");

    let output = cli()
        .arg("--csv")
        .arg(fixture("sales.csv"))
        .args(["--categoria", "producto", "--valor", "ingresos"])
        .args(["--indicador", "suma", "--desde", "2025-01-01", "--hasta", "2025-02-28"])
        .arg("--out")
        .arg(&out)
        .arg("--quiet")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Report generated:"));
    assert!(stdout.contains("sum_ingresos"));
    assert!(out.exists());
}

#[test]
fn test_cli_invalid_indicator_fails() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reporte.csv");

    let output = cli()
        .arg("--csv")
        .arg(fixture("sales.csv"))
        .args(["--categoria", "producto", "--valor", "ingresos"])
        .args(["--indicador", "moda"])
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("count, mean, median, sum"));
    assert!(!out.exists());
}

#[test]
fn test_cli_missing_file_is_invalid_input() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reporte.csv");

    let output = cli()
        .arg("--csv")
        .arg(dir.path().join("missing.csv"))
        .args(["--categoria", "producto", "--valor", "ingresos"])
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("missing.csv"));
    assert!(!out.exists());
}

#[test]
fn test_cli_json_summary() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reporte.csv");

    let output = cli()
        .arg("--csv")
        .arg(fixture("sales.csv"))
        .args(["--categoria", "producto", "--valor", "ingresos", "--json"])
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["indicator"], "mean");
    assert_eq!(summary["groups"], 4);
    assert_eq!(summary["duplicates_removed"], 1);
}

#[test]
fn test_cli_emit_summary_file() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("reporte.csv");

    let output = cli()
        .arg("--csv")
        .arg(fixture("sales.csv"))
        .args(["--categoria", "producto", "--valor", "ingresos", "-q", "-r"])
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(dir.path().join("reporte_summary.json").exists());
}
