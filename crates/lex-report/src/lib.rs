//! CSV Indicator Report Library
//!
//! Cleans a tabular CSV dataset and computes one grouped indicator over a
//! numeric column, built with Rust and Polars.
//!
//! # Overview
//!
//! A run is a single pass through five stages:
//!
//! - **Loading**: read a header-row CSV, rejecting missing or empty files
//! - **Cleaning**: drop duplicate rows, coerce the value column to numbers and
//!   drop rows that do not parse
//! - **Date Filtering**: optionally keep rows inside an inclusive date range,
//!   using a column named `fecha`, `date`, `dia` or `day`
//! - **Aggregating**: group by a category column and compute sum, mean,
//!   median or count
//! - **Writing**: save the result as CSV and render a preview
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_report::{Indicator, Pipeline, ReportConfig, render_preview};
//!
//! let config = ReportConfig::builder()
//!     .input_path("data/sales.csv")
//!     .category_column("producto")
//!     .value_column("ingresos")
//!     .indicator(Indicator::Sum)
//!     .output_path("outputs/reporte.csv")
//!     .build()?;
//!
//! let result = Pipeline::new(config)?.run()?;
//!
//! println!("Report generated: {}", result.output_path.display());
//! println!("{}", render_preview(&result.report, 10)?);
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use lex_report::{aggregate, load_csv, DataCleaner, DateFilter, DateRange, Indicator};
//!
//! let df = load_csv("data/sales.csv")?;
//! let (df, _) = DataCleaner.clean(df, "ingresos")?;
//! let (df, _) = DateFilter::default().apply(df, &DateRange::new(Some(from), None))?;
//! let report = aggregate(df, "producto", "ingresos", Indicator::Median)?;
//! ```

pub mod aggregator;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregator::{Indicator, aggregate};
pub use cleaner::{CleaningOutcome, DataCleaner};
pub use config::{ConfigValidationError, DEFAULT_OUTPUT_PATH, ReportConfig, ReportConfigBuilder};
pub use error::{ReportError, Result as ReportResult, ResultExt};
pub use filter::{DEFAULT_DATE_COLUMNS, DateFilter, DateRange, FilterOutcome};
pub use loader::load_csv;
pub use pipeline::{Pipeline, PipelineStage, ProcessedReport};
pub use reporting::{DEFAULT_PREVIEW_ROWS, ReportWriter, render_preview};
pub use types::{PipelineResult, RunSummary};
pub use utils::{parse_date_bound, parse_datetime, parse_number};
