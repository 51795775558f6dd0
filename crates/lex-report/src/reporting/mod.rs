//! Report output module.
//!
//! This module persists the aggregated report and renders it for the console.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_report::reporting::{render_preview, ReportWriter};
//!
//! let path = ReportWriter.write_csv(&mut report, "outputs/reporte.csv")?;
//! println!("Report written: {}", path.display());
//! println!("{}", render_preview(&report, 10)?);
//! ```

mod preview;
mod writer;

pub use preview::{DEFAULT_PREVIEW_ROWS, render_preview};
pub use writer::ReportWriter;
