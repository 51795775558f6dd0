//! Pipeline module.
//!
//! This module provides the report pipeline and its stage labels.

mod runner;
mod stage;

pub use runner::{Pipeline, ProcessedReport};
pub use stage::PipelineStage;
