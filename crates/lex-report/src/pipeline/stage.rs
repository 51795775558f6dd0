//! Stages of a report run, used to label log output.

use serde::{Deserialize, Serialize};

/// Stages of the report pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Reading the input CSV
    Loading,
    /// Removing duplicates and coercing the value column
    Cleaning,
    /// Restricting rows to the date range
    DateFiltering,
    /// Grouping and reducing
    Aggregating,
    /// Writing the report file
    Writing,
}

impl PipelineStage {
    /// Every stage, in execution order.
    pub const ALL: [PipelineStage; 5] = [
        Self::Loading,
        Self::Cleaning,
        Self::DateFiltering,
        Self::Aggregating,
        Self::Writing,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Cleaning => "Cleaning Data",
            Self::DateFiltering => "Filtering Dates",
            Self::Aggregating => "Aggregating",
            Self::Writing => "Writing Report",
        }
    }

    /// One-based position of the stage in the run.
    pub fn step(&self) -> usize {
        match self {
            Self::Loading => 1,
            Self::Cleaning => 2,
            Self::DateFiltering => 3,
            Self::Aggregating => 4,
            Self::Writing => 5,
        }
    }

    /// Log prefix such as `[2/5] Cleaning Data`.
    pub fn label(&self) -> String {
        format!(
            "[{}/{}] {}",
            self.step(),
            Self::ALL.len(),
            self.display_name()
        )
    }
}
