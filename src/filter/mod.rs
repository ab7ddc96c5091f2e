//! Row filters for annotated variant tables.

pub mod driver;
pub mod exonic;
pub mod frequency;
pub mod suppressor;

pub use driver::{driver_score, filter_driver_count, DriverScoreError, OCCURRENCE_MARKER};
pub use exonic::{filter_exonic, is_annotated_function, UNKNOWN_FUNCTION};
pub use frequency::{filter_frequency, parse_frequency};
pub use suppressor::{filter_suppressors, is_excluded_suppressor, STOPGAIN};

use serde::{Deserialize, Serialize};

/// Row counts before and after one filter step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Human-readable step label.
    pub step: String,
    /// Rows entering the step.
    pub n_before: usize,
    /// Rows surviving the step.
    pub n_after: usize,
}

impl FilterStats {
    pub fn new(step: impl Into<String>, n_before: usize, n_after: usize) -> Self {
        Self {
            step: step.into(),
            n_before,
            n_after,
        }
    }

    /// Rows removed by the step.
    pub fn n_removed(&self) -> usize {
        self.n_before.saturating_sub(self.n_after)
    }

    /// Proportion of rows retained (1.0 for an empty input).
    pub fn retention_rate(&self) -> f64 {
        if self.n_before == 0 {
            1.0
        } else {
            self.n_after as f64 / self.n_before as f64
        }
    }
}

impl std::fmt::Display for FilterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} -> {} variants ({} removed, {:.1}% retained)",
            self.step,
            self.n_before,
            self.n_after,
            self.n_removed(),
            self.retention_rate() * 100.0
        )
    }
}
