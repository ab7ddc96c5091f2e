//! Driver-annotation occurrence scores (COSMIC-style `OCCURENCE=` fields).
//!
//! A COSMIC annotation looks like
//! `ID=COSM1234,COSM5678;OCCURENCE=3(lung),1(large_intestine)`. The score of a
//! variant is the sum of the integer parts of every number after the
//! `OCCURENCE=` marker. Variants whose score reaches the cutoff are treated as
//! recurrent hotspots and removed from the burden.

use crate::data::{VariantTable, ABSENT};
use crate::error::{Result, TmbError};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Marker preceding the occurrence counts. The spelling follows the
/// annotation databases.
pub const OCCURRENCE_MARKER: &str = "OCCURENCE=";

/// Why a driver annotation could not be scored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverScoreError {
    #[error("missing '{}' marker", OCCURRENCE_MARKER)]
    MissingMarker,

    #[error("occurrence count '{0}' is too large")]
    Overflow(String),
}

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([0-9]+)(?:\.[0-9]+)?").expect("number pattern is valid"))
}

/// Total occurrence score of one driver annotation.
///
/// The absent marker scores 0. Otherwise the text between the first
/// `OCCURENCE=` and the next one (or the end) is scanned for decimal numbers
/// and their integer parts are summed; fractions are truncated, not rounded.
/// Only ASCII digits form numbers.
pub fn driver_score(value: &str) -> std::result::Result<u64, DriverScoreError> {
    if value == ABSENT {
        return Ok(0);
    }

    let region = value
        .split(OCCURRENCE_MARKER)
        .nth(1)
        .ok_or(DriverScoreError::MissingMarker)?;

    number_regex()
        .captures_iter(region)
        .try_fold(0u64, |total, caps| {
            let digits = &caps[1];
            digits
                .parse::<u64>()
                .ok()
                .and_then(|n| total.checked_add(n))
                .ok_or_else(|| DriverScoreError::Overflow(digits.to_string()))
        })
}

/// Keep variants whose driver score in `column` is strictly below `cutoff`.
///
/// # Arguments
/// * `table` - The variant table to filter
/// * `column` - Driver annotation column, e.g. `cosmic70`
/// * `cutoff` - Exclusive upper bound on the occurrence score
///
/// # Returns
/// A new VariantTable containing only variants below the cutoff. A value
/// without the occurrence marker fails the whole run.
pub fn filter_driver_count(
    table: &VariantTable,
    column: &str,
    cutoff: u64,
) -> Result<VariantTable> {
    let idx = table.column_index(column)?;
    table.retain_rows(|row| {
        let raw = row.get(idx).unwrap_or(ABSENT);
        let score = driver_score(raw).map_err(|e| TmbError::MalformedDriverField {
            column: column.to_string(),
            line: row.line(),
            value: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(score < cutoff)
    })
}
