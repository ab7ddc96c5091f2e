//! Population-frequency filtering.

use crate::data::{VariantTable, ABSENT};
use crate::error::{Result, TmbError};

/// Parse a population frequency, coercing the absent marker to 0.0.
///
/// Returns `None` when the value is neither the marker nor a decimal number.
pub fn parse_frequency(value: &str) -> Option<f64> {
    let value = value.trim();
    if value == ABSENT {
        return Some(0.0);
    }
    value.parse::<f64>().ok()
}

/// Keep variants whose frequency in `column` is strictly below `cutoff`.
///
/// Variants absent from the database count as frequency 0.0 and are kept
/// for any positive cutoff.
///
/// # Arguments
/// * `table` - The variant table to filter
/// * `column` - Population-frequency column, e.g. `ExAC_ALL`
/// * `cutoff` - Exclusive upper bound on the frequency
///
/// # Returns
/// A new VariantTable containing only variants below the cutoff.
pub fn filter_frequency(table: &VariantTable, column: &str, cutoff: f64) -> Result<VariantTable> {
    if cutoff.is_nan() {
        return Err(TmbError::InvalidParameter(
            "Frequency cutoff must be a number".to_string(),
        ));
    }

    let idx = table.column_index(column)?;
    table.retain_rows(|row| {
        let raw = row.get(idx).unwrap_or(ABSENT);
        let freq = parse_frequency(raw).ok_or_else(|| TmbError::MalformedFrequency {
            column: column.to_string(),
            line: row.line(),
            value: raw.to_string(),
        })?;
        Ok(freq < cutoff)
    })
}
