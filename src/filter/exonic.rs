//! Exonic-function pre-filter.

use crate::data::{VariantTable, ABSENT, EXONIC_FUNC_COLUMN};
use crate::error::Result;

/// Consequence class given to variants the annotator could not classify.
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Whether an exonic-function value carries a usable consequence class.
pub fn is_annotated_function(value: &str) -> bool {
    value != ABSENT && value != UNKNOWN_FUNCTION
}

/// Drop variants whose exonic function is absent (`.`) or `unknown`.
pub fn filter_exonic(table: &VariantTable) -> Result<VariantTable> {
    let idx = table.column_index(EXONIC_FUNC_COLUMN)?;
    table.retain_rows(|row| Ok(is_annotated_function(row.get(idx).unwrap_or(ABSENT))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VariantRow;
    use crate::error::TmbError;

    fn table(functions: &[&str]) -> VariantTable {
        let rows = functions
            .iter()
            .enumerate()
            .map(|(i, f)| VariantRow::new(i + 2, vec![f.to_string()]))
            .collect();
        VariantTable::new(vec![EXONIC_FUNC_COLUMN.to_string()], rows).unwrap()
    }

    #[test]
    fn test_filter_exonic() {
        let t = table(&["stopgain", ".", "unknown", "nonsynonymous SNV", "synonymous SNV"]);
        let filtered = filter_exonic(&t).unwrap();

        let kept: Vec<&str> = filtered.rows().iter().filter_map(|r| r.get(0)).collect();
        assert_eq!(kept, vec!["stopgain", "nonsynonymous SNV", "synonymous SNV"]);
    }

    #[test]
    fn test_filter_exonic_missing_column() {
        let t = VariantTable::new(vec!["Gene.refGene".to_string()], vec![]).unwrap();
        assert!(matches!(filter_exonic(&t), Err(TmbError::MissingColumn { .. })));
    }
}
