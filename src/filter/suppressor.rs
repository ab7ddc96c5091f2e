//! Tumor-suppressor truncation exclusion.

use crate::data::{GeneSet, VariantTable, ABSENT, EXONIC_FUNC_COLUMN, GENE_COLUMN};
use crate::error::Result;

/// Consequence class of a premature stop codon.
pub const STOPGAIN: &str = "stopgain";

/// Whether a variant is a stopgain in one of the excluded genes.
pub fn is_excluded_suppressor(gene: &str, exonic_function: &str, genes: &GeneSet) -> bool {
    exonic_function == STOPGAIN && genes.contains(gene)
}

/// Remove stopgain variants falling in genes of the exclusion set.
///
/// Stopgains in other genes and non-stopgain variants in excluded genes are
/// kept.
pub fn filter_suppressors(table: &VariantTable, genes: &GeneSet) -> Result<VariantTable> {
    let gene_idx = table.column_index(GENE_COLUMN)?;
    let func_idx = table.column_index(EXONIC_FUNC_COLUMN)?;
    table.retain_rows(|row| {
        let gene = row.get(gene_idx).unwrap_or(ABSENT);
        let func = row.get(func_idx).unwrap_or(ABSENT);
        Ok(!is_excluded_suppressor(gene, func, genes))
    })
}
