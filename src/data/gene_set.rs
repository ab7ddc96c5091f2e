//! Gene symbol sets used for tumor-suppressor exclusion.

use crate::error::{Result, TmbError};
use std::collections::HashSet;
use std::path::Path;

/// Header of the column holding gene symbols.
pub const GENE_SYMBOL_COLUMN: &str = "GeneSymbol";

/// A set of gene symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneSet {
    genes: HashSet<String>,
}

impl GeneSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load gene symbols from the `GeneSymbol` column of a TSV file.
    ///
    /// Other columns are ignored, as are blank symbols.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TmbError::FileNotFound(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .from_path(path)?;

        let col = reader
            .headers()?
            .iter()
            .position(|h| h.trim() == GENE_SYMBOL_COLUMN)
            .ok_or_else(|| TmbError::MissingColumn {
                column: GENE_SYMBOL_COLUMN.to_string(),
                context: path.display().to_string(),
            })?;

        let mut genes = HashSet::new();
        for record in reader.records() {
            let record = record?;
            if let Some(symbol) = record.get(col).map(str::trim) {
                if !symbol.is_empty() {
                    genes.insert(symbol.to_string());
                }
            }
        }

        log::info!("Loaded {} genes from {}", genes.len(), path.display());
        Ok(Self { genes })
    }

    #[inline]
    pub fn contains(&self, gene: &str) -> bool {
        self.genes.contains(gene)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for GeneSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            genes: iter.into_iter().map(Into::into).collect(),
        }
    }
}
