//! Annotated variant tables (ANNOVAR-style multianno output).

use crate::error::{Result, TmbError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Placeholder written by the annotator when a database has no entry.
pub const ABSENT: &str = ".";

/// Column holding the predicted consequence class.
pub const EXONIC_FUNC_COLUMN: &str = "ExonicFunc.refGene";

/// Column holding the gene symbol.
pub const GENE_COLUMN: &str = "Gene.refGene";

/// Column grouping rows by sample in multi-sample tables.
pub const SAMPLE_COLUMN: &str = "SampleID";

/// One annotated variant.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantRow {
    /// 1-based line number in the source file (0 for rows built in memory).
    line: usize,
    fields: Vec<String>,
}

impl VariantRow {
    /// Create a row from raw field values.
    pub fn new(line: usize, fields: Vec<String>) -> Self {
        Self { line, fields }
    }

    /// Source line number.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Value at a column index.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.fields.get(idx).map(String::as_str)
    }

    /// All field values.
    #[inline]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// A header plus a set of annotated variant rows.
///
/// Filters never mutate a table; they build a new one with
/// [`VariantTable::subset_rows`].
#[derive(Debug, Clone)]
pub struct VariantTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<VariantRow>,
}

impl VariantTable {
    /// Create a table from column names and rows.
    ///
    /// Every row must have exactly one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<VariantRow>) -> Result<Self> {
        for row in &rows {
            if row.fields.len() != columns.len() {
                return Err(TmbError::InvalidParameter(format!(
                    "Row at line {} has {} fields, header has {}",
                    row.line,
                    row.fields.len(),
                    columns.len()
                )));
            }
        }
        let index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Load an annotated variant table from a TSV file.
    ///
    /// Lines starting with `##` are meta-headers and are dropped before
    /// parsing, as are blank lines. The first remaining line is the header.
    pub fn from_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TmbError::FileNotFound(path.to_path_buf()));
        }
        let raw = fs::read_to_string(path)?;

        // Keep original line numbers for error messages.
        let mut line_numbers = Vec::new();
        let mut body = String::with_capacity(raw.len());
        for (i, line) in raw.lines().enumerate() {
            if line.starts_with("##") || line.trim().is_empty() {
                continue;
            }
            line_numbers.push(i + 1);
            body.push_str(line);
            body.push('\n');
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .has_headers(true)
            .from_reader(body.as_bytes());

        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for (record_idx, record) in reader.records().enumerate() {
            let record = record?;
            // record 0 sits on the second kept line
            let line = line_numbers.get(record_idx + 1).copied().unwrap_or(0);
            rows.push(VariantRow::new(
                line,
                record.iter().map(str::to_string).collect(),
            ));
        }

        log::info!(
            "Loaded {} variants x {} columns from {}",
            rows.len(),
            columns.len(),
            path.display()
        );

        Self::new(columns, rows)
    }

    /// Column names in header order.
    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in file order.
    #[inline]
    pub fn rows(&self) -> &[VariantRow] {
        &self.rows
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a required column.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TmbError::MissingColumn {
                column: name.to_string(),
                context: "annotated variant table".to_string(),
            })
    }

    /// Subset the table to the given row indices, keeping the header.
    pub fn subset_rows(&self, indices: &[usize]) -> Result<Self> {
        let mut rows = Vec::with_capacity(indices.len());
        for &idx in indices {
            let row = self.rows.get(idx).ok_or_else(|| {
                TmbError::InvalidParameter(format!("Row index {} out of bounds", idx))
            })?;
            rows.push(row.clone());
        }
        Ok(Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
            rows,
        })
    }

    /// Keep rows matching a fallible predicate, in order.
    pub fn retain_rows<F>(&self, mut keep: F) -> Result<Self>
    where
        F: FnMut(&VariantRow) -> Result<bool>,
    {
        let mut indices = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            if keep(row)? {
                indices.push(i);
            }
        }
        self.subset_rows(&indices)
    }
}
