//! Result types for tumor mutational burden.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Header line of TMB result files.
pub const RESULT_HEADER: &str = "SampleID\tExonLength\tMutCount\tTMB";

/// TMB for a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TmbResult {
    /// Sample identifier.
    pub sample_id: String,
    /// Sequenced footprint in megabases.
    pub exon_length: f64,
    /// Variants surviving all filters.
    pub mut_count: usize,
    /// Mutations per megabase.
    pub tmb: f64,
}

impl TmbResult {
    fn tsv_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.sample_id,
            format_float(self.exon_length),
            self.mut_count,
            format_float(self.tmb)
        )
    }
}

impl std::fmt::Display for TmbResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} mutations / {:.4} Mb = {:.4} mut/Mb",
            self.sample_id, self.mut_count, self.exon_length, self.tmb
        )
    }
}

/// TMB results for one or more samples, in first-seen sample order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmbResultSet {
    pub results: Vec<TmbResult>,
}

impl TmbResultSet {
    pub fn new(results: Vec<TmbResult>) -> Self {
        Self { results }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Result for a given sample.
    pub fn get(&self, sample_id: &str) -> Option<&TmbResult> {
        self.results.iter().find(|r| r.sample_id == sample_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TmbResult> {
        self.results.iter()
    }

    /// Write results as TSV.
    pub fn to_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_tsv(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write results as TSV to any writer.
    pub fn write_tsv<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", RESULT_HEADER)?;
        for r in &self.results {
            writeln!(writer, "{}", r.tsv_line())?;
        }
        Ok(())
    }

    /// Serialize results as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Shortest round-trip form, always with a decimal point (`1.0`, `0.25`).
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}
