//! Sequenced region definitions (exome bait/target BED files).

use crate::error::{Result, TmbError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Bases per megabase.
pub const BASES_PER_MB: f64 = 1_000_000.0;

/// A single (chromosome, start, end) interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub chrom: String,
    pub start: i64,
    pub end: i64,
}

impl Region {
    pub fn new(chrom: &str, start: i64, end: i64) -> Self {
        Self {
            chrom: chrom.to_string(),
            start,
            end,
        }
    }

    /// Interval length. Reversed intervals are not validated and give a
    /// negative length.
    #[inline]
    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The sequenced footprint as an ordered list of intervals.
///
/// Intervals are summed as given. Overlapping or adjacent intervals are not
/// merged, so callers should supply a pre-merged region set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionSet {
    regions: Vec<Region>,
}

impl RegionSet {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    /// Load regions from a BED-like file.
    ///
    /// The file has no header. Fields are split on whitespace and the first
    /// three are read as chromosome, start and end. Comment lines (`#`),
    /// `track`/`browser` lines and blank lines are skipped.
    pub fn from_bed<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TmbError::FileNotFound(path.to_path_buf()));
        }
        let reader = BufReader::new(File::open(path)?);

        let mut regions = Vec::new();
        for (idx, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed = line.trim();
            if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with("track")
                || trimmed.starts_with("browser")
            {
                continue;
            }

            let malformed = |reason: String| TmbError::MalformedRegion {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            };

            let fields: Vec<&str> = trimmed.split_whitespace().collect();
            if fields.len() < 3 {
                return Err(malformed(format!(
                    "expected at least 3 fields, found {}",
                    fields.len()
                )));
            }
            let start: i64 = fields[1]
                .parse()
                .map_err(|_| malformed(format!("invalid start '{}'", fields[1])))?;
            let end: i64 = fields[2]
                .parse()
                .map_err(|_| malformed(format!("invalid end '{}'", fields[2])))?;

            regions.push(Region::new(fields[0], start, end));
        }

        let set = Self::new(regions);
        log::info!(
            "Loaded {} regions ({:.4} Mb) from {}",
            set.len(),
            set.footprint_mb(),
            path.display()
        );
        Ok(set)
    }

    /// Total covered length in bases.
    pub fn total_bases(&self) -> i64 {
        self.regions.iter().map(Region::len).sum()
    }

    /// Total covered length in megabases.
    pub fn footprint_mb(&self) -> f64 {
        self.total_bases() as f64 / BASES_PER_MB
    }

    #[inline]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl FromIterator<Region> for RegionSet {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
