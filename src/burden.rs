//! Mutation counting and normalization by sequenced footprint.

use crate::data::{GeneSet, TmbResult, TmbResultSet, VariantTable, SAMPLE_COLUMN};
use crate::error::{Result, TmbError};
use crate::pipeline::{partition_by_sample, Pipeline};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Count surviving variants and normalize by the footprint in megabases.
///
/// A footprint of exactly zero is an error rather than an infinite or NaN
/// burden.
pub fn compute_tmb(sample_id: &str, variants: &VariantTable, exon_length: f64) -> Result<TmbResult> {
    if exon_length == 0.0 {
        return Err(TmbError::DivisionByZeroFootprint);
    }
    let mut_count = variants.len();
    Ok(TmbResult {
        sample_id: sample_id.to_string(),
        exon_length,
        mut_count,
        tmb: mut_count as f64 / exon_length,
    })
}

/// Filter one sample's variants and compute its TMB.
pub fn run_single(
    sample_id: &str,
    variants: &VariantTable,
    pipeline: &Pipeline,
    suppressors: &GeneSet,
    exon_length: f64,
) -> Result<TmbResult> {
    let (filtered, stats) = pipeline.run_with_stats(variants, suppressors)?;
    for stat in &stats {
        log::info!("[{}] {}", sample_id, stat);
    }
    let result = compute_tmb(sample_id, &filtered, exon_length)?;
    log::info!("{}", result);
    Ok(result)
}

/// Compute TMB for every sample of a multi-sample table.
///
/// Rows are grouped by `SampleID` and each group is filtered on its own
/// against the shared footprint. Groups run in parallel; results keep the
/// first-seen sample order.
pub fn run_multi(
    variants: &VariantTable,
    pipeline: &Pipeline,
    suppressors: &GeneSet,
    exon_length: f64,
) -> Result<TmbResultSet> {
    let partitions = partition_by_sample(variants, SAMPLE_COLUMN)?;
    log::info!("Found {} samples", partitions.len());

    let results = partitions
        .par_iter()
        .map(|(sample_id, subset)| run_single(sample_id, subset, pipeline, suppressors, exon_length))
        .collect::<Result<Vec<_>>>()?;

    Ok(TmbResultSet::new(results))
}

/// Name of the result file for a run.
///
/// Single-sample runs write `<sample>_TMB.txt`; multi-sample runs use the
/// label as a batch prefix and write `<sample>Samples_TMB.txt`.
pub fn result_file_name(sample: &str, multi: bool) -> String {
    if multi {
        format!("{}Samples_TMB.txt", sample)
    } else {
        format!("{}_TMB.txt", sample)
    }
}

/// Write computed results into `outdir`, creating it if needed.
///
/// Returns the path of the written file.
pub fn write_results(
    sample: &str,
    multi: bool,
    outdir: &Path,
    results: &TmbResultSet,
) -> Result<PathBuf> {
    fs::create_dir_all(outdir)?;
    let output_path = outdir.join(result_file_name(sample, multi));
    results.to_tsv(&output_path)?;
    log::info!("Wrote {} result(s) to {:?}", results.len(), output_path);
    Ok(output_path)
}

/// Compute TMB for one sample (or every sample when `multi` is set) and
/// write the result file.
///
/// Nothing touches `outdir` until every result is computed, so a failing
/// run leaves no file behind.
pub fn run_to_file(
    sample: &str,
    multi: bool,
    variants: &VariantTable,
    pipeline: &Pipeline,
    suppressors: &GeneSet,
    exon_length: f64,
    outdir: &Path,
) -> Result<(TmbResultSet, PathBuf)> {
    if sample.trim().is_empty() {
        return Err(TmbError::InvalidParameter(
            "Sample identifier must not be empty".to_string(),
        ));
    }
    let results = if multi {
        run_multi(variants, pipeline, suppressors, exon_length)?
    } else {
        TmbResultSet::new(vec![run_single(
            sample,
            variants,
            pipeline,
            suppressors,
            exon_length,
        )?])
    };
    let output_path = write_results(sample, multi, outdir, &results)?;
    Ok((results, output_path))
}
