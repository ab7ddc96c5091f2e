//! Tumor Mutational Burden (TMB) from annotated variant tables
//!
//! This library filters ANNOVAR-style annotated variants down to candidate
//! somatic mutations and normalizes their count by the sequenced exonic
//! footprint, giving a burden in mutations per megabase.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (VariantTable, RegionSet, GeneSet, results)
//! - **filter**: Row filters (exonic function, population frequency, driver
//!   occurrence, tumor-suppressor stopgains)
//! - **pipeline**: Database registry, pipeline composition and execution
//! - **burden**: Mutation counting and normalization
//!
//! # Example
//!
//! ```no_run
//! use tmb_calc::prelude::*;
//!
//! // Load data
//! let variants = VariantTable::from_tsv("sample.hg19_multianno.txt").unwrap();
//! let regions = RegionSet::from_bed("exome_targets.bed").unwrap();
//! let suppressors = GeneSet::from_tsv("tsg.txt").unwrap();
//!
//! // Build and run the filter chain
//! let pipeline = Pipeline::for_databases(
//!     ["cosmic70", "exac03"],
//!     &DatabaseRegistry::builtin(),
//!     &FilterThresholds::default(),
//!     UnknownDatabasePolicy::Ignore,
//! )
//! .unwrap();
//! let result = run_single("tumor_1", &variants, &pipeline, &suppressors, regions.footprint_mb())
//!     .unwrap();
//! println!("{}", result);
//! ```

pub mod burden;
pub mod data;
pub mod error;
pub mod filter;
pub mod pipeline;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::burden::{
        compute_tmb, result_file_name, run_multi, run_single, run_to_file, write_results,
    };
    pub use crate::data::{
        GeneSet, Region, RegionSet, TmbResult, TmbResultSet, VariantRow, VariantTable,
    };
    pub use crate::error::{Result, TmbError};
    pub use crate::filter::{
        driver_score, filter_driver_count, filter_exonic, filter_frequency, filter_suppressors,
        DriverScoreError, FilterStats,
    };
    pub use crate::pipeline::{
        parse_database_list, partition_by_sample, DatabaseKind, DatabaseRegistry, DatabaseSpec,
        FilterThresholds, Pipeline, PipelineConfig, PipelineStep, UnknownDatabasePolicy,
    };
}
