//! Pipeline composition and execution for variant filtering.

mod database;
mod runner;

pub use database::{
    parse_database_list, DatabaseKind, DatabaseRegistry, DatabaseSpec, FilterThresholds,
    UnknownDatabasePolicy,
};
pub use runner::{partition_by_sample, Pipeline, PipelineConfig, PipelineStep};
