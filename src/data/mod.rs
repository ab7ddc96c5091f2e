//! Data structures for tumor mutational burden.

mod gene_set;
mod region;
mod result;
mod variant;

pub use gene_set::{GeneSet, GENE_SYMBOL_COLUMN};
pub use region::{Region, RegionSet, BASES_PER_MB};
pub use result::{TmbResult, TmbResultSet, RESULT_HEADER};
pub use variant::{
    VariantRow, VariantTable, ABSENT, EXONIC_FUNC_COLUMN, GENE_COLUMN, SAMPLE_COLUMN,
};
