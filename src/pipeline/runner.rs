//! Pipeline runner for composing and executing variant filter steps.

use crate::data::{GeneSet, VariantTable, ABSENT};
use crate::error::{Result, TmbError};
use crate::filter::{
    filter_driver_count, filter_exonic, filter_frequency, filter_suppressors, FilterStats,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::database::{DatabaseRegistry, FilterThresholds, UnknownDatabasePolicy};

/// A step in the filter pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineStep {
    /// Drop variants with an absent or `unknown` exonic function.
    FilterExonic,
    /// Keep variants with population frequency below the cutoff.
    FilterFrequency { column: String, cutoff: f64 },
    /// Keep variants with driver occurrence score below the cutoff.
    FilterDriverCount { column: String, cutoff: u64 },
    /// Drop stopgain variants in excluded tumor-suppressor genes.
    ExcludeSuppressors,
}

impl PipelineStep {
    /// Short label used in logs and filter statistics.
    pub fn label(&self) -> String {
        match self {
            Self::FilterExonic => "exonic function".to_string(),
            Self::FilterFrequency { column, cutoff } => format!("{} < {}", column, cutoff),
            Self::FilterDriverCount { column, cutoff } => format!("{} score < {}", column, cutoff),
            Self::ExcludeSuppressors => "suppressor stopgain".to_string(),
        }
    }

    fn apply(&self, table: &VariantTable, suppressors: &GeneSet) -> Result<VariantTable> {
        match self {
            Self::FilterExonic => filter_exonic(table),
            Self::FilterFrequency { column, cutoff } => filter_frequency(table, column, *cutoff),
            Self::FilterDriverCount { column, cutoff } => {
                filter_driver_count(table, column, *cutoff)
            }
            Self::ExcludeSuppressors => filter_suppressors(table, suppressors),
        }
    }
}

/// Pipeline configuration for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Name of the pipeline.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Steps to execute.
    pub steps: Vec<PipelineStep>,
}

impl PipelineConfig {
    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(TmbError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(TmbError::from)
    }

    /// Load and validate a pipeline configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TmbError::FileNotFound(path.to_path_buf()));
        }
        let config = Self::from_yaml(&std::fs::read_to_string(path)?)?;
        config.validate()?;
        log::info!(
            "Loaded pipeline '{}' ({} steps) from {}",
            config.name,
            config.steps.len(),
            path.display()
        );
        Ok(config)
    }

    /// Check step parameters.
    pub fn validate(&self) -> Result<()> {
        for step in &self.steps {
            if let PipelineStep::FilterFrequency { cutoff, .. } = step {
                FilterThresholds::new(*cutoff, 0)?;
            }
        }
        Ok(())
    }
}

/// Builder for constructing and running variant filter pipelines.
#[derive(Debug, Clone)]
pub struct Pipeline {
    steps: Vec<PipelineStep>,
    name: String,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            name: "unnamed".to_string(),
        }
    }

    /// Create from a config.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            steps: config.steps.clone(),
            name: config.name.clone(),
        }
    }

    /// Build the standard TMB filter chain for a set of selected databases.
    ///
    /// The chain is: exonic-function pre-filter, one frequency or
    /// driver-count filter per selected database (in the given order), then
    /// suppressor stopgain exclusion. Names missing from `registry` are
    /// handled according to `policy`.
    pub fn for_databases<I>(
        databases: I,
        registry: &DatabaseRegistry,
        thresholds: &FilterThresholds,
        policy: UnknownDatabasePolicy,
    ) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        thresholds.validate()?;

        let mut pipeline = Self::new().name("tmb").filter_exonic();
        for spec in registry.resolve(databases, policy)? {
            pipeline = pipeline.step(spec.to_step(thresholds));
        }
        Ok(pipeline.exclude_suppressors())
    }

    /// Set the pipeline name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Append an arbitrary step.
    pub fn step(mut self, step: PipelineStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Add the exonic-function pre-filter.
    pub fn filter_exonic(self) -> Self {
        self.step(PipelineStep::FilterExonic)
    }

    /// Add a population-frequency filter on `column`.
    pub fn filter_frequency(self, column: &str, cutoff: f64) -> Self {
        self.step(PipelineStep::FilterFrequency {
            column: column.to_string(),
            cutoff,
        })
    }

    /// Add a driver-count filter on `column`.
    pub fn filter_driver_count(self, column: &str, cutoff: u64) -> Self {
        self.step(PipelineStep::FilterDriverCount {
            column: column.to_string(),
            cutoff,
        })
    }

    /// Add suppressor stopgain exclusion.
    pub fn exclude_suppressors(self) -> Self {
        self.step(PipelineStep::ExcludeSuppressors)
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Convert to config for serialization.
    pub fn to_config(&self, description: Option<&str>) -> PipelineConfig {
        PipelineConfig {
            name: self.name.clone(),
            description: description.map(String::from),
            steps: self.steps.clone(),
        }
    }

    /// Run the pipeline, returning the surviving variants.
    pub fn run(&self, variants: &VariantTable, suppressors: &GeneSet) -> Result<VariantTable> {
        self.run_with_stats(variants, suppressors)
            .map(|(table, _)| table)
    }

    /// Run the pipeline, also reporting row counts around each step.
    pub fn run_with_stats(
        &self,
        variants: &VariantTable,
        suppressors: &GeneSet,
    ) -> Result<(VariantTable, Vec<FilterStats>)> {
        let mut current = variants.clone();
        let mut stats = Vec::with_capacity(self.steps.len());

        for step in &self.steps {
            let n_before = current.len();
            current = step.apply(&current, suppressors)?;
            let stat = FilterStats::new(step.label(), n_before, current.len());
            log::debug!("[{}] {}", self.name, stat);
            stats.push(stat);
        }

        Ok((current, stats))
    }
}

/// Split a table by the values of `column`, in first-seen order.
///
/// Each partition keeps the full header. Rows are never shared between
/// partitions.
pub fn partition_by_sample(
    table: &VariantTable,
    column: &str,
) -> Result<Vec<(String, VariantTable)>> {
    let idx = table.column_index(column)?;

    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, row) in table.rows().iter().enumerate() {
        let sample = row.get(idx).unwrap_or(ABSENT);
        groups
            .entry(sample.to_string())
            .or_insert_with(|| {
                order.push(sample.to_string());
                Vec::new()
            })
            .push(i);
    }

    order
        .into_iter()
        .map(|sample| {
            let indices = groups.remove(&sample).unwrap_or_default();
            let subset = table.subset_rows(&indices)?;
            Ok((sample, subset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{VariantRow, EXONIC_FUNC_COLUMN, GENE_COLUMN, SAMPLE_COLUMN};

    const COLUMNS: [&str; 5] = [
        SAMPLE_COLUMN,
        GENE_COLUMN,
        EXONIC_FUNC_COLUMN,
        "cosmic70",
        "ExAC_ALL",
    ];

    fn create_test_table() -> VariantTable {
        let raw = [
            ["S1", "TP53", "stopgain", ".", "."],
            ["S1", "TP53", "nonsynonymous SNV", ".", "."],
            ["S1", "KRAS", "nonsynonymous SNV", "ID=COSM1;OCCURENCE=500(lung)", "."],
            ["S2", "MYC", "stopgain", "ID=COSM2;OCCURENCE=2(skin)", "0.001"],
            ["S2", "EGFR", "unknown", ".", "."],
            ["S1", "BRAF", ".", ".", "."],
            ["S2", "ALK", "frameshift deletion", ".", "0.20"],
            ["S3", "PTEN", "synonymous SNV", ".", "."],
        ];
        let rows = raw
            .iter()
            .enumerate()
            .map(|(i, r)| VariantRow::new(i + 2, r.iter().map(|s| s.to_string()).collect()))
            .collect();
        VariantTable::new(COLUMNS.iter().map(|s| s.to_string()).collect(), rows).unwrap()
    }

    fn suppressors() -> GeneSet {
        ["TP53", "PTEN"].into_iter().collect()
    }

    fn lines(table: &VariantTable) -> Vec<usize> {
        table.rows().iter().map(|r| r.line()).collect()
    }

    #[test]
    fn test_pipeline_builder() {
        let pipeline = Pipeline::new()
            .name("test")
            .filter_exonic()
            .filter_frequency("ExAC_ALL", 0.05)
            .filter_driver_count("cosmic70", 50)
            .exclude_suppressors();

        let config = pipeline.to_config(Some("Test pipeline"));
        assert_eq!(config.steps.len(), 4);
        assert_eq!(config.name, "test");
    }

    #[test]
    fn test_for_databases_order() {
        let pipeline = Pipeline::for_databases(
            ["exac03", "cosmic70"],
            &DatabaseRegistry::builtin(),
            &FilterThresholds::default(),
            UnknownDatabasePolicy::Ignore,
        )
        .unwrap();

        assert_eq!(
            pipeline.steps(),
            &[
                PipelineStep::FilterExonic,
                PipelineStep::FilterFrequency {
                    column: "ExAC_ALL".to_string(),
                    cutoff: 0.05
                },
                PipelineStep::FilterDriverCount {
                    column: "cosmic70".to_string(),
                    cutoff: 50
                },
                PipelineStep::ExcludeSuppressors,
            ]
        );
    }

    #[test]
    fn test_for_databases_unknown() {
        let registry = DatabaseRegistry::builtin();
        let thresholds = FilterThresholds::default();

        let lenient =
            Pipeline::for_databases(["avsnp150"], &registry, &thresholds, UnknownDatabasePolicy::Ignore)
                .unwrap();
        assert_eq!(lenient.steps().len(), 2);

        let strict =
            Pipeline::for_databases(["avsnp150"], &registry, &thresholds, UnknownDatabasePolicy::Reject);
        assert!(matches!(strict, Err(TmbError::UnknownDatabase(_))));
    }

    #[test]
    fn test_unlisted_database_ignored_without_column() {
        let table = create_test_table();
        let pipeline = Pipeline::for_databases(
            ["gnomad_genome"],
            &DatabaseRegistry::builtin(),
            &FilterThresholds::default(),
            UnknownDatabasePolicy::Ignore,
        )
        .unwrap();

        assert_eq!(
            pipeline.steps(),
            &[PipelineStep::FilterExonic, PipelineStep::ExcludeSuppressors]
        );
        let filtered = pipeline.run(&table, &suppressors()).unwrap();
        assert_eq!(filtered.len(), 5);
    }

    #[test]
    fn test_pipeline_run() {
        let table = create_test_table();
        let pipeline = Pipeline::for_databases(
            ["cosmic70", "exac03"],
            &DatabaseRegistry::builtin(),
            &FilterThresholds::default(),
            UnknownDatabasePolicy::Ignore,
        )
        .unwrap();

        let (filtered, stats) = pipeline.run_with_stats(&table, &suppressors()).unwrap();

        // TP53 stopgain excluded, KRAS hotspot excluded, EGFR unknown and BRAF
        // absent dropped, ALK common dropped.
        assert_eq!(lines(&filtered), vec![3, 5, 9]);
        assert_eq!(stats.len(), 4);
        assert_eq!(stats[0].n_before, 8);
        assert_eq!(stats[0].n_after, 6);
        assert_eq!(stats[3].n_after, 3);
    }

    #[test]
    fn test_pipeline_idempotent() {
        let table = create_test_table();
        let pipeline = Pipeline::for_databases(
            ["cosmic70", "exac03", "cosmic70"],
            &DatabaseRegistry::builtin(),
            &FilterThresholds::default(),
            UnknownDatabasePolicy::Ignore,
        )
        .unwrap();

        let once = pipeline.run(&table, &suppressors()).unwrap();
        let twice = pipeline.run(&once, &suppressors()).unwrap();
        assert_eq!(once.rows(), twice.rows());
    }

    #[test]
    fn test_pipeline_does_not_mutate_input() {
        let table = create_test_table();
        let _ = Pipeline::new()
            .filter_exonic()
            .run(&table, &GeneSet::new())
            .unwrap();
        assert_eq!(table.len(), 8);
    }

    #[test]
    fn test_pipeline_missing_column() {
        let table = create_test_table();
        let result = Pipeline::new()
            .filter_frequency("gnomAD_exome_ALL", 0.05)
            .run(&table, &GeneSet::new());
        assert!(matches!(result, Err(TmbError::MissingColumn { .. })));
    }

    #[test]
    fn test_partition_by_sample() {
        let table = create_test_table();
        let parts = partition_by_sample(&table, SAMPLE_COLUMN).unwrap();

        let ids: Vec<&str> = parts.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);
        assert_eq!(lines(&parts[0].1), vec![2, 3, 4, 7]);
        assert_eq!(lines(&parts[1].1), vec![5, 6, 8]);
        assert_eq!(parts[2].1.len(), 1);
    }

    #[test]
    fn test_pipeline_config_yaml() {
        let pipeline = Pipeline::new()
            .name("example")
            .filter_exonic()
            .filter_frequency("gnomAD_exome_ALL", 0.01)
            .filter_driver_count("cosmic70", 25)
            .exclude_suppressors();

        let config = pipeline.to_config(Some("Example TMB pipeline"));
        let yaml = config.to_yaml().unwrap();

        let parsed = PipelineConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.name, "example");
        assert_eq!(Pipeline::from_config(&parsed).steps(), pipeline.steps());
    }

    #[test]
    fn test_pipeline_config_rejects_negative_cutoff() {
        let config = Pipeline::new()
            .filter_frequency("ExAC_ALL", -0.5)
            .to_config(None);
        assert!(matches!(
            config.validate(),
            Err(TmbError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_pipeline_config_missing_file() {
        let err = PipelineConfig::from_path("/nonexistent/pipeline.yaml").unwrap_err();
        assert!(matches!(err, TmbError::FileNotFound(_)));
    }
}
