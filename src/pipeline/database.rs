//! Annotation database descriptors.
//!
//! Each selectable database name maps to the annotation column it fills and
//! the kind of filter applied to that column. New databases are added to the
//! registry (or to a YAML file merged over it) without touching the pipeline.

use crate::error::{Result, TmbError};
use serde::{Deserialize, Serialize};

use super::runner::PipelineStep;

/// How a database column is filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKind {
    /// Population allele frequency, filtered by the shared frequency cutoff.
    Frequency,
    /// Embedded occurrence counts, filtered by the driver-count cutoff.
    DriverCount,
}

/// A selectable annotation database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    /// Name used on the command line, e.g. `exac03`.
    pub name: String,
    /// Annotation column it fills, e.g. `ExAC_ALL`.
    pub column: String,
    pub kind: DatabaseKind,
}

impl DatabaseSpec {
    pub fn new(name: &str, column: &str, kind: DatabaseKind) -> Self {
        Self {
            name: name.to_string(),
            column: column.to_string(),
            kind,
        }
    }

    /// Pipeline step filtering this database's column.
    pub fn to_step(&self, thresholds: &FilterThresholds) -> PipelineStep {
        match self.kind {
            DatabaseKind::Frequency => PipelineStep::FilterFrequency {
                column: self.column.clone(),
                cutoff: thresholds.frequency_cutoff,
            },
            DatabaseKind::DriverCount => PipelineStep::FilterDriverCount {
                column: self.column.clone(),
                cutoff: thresholds.driver_count_cutoff,
            },
        }
    }
}

/// Cutoffs shared by every database of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterThresholds {
    /// Exclusive upper bound on population frequency.
    pub frequency_cutoff: f64,
    /// Exclusive upper bound on driver occurrence score.
    pub driver_count_cutoff: u64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            frequency_cutoff: 0.05,
            driver_count_cutoff: 50,
        }
    }
}

impl FilterThresholds {
    pub fn new(frequency_cutoff: f64, driver_count_cutoff: u64) -> Result<Self> {
        let thresholds = Self {
            frequency_cutoff,
            driver_count_cutoff,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.frequency_cutoff.is_finite() || self.frequency_cutoff < 0.0 {
            return Err(TmbError::InvalidParameter(format!(
                "Frequency cutoff must be a non-negative number, got {}",
                self.frequency_cutoff
            )));
        }
        Ok(())
    }
}

/// What to do with a selected database name missing from the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnknownDatabasePolicy {
    /// Skip the name with a warning.
    #[default]
    Ignore,
    /// Fail with [`TmbError::UnknownDatabase`].
    Reject,
}

/// Lookup table from database name to descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRegistry {
    pub databases: Vec<DatabaseSpec>,
}

impl Default for DatabaseRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl DatabaseRegistry {
    /// ANNOVAR databases known out of the box.
    ///
    /// Anything else has to come from a YAML registry merged over this one.
    pub fn builtin() -> Self {
        use DatabaseKind::*;
        Self {
            databases: vec![
                DatabaseSpec::new("cosmic70", "cosmic70", DriverCount),
                DatabaseSpec::new("exac03", "ExAC_ALL", Frequency),
                DatabaseSpec::new("genomad41_exome", "gnomAD_exome_ALL", Frequency),
            ],
        }
    }

    /// Descriptor for a database name.
    pub fn get(&self, name: &str) -> Option<&DatabaseSpec> {
        self.databases.iter().find(|db| db.name == name)
    }

    /// Add a descriptor, replacing any existing one with the same name.
    pub fn insert(&mut self, spec: DatabaseSpec) {
        match self.databases.iter_mut().find(|db| db.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.databases.push(spec),
        }
    }

    /// Overlay another registry on this one.
    pub fn merge(&mut self, other: DatabaseRegistry) {
        for spec in other.databases {
            self.insert(spec);
        }
    }

    /// Resolve selected names to descriptors, in the given order.
    pub fn resolve<I>(&self, names: I, policy: UnknownDatabasePolicy) -> Result<Vec<&DatabaseSpec>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut specs = Vec::new();
        for name in names {
            let name = name.as_ref();
            match (self.get(name), policy) {
                (Some(spec), _) => specs.push(spec),
                (None, UnknownDatabasePolicy::Reject) => {
                    return Err(TmbError::UnknownDatabase(name.to_string()));
                }
                (None, UnknownDatabasePolicy::Ignore) => {
                    log::warn!("Ignoring unknown annotation database '{}'", name);
                }
            }
        }
        Ok(specs)
    }

    /// Load from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(TmbError::from)
    }

    /// Save to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(TmbError::from)
    }
}

/// Split a comma-separated database list, dropping blanks.
pub fn parse_database_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
