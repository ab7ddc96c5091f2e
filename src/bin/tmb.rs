//! TMB - Tumor Mutational Burden CLI
//!
//! Command-line interface for computing tumor mutational burden from
//! annotated variant tables.

use clap::{Parser, Subcommand};
use log::Level;
use std::path::{Path, PathBuf};
use tmb_calc::burden::run_to_file;
use tmb_calc::data::{GeneSet, RegionSet, VariantTable};
use tmb_calc::error::{Result, TmbError};
use tmb_calc::pipeline::{
    parse_database_list, DatabaseRegistry, FilterThresholds, Pipeline, PipelineConfig,
    UnknownDatabasePolicy,
};

/// Tumor Mutational Burden from annotated variants
#[derive(Parser)]
#[command(name = "tmb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute TMB for one sample or a multi-sample table
    Calc {
        /// Sample identifier (batch label in multi-sample mode)
        #[arg(short, long)]
        sample: String,

        /// Path to the annotated variant table (TSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to the region file (BED)
        #[arg(short, long)]
        bed: PathBuf,

        /// Comma-separated annotation databases (e.g. "cosmic70,exac03,genomad41_exome")
        #[arg(short, long, required_unless_present = "pipeline")]
        dbs: Option<String>,

        /// Pipeline configuration YAML used instead of --dbs and the cutoffs
        #[arg(short, long, conflicts_with = "dbs")]
        pipeline: Option<PathBuf>,

        /// Path to the tumor-suppressor gene list (TSV with a GeneSymbol column)
        #[arg(short = 'g', long)]
        tsg: PathBuf,

        /// Population frequency cutoff (default: 0.05)
        #[arg(long, default_value = "0.05")]
        freq_cutoff: f64,

        /// Driver occurrence cutoff (default: 50)
        #[arg(long, default_value = "50")]
        driver_cutoff: u64,

        /// Input holds several samples, grouped by the SampleID column
        #[arg(long)]
        multi: bool,

        /// Fail on database names missing from the registry instead of ignoring them
        #[arg(long)]
        strict_dbs: bool,

        /// YAML database registry merged over the built-in one
        #[arg(long)]
        db_config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        outdir: PathBuf,

        /// Also print results as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Write the built-in database registry as YAML
    Example {
        /// Output path for the registry YAML
        #[arg(short, long, default_value = "databases.yaml")]
        output: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::Debug } else { Level::Info };
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let result = match cli.command {
        Commands::Calc {
            sample,
            input,
            bed,
            dbs,
            pipeline,
            tsg,
            freq_cutoff,
            driver_cutoff,
            multi,
            strict_dbs,
            db_config,
            outdir,
            json,
        } => cmd_calc(
            &sample,
            &input,
            &bed,
            dbs.as_deref(),
            pipeline.as_deref(),
            &tsg,
            freq_cutoff,
            driver_cutoff,
            multi,
            strict_dbs,
            db_config.as_deref(),
            &outdir,
            json,
        ),

        Commands::Example { output } => cmd_example(&output),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Compute TMB and write the result file
#[allow(clippy::too_many_arguments)]
fn cmd_calc(
    sample: &str,
    input: &Path,
    bed: &Path,
    dbs: Option<&str>,
    pipeline_path: Option<&Path>,
    tsg: &Path,
    freq_cutoff: f64,
    driver_cutoff: u64,
    multi: bool,
    strict_dbs: bool,
    db_config: Option<&Path>,
    outdir: &Path,
    json: bool,
) -> Result<()> {
    let pipeline = match (pipeline_path, dbs) {
        (Some(path), _) => Pipeline::from_config(&PipelineConfig::from_path(path)?),
        (None, Some(dbs)) => {
            build_pipeline(dbs, freq_cutoff, driver_cutoff, strict_dbs, db_config)?
        }
        (None, None) => {
            return Err(TmbError::InvalidParameter(
                "Either --dbs or --pipeline must be given".to_string(),
            ));
        }
    };

    let variants = VariantTable::from_tsv(input)?;
    let regions = RegionSet::from_bed(bed)?;
    let suppressors = GeneSet::from_tsv(tsg)?;

    let (results, _) = run_to_file(
        sample,
        multi,
        &variants,
        &pipeline,
        &suppressors,
        regions.footprint_mb(),
        outdir,
    )?;

    if json {
        println!("{}", results.to_json()?);
    }

    Ok(())
}

/// Build the standard filter chain from a database list
fn build_pipeline(
    dbs: &str,
    freq_cutoff: f64,
    driver_cutoff: u64,
    strict_dbs: bool,
    db_config: Option<&Path>,
) -> Result<Pipeline> {
    let databases = parse_database_list(dbs);
    if databases.is_empty() {
        return Err(TmbError::InvalidParameter(
            "At least one annotation database must be selected".to_string(),
        ));
    }
    let thresholds = FilterThresholds::new(freq_cutoff, driver_cutoff)?;
    let policy = if strict_dbs {
        UnknownDatabasePolicy::Reject
    } else {
        UnknownDatabasePolicy::Ignore
    };

    let mut registry = DatabaseRegistry::builtin();
    if let Some(path) = db_config {
        if !path.exists() {
            return Err(TmbError::FileNotFound(path.to_path_buf()));
        }
        log::info!("Loading database registry from {:?}", path);
        registry.merge(DatabaseRegistry::from_yaml(&std::fs::read_to_string(path)?)?);
    }

    log::info!("Databases: {}", databases.join(", "));
    log::info!(
        "Cutoffs: frequency < {}, driver occurrence < {}",
        thresholds.frequency_cutoff,
        thresholds.driver_count_cutoff
    );
    Pipeline::for_databases(&databases, &registry, &thresholds, policy)
}

/// Write the built-in database registry
fn cmd_example(output_path: &Path) -> Result<()> {
    let yaml = DatabaseRegistry::builtin().to_yaml()?;
    std::fs::write(output_path, &yaml)?;
    log::info!("Wrote database registry to {:?}", output_path);
    println!("{}", yaml);
    Ok(())
}
