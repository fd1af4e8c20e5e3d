// ==============================================================================
// config.rs - Pipeline Configuration
// ==============================================================================
// Description: Command-line/environment configuration for both pipelines
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use clap::Args;
use std::path::PathBuf;

use crate::output::{OutputError, OutputFormat, PlotlySource};
use crate::parsers::DEFAULT_ALLELE_FIELD;

/// plotly.js source for HTML documents
///
/// Pages are self-contained by default: the local bundle is inlined into every
/// document. `--plotly-cdn` opts into a `<script src>` reference instead.
#[derive(Args, Debug, Clone, Default)]
pub struct PlotlyOptions {
    /// Local plotly.js bundle (e.g. plotly-2.35.2.min.js) inlined into HTML documents
    #[arg(long, env = "PLOTLY_JS")]
    pub plotly_js: Option<PathBuf>,

    /// Load plotly.js from the public CDN instead of inlining a local bundle
    #[arg(long, conflicts_with = "plotly_js")]
    pub plotly_cdn: bool,
}

impl PlotlyOptions {
    /// Resolve the configured source; an HTML run without one is an error
    pub fn source(&self, format: OutputFormat) -> Result<Option<PlotlySource>, OutputError> {
        if format != OutputFormat::Html {
            return Ok(None);
        }
        match (&self.plotly_js, self.plotly_cdn) {
            (Some(path), _) => PlotlySource::from_file(path).map(Some),
            (None, true) => Ok(Some(PlotlySource::Cdn)),
            (None, false) => Err(OutputError::MissingPlotly),
        }
    }
}

/// Ancestry pathogenicity chart configuration
#[derive(Args, Debug, Clone)]
pub struct AncestryConfig {
    /// Allele table (CSV with disease, gene, population_description, is_pathogenic)
    #[arg(short, long, env = "ANCESTRY_INPUT")]
    pub input: PathBuf,

    /// Directory for chart documents (created if absent)
    #[arg(short, long, env = "ANCESTRY_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Extra population aliases (CSV with raw,canonical columns)
    #[arg(long, env = "ANCESTRY_POPULATION_ALIASES")]
    pub population_aliases: Option<PathBuf>,

    /// Write the aggregated table to this CSV file
    #[arg(long, env = "ANCESTRY_SUMMARY_CSV")]
    pub summary_csv: Option<PathBuf>,

    /// Chart document format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub plotly: PlotlyOptions,
}

/// Tandem-repeat allele distribution configuration
#[derive(Args, Debug, Clone)]
pub struct TandemRepeatConfig {
    /// Tandem-repeat genotype VCF (.vcf or bgzipped .vcf.gz)
    #[arg(long, env = "TR_VCF")]
    pub vcf: PathBuf,

    /// Locus catalog (JSON array of loci)
    #[arg(long, env = "TR_CATALOG")]
    pub catalog: PathBuf,

    /// Directory for chart documents (created if absent)
    #[arg(short, long, env = "TR_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// FORMAT field holding per-allele lengths
    #[arg(long, env = "TR_ALLELE_FIELD", default_value = DEFAULT_ALLELE_FIELD)]
    pub allele_field: String,

    /// Write one debug row per rendered locus to this CSV file
    #[arg(long, env = "TR_DEBUG_CSV")]
    pub debug_csv: Option<PathBuf>,

    /// Chart document format
    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    #[command(flatten)]
    pub plotly: PlotlyOptions,
}
