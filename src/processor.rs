// ==============================================================================
// processor.rs - Pipeline Drivers
// ==============================================================================
// Description: Runs the ancestry and tandem-repeat pipelines end to end
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-18
// Version: 3.0.0
// ==============================================================================

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

use crate::ancestry::{aggregate, AncestryTable};
use crate::charts::{ancestry_chart, repeat_histogram};
use crate::config::{AncestryConfig, TandemRepeatConfig};
use crate::config::PlotlyOptions;
use crate::output::{allele_dist_stem, ancestry_stem, write_csv, OutputFormat, OutputWriter};
use crate::parsers::{AlleleParser, LocusCatalog, VariantReader};
use crate::population::PopulationAliases;
use crate::tandem_repeat::{observe, LocusObservation, RecordOutcome};

/// Summary of one ancestry run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AncestryReport {
    pub rows_read: usize,
    pub unknown_flags: usize,
    pub incomplete_rows: usize,
    pub buckets: usize,
    pub charts: Vec<PathBuf>,
    pub skipped_pairs: usize,
}

/// Summary of one tandem-repeat run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TandemRepeatReport {
    pub records_read: usize,
    pub unmatched: usize,
    pub without_alleles: usize,
    pub invalid: usize,
    pub charts: Vec<PathBuf>,
}

/// Aggregated table row as exported to CSV
#[derive(Debug, Serialize)]
struct AncestrySummaryRow<'a> {
    disease: &'a str,
    gene: &'a str,
    population_description: &'a str,
    pathogenic_count: u64,
    total_count: u64,
    percentage: Option<f64>,
}

/// Per-locus debug row as exported to CSV
#[derive(Debug, Serialize)]
struct LocusDebugRow {
    #[serde(rename = "Chromosome")]
    chromosome: String,
    #[serde(rename = "Position")]
    position: u64,
    #[serde(rename = "Gene")]
    gene: String,
    #[serde(rename = "Disease")]
    disease: String,
    #[serde(rename = "Motif")]
    motif: String,
    #[serde(rename = "Allele lengths")]
    allele_lengths: String,
    #[serde(rename = "Motif length")]
    motif_length: usize,
    #[serde(rename = "Repeat counts")]
    repeat_counts: String,
    #[serde(rename = "Benign min")]
    benign_min: Option<f64>,
    #[serde(rename = "Benign max")]
    benign_max: Option<f64>,
    #[serde(rename = "Pathogenic min")]
    pathogenic_min: Option<f64>,
    #[serde(rename = "Pathogenic max")]
    pathogenic_max: Option<f64>,
    #[serde(rename = "Output file")]
    output_file: String,
    #[serde(rename = "Number of alleles")]
    allele_count: usize,
    #[serde(rename = "Min repeat count")]
    min_repeat_count: u32,
    #[serde(rename = "Max repeat count")]
    max_repeat_count: u32,
    #[serde(rename = "Repeat counts (unique)")]
    distinct_repeat_counts: usize,
}

fn join_values(values: &[u32]) -> String {
    values
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(";")
}

impl LocusDebugRow {
    fn new(observation: &LocusObservation<'_>, output_file: &std::path::Path) -> Self {
        let locus = observation.locus;
        Self {
            chromosome: observation.chrom.clone(),
            position: observation.position,
            gene: locus.gene.clone(),
            disease: locus.disease.clone(),
            motif: observation.motif.clone(),
            allele_lengths: join_values(&observation.allele_lengths),
            motif_length: observation.motif.len(),
            repeat_counts: join_values(&observation.repeat_counts),
            benign_min: locus.benign_min,
            benign_max: locus.benign_max,
            pathogenic_min: locus.pathogenic_min,
            pathogenic_max: locus.pathogenic_max,
            output_file: output_file.display().to_string(),
            allele_count: observation.repeat_counts.len(),
            min_repeat_count: observation.min_repeat_count(),
            max_repeat_count: observation.max_repeat_count(),
            distinct_repeat_counts: observation.distinct_repeat_counts(),
        }
    }
}

/// Chart writer for one run; HTML runs resolve their plotly.js source up front
fn chart_writer(
    output_dir: &std::path::Path,
    format: OutputFormat,
    plotly: &PlotlyOptions,
) -> Result<OutputWriter> {
    let source = plotly.source(format)?;
    let writer = OutputWriter::new(output_dir, format)?;
    Ok(match source {
        Some(source) => writer.with_plotly(source),
        None => writer,
    })
}

/// Ancestry pipeline: CSV -> aggregate -> one bar chart per (gene, disease)
pub struct AncestryProcessor {
    config: AncestryConfig,
}

impl AncestryProcessor {
    pub fn new(config: AncestryConfig) -> Self {
        Self { config }
    }

    pub fn process(&self) -> Result<AncestryReport> {
        let writer = chart_writer(&self.config.output_dir, self.config.format, &self.config.plotly)?;

        info!("Loading allele table: {:?}", self.config.input);
        let records = AlleleParser::parse(&self.config.input)
            .with_context(|| format!("Failed to parse allele table {:?}", self.config.input))?;

        let aliases = match &self.config.population_aliases {
            Some(path) => PopulationAliases::builtin().with_overrides(path)?,
            None => PopulationAliases::builtin(),
        };
        debug!("{} population aliases", aliases.len());

        let table = aggregate(&records, &aliases);
        if table.incomplete_rows > 0 {
            warn!(
                "{} rows have a blank disease, gene or population_description; skipped",
                table.incomplete_rows
            );
        }
        if table.unknown_flags > 0 {
            warn!(
                "{} rows have an unrecognized is_pathogenic value; counted in totals only",
                table.unknown_flags
            );
        }
        info!("Aggregated {} rows into {} buckets", records.len(), table.len());

        if let Some(path) = &self.config.summary_csv {
            write_ancestry_summary(path, &table)?;
            info!("Wrote aggregated table to {:?}", path);
        }

        let mut report = AncestryReport {
            rows_read: records.len(),
            unknown_flags: table.unknown_flags,
            incomplete_rows: table.incomplete_rows,
            buckets: table.len(),
            ..AncestryReport::default()
        };

        for (gene, disease) in table.gene_disease_pairs() {
            let Some(rows) = table.select(gene, disease) else {
                info!("No data available for gene: {} and disease: {}", gene, disease);
                report.skipped_pairs += 1;
                continue;
            };

            let figure = ancestry_chart(&rows);
            let path = writer.write_figure(&ancestry_stem(gene, disease), &figure)?;
            report.charts.push(path);
        }

        info!(
            "Saved {} plots in {:?}",
            report.charts.len(),
            writer.output_dir()
        );
        Ok(report)
    }
}

fn write_ancestry_summary(path: &std::path::Path, table: &AncestryTable) -> Result<()> {
    let rows: Vec<_> = table
        .buckets()
        .iter()
        .map(|bucket| AncestrySummaryRow {
            disease: &bucket.disease,
            gene: &bucket.gene,
            population_description: &bucket.population,
            pathogenic_count: bucket.pathogenic_count,
            total_count: bucket.total_count,
            percentage: bucket.percentage(),
        })
        .collect();

    write_csv(path, &rows).with_context(|| format!("Failed to write summary {:?}", path))
}

/// Tandem-repeat pipeline: VCF + catalog -> one histogram per matched locus/position
pub struct TandemRepeatProcessor {
    config: TandemRepeatConfig,
}

impl TandemRepeatProcessor {
    pub fn new(config: TandemRepeatConfig) -> Self {
        Self { config }
    }

    pub fn process(&self) -> Result<TandemRepeatReport> {
        let catalog = LocusCatalog::load(&self.config.catalog)
            .with_context(|| format!("Failed to load locus catalog {:?}", self.config.catalog))?;

        info!("Streaming VCF: {:?}", self.config.vcf);
        let reader = VariantReader::open(&self.config.vcf, &self.config.allele_field)?;
        let writer = chart_writer(&self.config.output_dir, self.config.format, &self.config.plotly)?;

        let mut report = TandemRepeatReport::default();
        let mut debug_rows = Vec::new();

        for result in reader {
            let record = result.context("Failed to read VCF record")?;
            report.records_read += 1;

            match observe(&catalog, &record) {
                Ok(RecordOutcome::Unmatched) => {
                    info!("Skipped: {}:{} - no matching locus in catalog", record.chrom, record.position);
                    report.unmatched += 1;
                }
                Ok(RecordOutcome::NoAlleles { locus }) => {
                    debug!("No allele lengths at {}:{} ({})", record.chrom, record.position, locus.gene);
                    report.without_alleles += 1;
                }
                Ok(RecordOutcome::Observed(observation)) => {
                    let stem = allele_dist_stem(&observation.locus.gene, &observation.chrom, observation.position);
                    let path = writer.write_figure(&stem, &repeat_histogram(&observation))?;
                    if self.config.debug_csv.is_some() {
                        debug_rows.push(LocusDebugRow::new(&observation, &path));
                    }
                    report.charts.push(path);
                }
                Err(e) => {
                    error!("Skipped: {}:{} - {}", record.chrom, record.position, e);
                    report.invalid += 1;
                }
            }
        }

        if let Some(path) = &self.config.debug_csv {
            write_csv(path, &debug_rows)
                .with_context(|| format!("Failed to write debug table {:?}", path))?;
            info!("Wrote {} debug rows to {:?}", debug_rows.len(), path);
        }

        info!(
            "Processed {} records: {} charts, {} unmatched, {} without alleles, {} invalid",
            report.records_read,
            report.charts.len(),
            report.unmatched,
            report.without_alleles,
            report.invalid
        );
        info!("Saved plots in {:?}", writer.output_dir());
        Ok(report)
    }
}
