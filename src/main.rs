// ==============================================================================
// main.rs - Genetics Plots Entry Point
// ==============================================================================
// Description: Command-line entry point for the ancestry and tandem-repeat
//              chart pipelines
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use genetics_plots::config::{AncestryConfig, TandemRepeatConfig};
use genetics_plots::processor::{AncestryProcessor, TandemRepeatProcessor};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pathogenic genotype percentage per population, one chart per gene/disease
    Ancestry(AncestryConfig),
    /// Repeat-count histograms, one chart per matched tandem-repeat locus
    TandemRepeats(TandemRepeatConfig),
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "genetics_plots=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args = Args::parse();

    match args.command {
        Command::Ancestry(config) => {
            info!("Generating ancestry plots");
            let report = AncestryProcessor::new(config).process()?;
            info!(
                "Ancestry complete: {} rows, {} buckets, {} charts",
                report.rows_read,
                report.buckets,
                report.charts.len()
            );
        }
        Command::TandemRepeats(config) => {
            info!("Generating tandem repeat plots");
            let report = TandemRepeatProcessor::new(config).process()?;
            info!(
                "Tandem repeats complete: {} records, {} charts",
                report.records_read,
                report.charts.len()
            );
        }
    }

    Ok(())
}
