// ==============================================================================
// alleles.rs - Allele/Population Table Parser
// ==============================================================================
// Description: Parser for per-allele population tables used by ancestry plots
// Author: Matt Barham
// Created: 2025-11-06
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================
// Format: CSV file with header (extra columns are ignored)
// Example:
//   disease,gene,population_description,is_pathogenic
//   DiseaseX,GeneY,Finnish in Finland,True
//   DiseaseX,GeneY,Finnish in Finland,False
// ==============================================================================

use csv::ReaderBuilder;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::models::{AlleleRecord, PathogenicFlag};

/// Raw CSV row before the pathogenicity column is normalized
#[derive(Debug, Deserialize)]
struct RawAlleleRow {
    disease: String,
    gene: String,
    population_description: String,
    #[serde(default)]
    is_pathogenic: Option<String>,
}

/// Errors that can occur during allele table parsing
#[derive(Error, Debug)]
pub enum AlleleParseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

const REQUIRED_COLUMNS: [&str; 4] = ["disease", "gene", "population_description", "is_pathogenic"];

/// Allele table parser
pub struct AlleleParser;

impl AlleleParser {
    /// Parse an allele table from a CSV file
    ///
    /// # Returns
    /// * `Ok(Vec<AlleleRecord>)` - Rows in file order
    /// * `Err(AlleleParseError)` - IO, CSV or schema error
    pub fn parse(path: impl AsRef<Path>) -> Result<Vec<AlleleRecord>, AlleleParseError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::parse_reader(file)
    }

    /// Parse an allele table from any reader
    pub fn parse_reader<R: Read>(reader: R) -> Result<Vec<AlleleRecord>, AlleleParseError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(AlleleParseError::MissingColumn(column.to_string()));
            }
        }

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let row: RawAlleleRow = result?;
            let is_pathogenic = row
                .is_pathogenic
                .as_deref()
                .map(PathogenicFlag::from_text)
                .unwrap_or(PathogenicFlag::Unknown);

            records.push(AlleleRecord {
                disease: row.disease,
                gene: row.gene,
                population_description: row.population_description,
                is_pathogenic,
            });
        }

        Ok(records)
    }
}
