// ==============================================================================
// catalog.rs - Tandem-Repeat Locus Catalog Parser
// ==============================================================================
// Description: Loads the JSON locus catalog (STRchive-style) used for matching
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================
// Format: JSON array of locus objects
// Example:
//   [{"chrom": "chr4", "start_hg38": 3074876, "stop_hg38": 3074933,
//     "reference_motif_reference_orientation": ["CAG"], "gene": "HTT",
//     "disease": "Huntington disease", "benign_min": 6, "benign_max": 26,
//     "pathogenic_min": 40, "pathogenic_max": null}]
// ==============================================================================

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::LocusDefinition;
use crate::validator::validate_locus;

/// Errors that can occur while loading the locus catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to open catalog {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog contains no loci")]
    Empty,
}

/// Immutable, ordered collection of locus definitions
#[derive(Debug, Clone)]
pub struct LocusCatalog {
    loci: Vec<LocusDefinition>,
}

impl LocusCatalog {
    /// Load the catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CatalogError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!("Loaded {} loci from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let loci: Vec<LocusDefinition> = serde_json::from_reader(reader)?;
        Self::new(loci)
    }

    pub fn new(loci: Vec<LocusDefinition>) -> Result<Self, CatalogError> {
        if loci.is_empty() {
            return Err(CatalogError::Empty);
        }

        for locus in &loci {
            if let Err(problem) = validate_locus(locus) {
                warn!(
                    "Catalog entry {}:{}-{} ({}): {}",
                    locus.chrom, locus.start_hg38, locus.stop_hg38, locus.gene, problem
                );
            }
        }

        let catalog = Self { loci };
        for (first, second) in catalog.overlapping_pairs() {
            warn!(
                "Loci {} and {} overlap on {}; the earlier entry wins",
                first.gene, second.gene, first.chrom
            );
        }

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocusDefinition> {
        self.loci.iter()
    }

    /// Pairs of entries on the same chromosome whose intervals intersect
    fn overlapping_pairs(&self) -> Vec<(&LocusDefinition, &LocusDefinition)> {
        let mut pairs = Vec::new();
        for (i, first) in self.loci.iter().enumerate() {
            for second in &self.loci[i + 1..] {
                if first.chrom == second.chrom
                    && first.start_hg38 <= second.stop_hg38
                    && second.start_hg38 <= first.stop_hg38
                {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }
}
