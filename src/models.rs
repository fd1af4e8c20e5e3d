// ==============================================================================
// models.rs - Ancestry and Tandem-Repeat Data Models
// ==============================================================================
// Description: Typed records shared by the ancestry and tandem-repeat pipelines
// Author: Matt Barham
// Created: 2025-11-12
// Modified: 2026-10-18
// Version: 3.0.0
// ==============================================================================

use serde::{Deserialize, Deserializer, Serialize};

/// Pathogenicity of a single allele as recorded in the input table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathogenicFlag {
    Pathogenic,
    Benign,
    /// Value was neither "true" nor "false" (case-insensitive)
    Unknown,
}

impl PathogenicFlag {
    /// Parse boolean-like text; anything outside true/false maps to `Unknown`
    pub fn from_text(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "true" => PathogenicFlag::Pathogenic,
            "false" => PathogenicFlag::Benign,
            _ => PathogenicFlag::Unknown,
        }
    }

    pub fn is_pathogenic(&self) -> bool {
        matches!(self, PathogenicFlag::Pathogenic)
    }
}

/// One allele row of the ancestry input table
#[derive(Debug, Clone, PartialEq)]
pub struct AlleleRecord {
    pub disease: String,
    pub gene: String,
    /// Raw population label (e.g., "Finnish in Finland")
    pub population_description: String,
    pub is_pathogenic: PathogenicFlag,
}

/// Aggregated pathogenic/total counts for one (disease, gene, population) key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncestryBucket {
    pub disease: String,
    pub gene: String,
    /// Canonical population label after alias mapping
    pub population: String,
    pub pathogenic_count: u64,
    pub total_count: u64,
}

impl AncestryBucket {
    /// Percentage of pathogenic alleles, `None` when the bucket is empty
    pub fn percentage(&self) -> Option<f64> {
        if self.total_count == 0 {
            None
        } else {
            Some(self.pathogenic_count as f64 / self.total_count as f64 * 100.0)
        }
    }
}

/// Reference motif, given either as one sequence or as fragments to concatenate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Motif {
    Sequence(String),
    Fragments(Vec<String>),
}

impl Motif {
    pub fn resolve(&self) -> String {
        match self {
            Motif::Sequence(seq) => seq.clone(),
            Motif::Fragments(parts) => parts.concat(),
        }
    }
}

impl Default for Motif {
    fn default() -> Self {
        Motif::Sequence(String::new())
    }
}

/// Inclusive repeat-count range (benign or pathogenic)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepeatRange {
    pub min: f64,
    pub max: f64,
}

impl RepeatRange {
    /// Build a range only when both bounds are present
    pub fn from_bounds(min: Option<f64>, max: Option<f64>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Some(Self { min, max }),
            _ => None,
        }
    }

    pub fn is_point(&self) -> bool {
        self.min == self.max
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}

/// Tandem-repeat locus as described by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocusDefinition {
    pub chrom: String,
    /// Inclusive start coordinate (GRCh38)
    pub start_hg38: u64,
    /// Inclusive stop coordinate (GRCh38)
    pub stop_hg38: u64,
    #[serde(rename = "reference_motif_reference_orientation", default)]
    pub motif: Motif,
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub gene: String,
    #[serde(default = "unknown", deserialize_with = "string_or_unknown")]
    pub disease: String,
    #[serde(default)]
    pub benign_min: Option<f64>,
    #[serde(default)]
    pub benign_max: Option<f64>,
    #[serde(default)]
    pub pathogenic_min: Option<f64>,
    #[serde(default)]
    pub pathogenic_max: Option<f64>,
}

fn unknown() -> String {
    "Unknown".to_string()
}

/// Explicit `null` reads the same as an absent key
fn string_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown))
}

impl LocusDefinition {
    pub fn contains(&self, chrom: &str, position: u64) -> bool {
        self.chrom == chrom && (self.start_hg38..=self.stop_hg38).contains(&position)
    }

    pub fn benign_range(&self) -> Option<RepeatRange> {
        RepeatRange::from_bounds(self.benign_min, self.benign_max)
    }

    pub fn pathogenic_range(&self) -> Option<RepeatRange> {
        RepeatRange::from_bounds(self.pathogenic_min, self.pathogenic_max)
    }
}

/// Variant read from the tandem-repeat VCF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub chrom: String,
    /// 1-based position
    pub position: u64,
    /// Allele lengths per sample; `None` entries are missing values
    pub allele_lengths: Vec<Vec<Option<i32>>>,
}
