// ==============================================================================
// tandem_repeat.rs - Locus Matching and Repeat-Count Extraction
// ==============================================================================
// Description: Matches VCF records to catalog loci and converts allele lengths
//              into motif repeat counts
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

use crate::models::{LocusDefinition, VariantRecord};
use crate::parsers::LocusCatalog;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TandemRepeatError {
    #[error("Locus {gene} ({chrom}:{start}-{stop}) has an empty reference motif")]
    EmptyMotif {
        gene: String,
        chrom: String,
        start: u64,
        stop: u64,
    },
}

/// Result of processing one VCF record against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome<'a> {
    /// No catalog locus contains the record position
    Unmatched,
    /// Matched, but no sample carried a usable allele length
    NoAlleles { locus: &'a LocusDefinition },
    Observed(LocusObservation<'a>),
}

/// Repeat counts observed at one matched locus/position
#[derive(Debug, Clone, PartialEq)]
pub struct LocusObservation<'a> {
    pub locus: &'a LocusDefinition,
    pub chrom: String,
    pub position: u64,
    pub motif: String,
    pub allele_lengths: Vec<u32>,
    /// Never empty
    pub repeat_counts: Vec<u32>,
}

/// First catalog locus (in catalog order) containing the position
pub fn match_locus<'a>(
    catalog: &'a LocusCatalog,
    chrom: &str,
    position: u64,
) -> Option<&'a LocusDefinition> {
    catalog.iter().find(|locus| locus.contains(chrom, position))
}

/// Resolved motif and its length; an empty motif is a data error
pub fn resolve_motif(locus: &LocusDefinition) -> Result<(String, usize), TandemRepeatError> {
    let motif = locus.motif.resolve();
    if motif.is_empty() {
        return Err(TandemRepeatError::EmptyMotif {
            gene: locus.gene.clone(),
            chrom: locus.chrom.clone(),
            start: locus.start_hg38,
            stop: locus.stop_hg38,
        });
    }
    let length = motif.len();
    Ok((motif, length))
}

/// Non-missing allele lengths of all samples, in sample order
///
/// Negative lengths are treated like missing values.
pub fn collect_allele_lengths(record: &VariantRecord) -> Vec<u32> {
    record
        .allele_lengths
        .iter()
        .flatten()
        .filter_map(|length| length.and_then(|l| u32::try_from(l).ok()))
        .collect()
}

/// Repeat count of one allele: floor(allele_length / motif_length)
pub fn repeat_count(allele_length: u32, motif_length: usize) -> u32 {
    (allele_length as usize / motif_length) as u32
}

/// Match a record and derive its repeat counts
pub fn observe<'a>(
    catalog: &'a LocusCatalog,
    record: &VariantRecord,
) -> Result<RecordOutcome<'a>, TandemRepeatError> {
    let Some(locus) = match_locus(catalog, &record.chrom, record.position) else {
        return Ok(RecordOutcome::Unmatched);
    };

    let (motif, motif_length) = resolve_motif(locus)?;
    let allele_lengths = collect_allele_lengths(record);
    let repeat_counts: Vec<u32> = allele_lengths
        .iter()
        .map(|&length| repeat_count(length, motif_length))
        .collect();

    if repeat_counts.is_empty() {
        return Ok(RecordOutcome::NoAlleles { locus });
    }

    Ok(RecordOutcome::Observed(LocusObservation {
        locus,
        chrom: record.chrom.clone(),
        position: record.position,
        motif,
        allele_lengths,
        repeat_counts,
    }))
}

impl LocusObservation<'_> {
    pub fn min_repeat_count(&self) -> u32 {
        self.repeat_counts.iter().copied().min().unwrap_or_default()
    }

    pub fn max_repeat_count(&self) -> u32 {
        self.repeat_counts.iter().copied().max().unwrap_or_default()
    }

    pub fn distinct_repeat_counts(&self) -> usize {
        self.repeat_counts.iter().collect::<BTreeSet<_>>().len()
    }

    /// Allele count per repeat count, one unit-wide bin from min to max
    pub fn bins(&self) -> Vec<(u32, usize)> {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for &count in &self.repeat_counts {
            *counts.entry(count).or_default() += 1;
        }

        (self.min_repeat_count()..=self.max_repeat_count())
            .map(|bin| (bin, counts.get(&bin).copied().unwrap_or(0)))
            .collect()
    }
}
