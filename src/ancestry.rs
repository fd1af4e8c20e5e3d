// ==============================================================================
// ancestry.rs - Pathogenic Allele Aggregation by Population
// ==============================================================================
// Description: Groups allele rows by (disease, gene, population) and computes
//              pathogenic percentages per canonical population group
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::models::{AlleleRecord, AncestryBucket, PathogenicFlag};
use crate::population::PopulationAliases;

type GroupKey = (String, String, String);

/// Aggregated ancestry table, ordered by (disease, gene, population)
#[derive(Debug, Clone, Default)]
pub struct AncestryTable {
    buckets: Vec<AncestryBucket>,
    /// Rows whose pathogenicity value was neither true nor false
    pub unknown_flags: usize,
    /// Rows dropped for a blank disease, gene or population
    pub incomplete_rows: usize,
}

/// Buckets of one (gene, disease) pair, ready for charting
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRows<'a> {
    pub gene: &'a str,
    pub disease: &'a str,
    pub rows: Vec<&'a AncestryBucket>,
}

/// Aggregate allele rows into per-population buckets
///
/// Rows are first grouped by their raw population label, then relabelled
/// through the alias table and summed again so that several raw labels
/// mapping to one canonical group collapse into a single bucket.
/// `Unknown` pathogenicity counts toward `total_count` only. Rows with a
/// blank grouping key are never grouped.
pub fn aggregate(records: &[AlleleRecord], aliases: &PopulationAliases) -> AncestryTable {
    let mut raw_groups: BTreeMap<GroupKey, (u64, u64)> = BTreeMap::new();
    let mut unknown_flags = 0;
    let mut incomplete_rows = 0;

    for record in records {
        if !has_group_key(record) {
            incomplete_rows += 1;
            continue;
        }
        if record.is_pathogenic == PathogenicFlag::Unknown {
            unknown_flags += 1;
        }

        let counts = raw_groups
            .entry((
                record.disease.clone(),
                record.gene.clone(),
                record.population_description.clone(),
            ))
            .or_default();
        if record.is_pathogenic.is_pathogenic() {
            counts.0 += 1;
        }
        counts.1 += 1;
    }
    debug!("{} raw (disease, gene, population) groups", raw_groups.len());

    let mut canonical_groups: BTreeMap<GroupKey, (u64, u64)> = BTreeMap::new();
    for ((disease, gene, population), (pathogenic, total)) in raw_groups {
        let canonical = aliases.canonicalize(&population).to_string();
        let counts = canonical_groups.entry((disease, gene, canonical)).or_default();
        counts.0 += pathogenic;
        counts.1 += total;
    }

    let buckets = canonical_groups
        .into_iter()
        .map(
            |((disease, gene, population), (pathogenic_count, total_count))| AncestryBucket {
                disease,
                gene,
                population,
                pathogenic_count,
                total_count,
            },
        )
        .collect();

    AncestryTable {
        buckets,
        unknown_flags,
        incomplete_rows,
    }
}

fn has_group_key(record: &AlleleRecord) -> bool {
    [&record.disease, &record.gene, &record.population_description]
        .iter()
        .all(|field| !field.trim().is_empty())
}

impl AncestryTable {
    pub fn buckets(&self) -> &[AncestryBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Distinct (gene, disease) pairs, ordered by gene then disease
    pub fn gene_disease_pairs(&self) -> Vec<(&str, &str)> {
        self.buckets
            .iter()
            .map(|b| (b.gene.as_str(), b.disease.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Buckets for one (gene, disease) pair, `None` if there are none
    pub fn select<'a>(&'a self, gene: &'a str, disease: &'a str) -> Option<ChartRows<'a>> {
        let rows: Vec<_> = self
            .buckets
            .iter()
            .filter(|b| b.gene == gene && b.disease == disease)
            .collect();

        if rows.is_empty() {
            None
        } else {
            Some(ChartRows {
                gene,
                disease,
                rows,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(disease: &str, gene: &str, population: &str, flag: &str) -> AlleleRecord {
        AlleleRecord {
            disease: disease.to_string(),
            gene: gene.to_string(),
            population_description: population.to_string(),
            is_pathogenic: PathogenicFlag::from_text(flag),
        }
    }

    #[test]
    fn test_single_population_bucket() {
        let records = vec![
            record("DiseaseX", "GeneY", "Finnish in Finland", "true"),
            record("DiseaseX", "GeneY", "Finnish in Finland", "false"),
        ];
        let table = aggregate(&records, &PopulationAliases::builtin());

        assert_eq!(table.len(), 1);
        let bucket = &table.buckets()[0];
        assert_eq!(bucket.disease, "DiseaseX");
        assert_eq!(bucket.gene, "GeneY");
        assert_eq!(bucket.population, "Finnish");
        assert_eq!(bucket.pathogenic_count, 1);
        assert_eq!(bucket.total_count, 2);
        assert_eq!(bucket.percentage(), Some(50.0));
    }

    #[test]
    fn test_aliases_collapse_groups() {
        let records = vec![
            record("SCA1", "ATXN1", "Han Chinese South, China", "true"),
            record("SCA1", "ATXN1", "Japanese in Tokyo, Japan", "false"),
            record("SCA1", "ATXN1", "Kinh in Ho Chi Minh City, Vietnam", "false"),
            record("SCA1", "ATXN1", "Toscani in Italia", "true"),
        ];
        let table = aggregate(&records, &PopulationAliases::builtin());

        assert_eq!(table.len(), 2);
        let east_asian = &table.buckets()[0];
        assert_eq!(east_asian.population, "East Asian");
        assert_eq!(east_asian.pathogenic_count, 1);
        assert_eq!(east_asian.total_count, 3);
        assert_eq!(table.buckets()[1].population, "European (non Finnish)");
    }

    #[test]
    fn test_unknown_flags_count_toward_total_only() {
        let records = vec![
            record("D", "G", "Esan in Nigeria", "maybe"),
            record("D", "G", "Esan in Nigeria", "TRUE"),
        ];
        let table = aggregate(&records, &PopulationAliases::builtin());

        assert_eq!(table.unknown_flags, 1);
        assert_eq!(table.buckets()[0].pathogenic_count, 1);
        assert_eq!(table.buckets()[0].total_count, 2);
    }

    #[test]
    fn test_blank_keys_are_not_grouped() {
        let records = vec![
            record("DiseaseX", "", "Finnish in Finland", "true"),
            record("DiseaseX", "GeneY", "", "false"),
            record("  ", "GeneY", "Finnish in Finland", "maybe"),
            record("DiseaseX", "GeneY", "Finnish in Finland", "false"),
        ];
        let table = aggregate(&records, &PopulationAliases::builtin());

        assert_eq!(table.incomplete_rows, 3);
        assert_eq!(table.unknown_flags, 0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.buckets()[0].total_count, 1);
        assert_eq!(table.gene_disease_pairs(), vec![("GeneY", "DiseaseX")]);
    }

    #[test]
    fn test_only_blank_keys_yield_empty_table() {
        let records = vec![
            record("DiseaseX", "", "Finnish in Finland", "true"),
            record("DiseaseX", "GeneY", "", "false"),
        ];
        let table = aggregate(&records, &PopulationAliases::builtin());

        assert!(table.is_empty());
        assert_eq!(table.incomplete_rows, 2);
    }

    #[test]
    fn test_pathogenic_never_exceeds_total() {
        let flags = ["true", "false", "TRUE", "", "x", "True"];
        let populations = ["Finnish in Finland", "Esan in Nigeria", "Mende in Sierra Leone"];
        let records: Vec<_> = (0..60)
            .map(|i| record("D", "G", populations[i % 3], flags[i % flags.len()]))
            .collect();

        let table = aggregate(&records, &PopulationAliases::builtin());
        for bucket in table.buckets() {
            assert!(bucket.pathogenic_count <= bucket.total_count);
            assert!(bucket.total_count > 0);
        }
        let total: u64 = table.buckets().iter().map(|b| b.total_count).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_pairs_and_select() {
        let records = vec![
            record("DiseaseB", "GeneA", "Finnish in Finland", "true"),
            record("DiseaseA", "GeneA", "Finnish in Finland", "true"),
            record("DiseaseA", "GeneB", "Esan in Nigeria", "false"),
        ];
        let table = aggregate(&records, &PopulationAliases::builtin());

        assert_eq!(
            table.gene_disease_pairs(),
            vec![("GeneA", "DiseaseA"), ("GeneA", "DiseaseB"), ("GeneB", "DiseaseA")]
        );

        let rows = table.select("GeneB", "DiseaseA").unwrap();
        assert_eq!(rows.rows.len(), 1);
        assert_eq!(rows.rows[0].population, "African/African American");

        assert!(table.select("GeneB", "DiseaseB").is_none());
    }
}
