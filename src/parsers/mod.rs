// ==============================================================================
// parsers/mod.rs - File parser modules
// ==============================================================================
// Description: Parsers for allele tables, locus catalogs and tandem-repeat VCFs
// Author: Matt Barham
// Created: 2025-11-03
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================

pub mod alleles;
pub mod catalog;
pub mod vcf;

pub use alleles::{AlleleParseError, AlleleParser};
pub use catalog::{CatalogError, LocusCatalog};
pub use vcf::{VCFParseError, VariantReader, DEFAULT_ALLELE_FIELD};
