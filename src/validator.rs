// ==============================================================================
// validator.rs - Input Validation
// ==============================================================================
// Description: Catalog entry checks and output file-name sanitization
// Author: Matt Barham
// Created: 2025-10-31
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================

use crate::models::{LocusDefinition, RepeatRange};

/// Replace path separators in one file-name component
///
/// Gene and disease names such as "C9orf72/ALS" would otherwise create
/// nested directories.
pub fn sanitize_component(component: &str) -> String {
    component.replace(['/', '\\'], "_")
}

/// Check a catalog entry for problems that make its charts meaningless
///
/// Returns a description of the first problem found.
pub fn validate_locus(locus: &LocusDefinition) -> Result<(), String> {
    if locus.chrom.trim().is_empty() {
        return Err("empty chromosome".to_string());
    }

    if locus.start_hg38 > locus.stop_hg38 {
        return Err(format!(
            "start {} is after stop {}",
            locus.start_hg38, locus.stop_hg38
        ));
    }

    if locus.motif.resolve().is_empty() {
        return Err("empty reference motif".to_string());
    }

    for (name, range) in [
        ("benign", locus.benign_range()),
        ("pathogenic", locus.pathogenic_range()),
    ] {
        if let Some(RepeatRange { min, max }) = range {
            if min > max {
                return Err(format!("{} range min {} exceeds max {}", name, min, max));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Motif;

    fn locus() -> LocusDefinition {
        LocusDefinition {
            chrom: "chr9".to_string(),
            start_hg38: 27573528,
            stop_hg38: 27573546,
            motif: Motif::Fragments(vec!["GGGGCC".to_string()]),
            gene: "C9orf72".to_string(),
            disease: "FTD/ALS".to_string(),
            benign_min: Some(2.0),
            benign_max: Some(20.0),
            pathogenic_min: Some(30.0),
            pathogenic_max: None,
        }
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("FTD/ALS"), "FTD_ALS");
        assert_eq!(sanitize_component("a\\b/c"), "a_b_c");
        assert_eq!(sanitize_component("Huntington disease"), "Huntington disease");
    }

    #[test]
    fn test_valid_locus() {
        assert!(validate_locus(&locus()).is_ok());
    }

    #[test]
    fn test_invalid_loci() {
        let mut reversed = locus();
        reversed.start_hg38 = reversed.stop_hg38 + 1;
        assert!(validate_locus(&reversed).unwrap_err().contains("after stop"));

        let mut no_motif = locus();
        no_motif.motif = Motif::Fragments(vec![]);
        assert_eq!(validate_locus(&no_motif).unwrap_err(), "empty reference motif");

        let mut bad_range = locus();
        bad_range.benign_min = Some(50.0);
        assert!(validate_locus(&bad_range).unwrap_err().starts_with("benign range"));
    }
}
