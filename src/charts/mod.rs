// ==============================================================================
// charts/mod.rs - Chart builders
// ==============================================================================
// Description: Plotly figure model plus ancestry and tandem-repeat chart builders
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

pub mod ancestry;
pub mod figure;
pub mod histogram;

pub use ancestry::{ancestry_chart, display_percentage};
pub use figure::Figure;
pub use histogram::repeat_histogram;

/// Title-case a label: first letter of every alphabetic run upper-cased, rest lower-cased
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_alphabetic {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(c);
            previous_alphabetic = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("chr1"), "Chr1");
        assert_eq!(title_case("chrX"), "Chrx");
        assert_eq!(title_case("huntington disease"), "Huntington Disease");
        assert_eq!(title_case("X-linked ataxia"), "X-Linked Ataxia");
        assert_eq!(title_case("SCA1"), "Sca1");
    }
}
