// ==============================================================================
// population.rs - Population Label Canonicalization
// ==============================================================================
// Description: Maps 1000 Genomes population descriptions to continental groups
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

/// Built-in raw label -> canonical group table
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("Unknown", "Unknown"),
    ("Finnish in Finland", "Finnish"),
    ("Han Chinese South, China", "East Asian"),
    ("Puerto Rican in Puerto Rico", "Admixed American"),
    ("Colombian in Medellin, Colombia", "Admixed American"),
    ("African Caribbean in Barbados", "African/African American"),
    ("Peruvian in Lima, Peru", "Admixed American"),
    ("Kinh in Ho Chi Minh City, Vietnam", "East Asian"),
    ("Gambian in Western Division Ð Mandinka", "African/African American"),
    ("Punjabi in Lahore, Pakistan", "South Asian"),
    ("Esan in Nigeria", "African/African American"),
    ("Mende in Sierra Leone", "African/African American"),
    ("Sri Lankan Tamil in the UK", "South Asian"),
    ("Bengali in Bangladesh", "South Asian"),
    ("Han Chinese in Beijing, China", "East Asian"),
    ("Japanese in Tokyo, Japan", "East Asian"),
    ("Luhya in Webuye, Kenya", "African/African American"),
    ("Toscani in Italia", "European (non Finnish)"),
];

/// Population alias table; unmapped labels pass through unchanged
#[derive(Debug, Clone)]
pub struct PopulationAliases {
    aliases: HashMap<String, String>,
}

impl Default for PopulationAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PopulationAliases {
    pub fn builtin() -> Self {
        Self {
            aliases: BUILTIN_ALIASES
                .iter()
                .map(|(raw, canonical)| (raw.to_string(), canonical.to_string()))
                .collect(),
        }
    }

    /// Extend (or override) the table with `raw,canonical` rows from a CSV file
    pub fn with_overrides(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .with_context(|| format!("Failed to open population alias file {}", path.display()))?;

        for result in reader.deserialize() {
            let (raw, canonical): (String, String) =
                result.context("Failed to parse population alias row")?;
            self.aliases.insert(raw, canonical);
        }

        Ok(self)
    }

    /// Canonical label for a raw population description
    pub fn canonicalize<'a>(&'a self, raw: &'a str) -> &'a str {
        self.aliases.get(raw).map(String::as_str).unwrap_or(raw)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}
