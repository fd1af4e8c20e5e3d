// ==============================================================================
// charts/ancestry.rs - Pathogenic Genotype Bar Chart
// ==============================================================================
// Description: Horizontal bar chart of pathogenic percentage per population
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use serde_json::{json, Value};
use tracing::warn;

use super::figure::{Axis, BarTrace, Figure, Layout, Title};
use crate::ancestry::ChartRows;

const HOVER_TEMPLATE: &str = "Population: %{y}<br>\
Pathogenic Genotype (%): %{x}<br>\
# Pathogenic: %{customdata[0]}<br>\
# Total: %{customdata[1]}<extra></extra>";

/// Number shown next to a bar: rounded to one decimal, or integer `0` when it
/// rounds to zero
pub fn display_percentage(percentage: f64) -> Value {
    let rounded = (percentage * 10.0).round() / 10.0;
    if rounded == 0.0 {
        json!(0)
    } else {
        json!(rounded)
    }
}

/// Build the bar chart for one (gene, disease) pair
pub fn ancestry_chart(rows: &ChartRows<'_>) -> Figure {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut text = Vec::new();
    let mut customdata = Vec::new();

    for bucket in &rows.rows {
        let Some(percentage) = bucket.percentage() else {
            warn!(
                "Skipping empty bucket {} for gene: {} and disease: {}",
                bucket.population, rows.gene, rows.disease
            );
            continue;
        };
        x.push(json!(percentage));
        y.push(json!(bucket.population));
        text.push(display_percentage(percentage));
        customdata.push(vec![json!(bucket.pathogenic_count), json!(bucket.total_count)]);
    }

    let mut trace = BarTrace::new(x, y, HOVER_TEMPLATE, "blue");
    trace.orientation = Some("h".to_string());
    trace.text = Some(text);
    trace.texttemplate = Some("%{text}".to_string());
    trace.textposition = Some("outside".to_string());
    trace.cliponaxis = Some(false);
    trace.customdata = Some(customdata);

    let title = format!(
        "Pathogenic Genotype Distribution<br><sup>{} - {}</sup>",
        rows.gene, rows.disease
    );
    let mut layout = Layout::standard(title, 0.5);
    layout.xaxis = Axis {
        title: Some(Title::plain("Pathogenic Genotypes (%)")),
        range: Some([0.0, 100.0]),
        showline: Some(true),
        linecolor: Some("black".to_string()),
        ..Axis::default()
    };
    layout.yaxis = Axis {
        title: Some(Title::plain("")),
        ticks: Some("outside".to_string()),
        showline: Some(true),
        linecolor: Some("black".to_string()),
        ..Axis::default()
    };

    Figure {
        data: vec![trace],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ancestry::aggregate;
    use crate::models::{AlleleRecord, PathogenicFlag};
    use crate::population::PopulationAliases;

    fn records() -> Vec<AlleleRecord> {
        [
            ("Finnish in Finland", true),
            ("Finnish in Finland", false),
            ("Esan in Nigeria", false),
            ("Esan in Nigeria", false),
            ("Esan in Nigeria", true),
        ]
        .iter()
        .map(|(population, pathogenic)| AlleleRecord {
            disease: "DiseaseX".to_string(),
            gene: "GeneY".to_string(),
            population_description: population.to_string(),
            is_pathogenic: if *pathogenic {
                PathogenicFlag::Pathogenic
            } else {
                PathogenicFlag::Benign
            },
        })
        .collect()
    }

    #[test]
    fn test_display_percentage() {
        assert_eq!(display_percentage(0.0), json!(0));
        assert_eq!(display_percentage(0.04), json!(0));
        assert_eq!(display_percentage(50.0), json!(50.0));
        assert_eq!(display_percentage(33.333), json!(33.3));
        assert_eq!(display_percentage(100.0), json!(100.0));

        // numeric, so plotly formats it instead of printing a padded string
        assert!(display_percentage(0.04).is_u64());
        assert!(display_percentage(33.333).is_f64());
    }

    #[test]
    fn test_ancestry_chart_content() {
        let table = aggregate(&records(), &PopulationAliases::builtin());
        let rows = table.select("GeneY", "DiseaseX").unwrap();
        let figure = ancestry_chart(&rows);

        let trace = &figure.data[0];
        assert_eq!(trace.orientation.as_deref(), Some("h"));
        assert_eq!(trace.y, vec![json!("African/African American"), json!("Finnish")]);
        assert_eq!(trace.x[1], json!(50.0));
        assert_eq!(
            trace.text.as_ref().unwrap(),
            &vec![json!(33.3), json!(50.0)]
        );
        assert_eq!(
            trace.customdata.as_ref().unwrap()[0],
            vec![json!(1), json!(3)]
        );
        assert!(trace.hovertemplate.contains("# Total: %{customdata[1]}"));
        assert_eq!(
            figure.layout.title.text,
            "Pathogenic Genotype Distribution<br><sup>GeneY - DiseaseX</sup>"
        );
        assert_eq!(figure.layout.xaxis.range, Some([0.0, 100.0]));
    }

    #[test]
    fn test_ancestry_chart_is_deterministic() {
        let table = aggregate(&records(), &PopulationAliases::builtin());
        let rows = table.select("GeneY", "DiseaseX").unwrap();

        assert_eq!(ancestry_chart(&rows), ancestry_chart(&rows));
    }
}
