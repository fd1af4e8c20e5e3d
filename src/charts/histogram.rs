// ==============================================================================
// charts/histogram.rs - Allele Size Distribution Histogram
// ==============================================================================
// Description: Repeat-count histogram with benign/pathogenic range annotations
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use serde_json::json;

use super::figure::{Annotation, Axis, BarTrace, Figure, Layout, Shape, Title, CHART_WIDTH_PX};
use super::title_case;
use crate::labels::LabelPlacer;
use crate::models::RepeatRange;
use crate::tandem_repeat::LocusObservation;

const HOVER_TEMPLATE: &str = "Repeat Count=%{x}<br>Allele Count=%{y}<extra></extra>";

/// Space added to the right of the largest repeat count or range bound
pub const X_AXIS_MARGIN: f64 = 10.0;

/// Label ids double as annotation text after capitalization
const BENIGN_LABEL: &str = "normal";
const PATHOGENIC_LABEL: &str = "pathogenic";

fn styled_axis(title: &str) -> Axis {
    Axis {
        title: Some(Title::plain(title)),
        showline: Some(true),
        linecolor: Some("black".to_string()),
        linewidth: Some(1),
        ticks: Some("outside".to_string()),
        ticklen: Some(6),
        tickwidth: Some(1),
        tickcolor: Some("black".to_string()),
        zeroline: Some(false),
        ..Axis::default()
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Upper x-axis bound: largest of observed counts and present range bounds, plus margin
pub fn x_axis_upper(observation: &LocusObservation<'_>) -> f64 {
    let locus = observation.locus;
    [
        locus.benign_min,
        locus.benign_max,
        locus.pathogenic_min,
        locus.pathogenic_max,
    ]
    .iter()
    .map(|bound| bound.unwrap_or(0.0))
    .fold(observation.max_repeat_count() as f64, f64::max)
        + X_AXIS_MARGIN
}

/// Draw one range: dotted full-height marker for a single value, otherwise a
/// horizontal segment; the label goes above either
fn add_range(layout: &mut Layout, placer: &mut LabelPlacer, label_id: &str, range: &RepeatRange) {
    let placement = placer.place(label_id, range);

    layout
        .annotations
        .push(Annotation::label(placement.x_center, placement.label_y, &capitalize(label_id)));

    let shape = if range.is_point() {
        Shape::line(range.min, range.min, 0.0, 1.0, Some("dot"))
    } else {
        Shape::line(range.min, range.max, placement.line_y, placement.line_y, None)
    };
    layout.shapes.push(shape);
}

/// Build the allele size histogram for one matched locus/position
pub fn repeat_histogram(observation: &LocusObservation<'_>) -> Figure {
    let locus = observation.locus;
    let bins = observation.bins();

    let trace = BarTrace::new(
        bins.iter().map(|(count, _)| json!(count)).collect(),
        bins.iter().map(|(_, alleles)| json!(alleles)).collect(),
        HOVER_TEMPLATE,
        "#636efa",
    );

    let title = format!(
        "Allele Size Distribution<br><sup>{} - {} | {} - {}</sup>",
        title_case(&observation.chrom),
        observation.position,
        locus.gene,
        title_case(&locus.disease)
    );
    let mut layout = Layout::standard(title, 0.7);

    let x_upper = x_axis_upper(observation);
    layout.xaxis = Axis {
        range: Some([0.0, x_upper]),
        ..styled_axis("Repeat Count")
    };
    layout.yaxis = styled_axis("Allele Count");

    let mut placer = LabelPlacer::new(CHART_WIDTH_PX as f64, x_upper);
    if let Some(range) = locus.benign_range() {
        add_range(&mut layout, &mut placer, BENIGN_LABEL, &range);
    }
    if let Some(range) = locus.pathogenic_range() {
        add_range(&mut layout, &mut placer, PATHOGENIC_LABEL, &range);
    }

    Figure {
        data: vec![trace],
        layout,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LocusDefinition, Motif};

    fn locus(benign: (Option<f64>, Option<f64>), pathogenic: (Option<f64>, Option<f64>)) -> LocusDefinition {
        LocusDefinition {
            chrom: "chr4".to_string(),
            start_hg38: 3074876,
            stop_hg38: 3074933,
            motif: Motif::Sequence("CAG".to_string()),
            gene: "HTT".to_string(),
            disease: "huntington disease".to_string(),
            benign_min: benign.0,
            benign_max: benign.1,
            pathogenic_min: pathogenic.0,
            pathogenic_max: pathogenic.1,
        }
    }

    fn observation(locus: &LocusDefinition, repeat_counts: Vec<u32>) -> LocusObservation<'_> {
        LocusObservation {
            locus,
            chrom: "chr4".to_string(),
            position: 3074877,
            motif: "CAG".to_string(),
            allele_lengths: repeat_counts.iter().map(|c| c * 3).collect(),
            repeat_counts,
        }
    }

    #[test]
    fn test_histogram_bins_and_title() {
        let locus = locus((None, None), (None, None));
        let figure = repeat_histogram(&observation(&locus, vec![17, 19, 19]));

        let trace = &figure.data[0];
        assert_eq!(trace.x, vec![json!(17), json!(18), json!(19)]);
        assert_eq!(trace.y, vec![json!(1), json!(0), json!(2)]);
        assert_eq!(trace.hovertemplate, HOVER_TEMPLATE);
        assert_eq!(
            figure.layout.title.text,
            "Allele Size Distribution<br><sup>Chr4 - 3074877 | HTT - Huntington Disease</sup>"
        );
        assert_eq!(figure.layout.xaxis.range, Some([0.0, 29.0]));
        assert!(figure.layout.shapes.is_empty());
        assert!(figure.layout.annotations.is_empty());
    }

    #[test]
    fn test_axis_covers_range_bounds() {
        let locus = locus((Some(6.0), Some(26.0)), (Some(40.0), Some(120.0)));
        let obs = observation(&locus, vec![17, 19]);
        assert_eq!(x_axis_upper(&obs), 130.0);
    }

    #[test]
    fn test_range_annotations() {
        let locus = locus((Some(6.0), Some(26.0)), (Some(40.0), Some(40.0)));
        let figure = repeat_histogram(&observation(&locus, vec![17, 19]));
        let layout = &figure.layout;

        assert_eq!(layout.annotations.len(), 2);
        assert_eq!(layout.annotations[0].text, "Normal");
        assert_eq!(layout.annotations[0].x, 16.0);
        assert_eq!(layout.annotations[1].text, "Pathogenic");

        // benign range is a horizontal segment above the plot
        assert_eq!(layout.shapes[0].x0, 6.0);
        assert_eq!(layout.shapes[0].x1, 26.0);
        assert_eq!(layout.shapes[0].y0, layout.shapes[0].y1);
        assert!(layout.shapes[0].line.dash.is_none());

        // single-value pathogenic range is a dotted full-height marker
        assert_eq!(layout.shapes[1].x0, 40.0);
        assert_eq!((layout.shapes[1].y0, layout.shapes[1].y1), (0.0, 1.0));
        assert_eq!(layout.shapes[1].line.dash.as_deref(), Some("dot"));
    }

    #[test]
    fn test_overlapping_labels_are_stacked() {
        // x span 10 + 50 = 60 units over 900 px -> 15 px per unit; centers 2 units apart
        let locus = locus((Some(10.0), Some(14.0)), (Some(14.0), Some(14.0)));
        let figure = repeat_histogram(&observation(&locus, vec![50]));
        let annotations = &figure.layout.annotations;

        assert!(annotations[1].y > annotations[0].y);
    }

    #[test]
    fn test_partial_range_is_not_drawn() {
        let locus = locus((Some(6.0), None), (Some(40.0), None));
        let figure = repeat_histogram(&observation(&locus, vec![20]));

        assert!(figure.layout.shapes.is_empty());
        assert_eq!(figure.layout.xaxis.range, Some([0.0, 50.0]));
    }

    #[test]
    fn test_bar_spacing_comes_from_bargap() {
        let locus = locus((None, None), (None, None));
        let figure = repeat_histogram(&observation(&locus, vec![17, 19]));
        let value = serde_json::to_value(&figure).unwrap();

        assert!(value["data"][0].get("width").is_none());
        assert_eq!(value["layout"]["bargap"], 0.7);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("normal"), "Normal");
        assert_eq!(capitalize("pathogenic"), "Pathogenic");
        assert_eq!(capitalize(""), "");
    }
}
