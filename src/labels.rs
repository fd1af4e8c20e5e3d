// ==============================================================================
// labels.rs - Range Label Placement
// ==============================================================================
// Description: Stacks range labels vertically when they would overlap on screen
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================

use std::collections::HashMap;

use crate::models::RepeatRange;

/// Placement parameters, in paper coordinates (1.0 = top of plot area)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementStyle {
    pub base_line_y: f64,
    pub base_label_y: f64,
    pub bump_step: f64,
    /// Labels closer than this many pixels are considered overlapping
    pub bump_threshold_px: f64,
}

impl Default for PlacementStyle {
    fn default() -> Self {
        Self {
            base_line_y: 1.02,
            base_label_y: 1.10,
            bump_step: 0.08,
            bump_threshold_px: 60.0,
        }
    }
}

/// Where a range line and its label end up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x_center: f64,
    /// Number of earlier labels within the overlap threshold
    pub level: usize,
    pub line_y: f64,
    pub label_y: f64,
}

/// Per-chart label placer
///
/// Holds the horizontal centers of every label placed so far on one chart;
/// create a new placer for each chart.
#[derive(Debug, Clone)]
pub struct LabelPlacer {
    pixels_per_unit: f64,
    style: PlacementStyle,
    positions: HashMap<String, f64>,
}

impl LabelPlacer {
    /// `x_span` is the data width of the x axis, `chart_width_px` its pixel width
    pub fn new(chart_width_px: f64, x_span: f64) -> Self {
        Self::with_style(chart_width_px, x_span, PlacementStyle::default())
    }

    pub fn with_style(chart_width_px: f64, x_span: f64, style: PlacementStyle) -> Self {
        let pixels_per_unit = if x_span > 0.0 {
            chart_width_px / x_span
        } else {
            0.0
        };
        Self {
            pixels_per_unit,
            style,
            positions: HashMap::new(),
        }
    }

    /// Place the label for `range` and remember its center
    pub fn place(&mut self, label_id: &str, range: &RepeatRange) -> Placement {
        let x_center = range.center();
        let level = self
            .positions
            .values()
            .filter(|&&other| (other - x_center).abs() * self.pixels_per_unit < self.style.bump_threshold_px)
            .count();

        self.positions.insert(label_id.to_string(), x_center);

        let bump = self.style.bump_step * level as f64;
        Placement {
            x_center,
            level,
            line_y: self.style.base_line_y + bump,
            label_y: self.style.base_label_y + bump,
        }
    }

    pub fn placed(&self) -> usize {
        self.positions.len()
    }
}
