// ==============================================================================
// charts/figure.rs - Plotly Figure Model
// ==============================================================================
// Description: Serializable subset of the plotly.js figure schema
// Author: Matt Barham
// Created: 2026-10-18
// Modified: 2026-10-18
// Version: 1.0.0
// ==============================================================================
// References:
// - plotly.js figure reference: https://plotly.com/javascript/reference/
// ==============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A complete chart: traces plus layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<BarTrace>,
    pub layout: Layout,
}

/// Bar trace (used for both horizontal bars and pre-binned histograms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTrace {
    #[serde(rename = "type")]
    pub trace_type: String,
    pub x: Vec<Value>,
    pub y: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texttemplate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textposition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cliponaxis: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customdata: Option<Vec<Vec<Value>>>,
    pub hovertemplate: String,
    pub marker: Marker,
}

impl BarTrace {
    pub fn new(x: Vec<Value>, y: Vec<Value>, hovertemplate: &str, color: &str) -> Self {
        Self {
            trace_type: "bar".to_string(),
            x,
            y,
            orientation: None,
            text: None,
            texttemplate: None,
            textposition: None,
            cliponaxis: None,
            customdata: None,
            hovertemplate: hovertemplate.to_string(),
            marker: Marker {
                color: color.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Title {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            font: None,
        }
    }

    /// 18px bold black chart title
    pub fn chart(text: String) -> Self {
        Self {
            text,
            font: Some(Font {
                size: Some(18),
                color: Some("black".to_string()),
                weight: Some("bold".to_string()),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linewidth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticklen: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickwidth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub t: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

/// Line shape; x in data units, y in paper units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub shape_type: String,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
    pub xref: String,
    pub yref: String,
    pub line: LineStyle,
}

impl Shape {
    pub fn line(x0: f64, x1: f64, y0: f64, y1: f64, dash: Option<&str>) -> Self {
        Self {
            shape_type: "line".to_string(),
            x0,
            x1,
            y0,
            y1,
            xref: "x".to_string(),
            yref: "paper".to_string(),
            line: LineStyle {
                color: "black".to_string(),
                width: 1,
                dash: dash.map(str::to_string),
            },
        }
    }
}

/// Text annotation; x in data units, y in paper units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub showarrow: bool,
    pub xref: String,
    pub yref: String,
    pub font: Font,
}

impl Annotation {
    pub fn label(x: f64, y: f64, text: &str) -> Self {
        Self {
            x,
            y,
            text: text.to_string(),
            showarrow: false,
            xref: "x".to_string(),
            yref: "paper".to_string(),
            font: Font {
                size: Some(12),
                color: Some("black".to_string()),
                weight: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub bargap: f64,
    pub plot_bgcolor: String,
    pub showlegend: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<Shape>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

impl Layout {
    /// 900x500 white-background layout shared by every chart
    pub fn standard(title: String, bargap: f64) -> Self {
        Self {
            title: Title::chart(title),
            width: CHART_WIDTH_PX,
            height: CHART_HEIGHT_PX,
            margin: Margin { t: 160 },
            xaxis: Axis::default(),
            yaxis: Axis::default(),
            bargap,
            plot_bgcolor: "white".to_string(),
            showlegend: false,
            shapes: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

pub const CHART_WIDTH_PX: u32 = 900;
pub const CHART_HEIGHT_PX: u32 = 500;
