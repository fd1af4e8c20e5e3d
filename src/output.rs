// ==============================================================================
// output.rs - Chart Document and Summary Output
// ==============================================================================
// Description: Writes chart documents (HTML/JSON) and CSV summary tables
// Author: Matt Barham
// Created: 2025-11-06
// Modified: 2026-10-18
// Version: 2.0.0
// ==============================================================================

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::charts::Figure;
use crate::validator::sanitize_component;

/// plotly.js bundle referenced by HTML documents when `--plotly-cdn` is set
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Where HTML documents get plotly.js from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlotlySource {
    /// Bundle source embedded in every page; documents work offline
    Inline(String),
    /// `<script src>` pointing at the public CDN
    Cdn,
}

impl PlotlySource {
    /// Read a local plotly.js bundle for inlining
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OutputError> {
        let path = path.as_ref();
        let bundle = std::fs::read_to_string(path).map_err(|source| OutputError::ReadBundle {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded plotly.js bundle {:?} ({} bytes)", path, bundle.len());
        Ok(PlotlySource::Inline(bundle))
    }

    fn script_tag(&self) -> String {
        match self {
            // a literal "</script" inside the bundle would close the tag early
            PlotlySource::Inline(bundle) => {
                format!("<script>\n{}\n</script>", bundle.replace("</script", "<\\/script"))
            }
            PlotlySource::Cdn => format!(r#"<script src="{}"></script>"#, PLOTLY_CDN),
        }
    }
}

/// Supported chart document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone interactive HTML page
    Html,
    /// Plotly figure JSON (data + layout)
    Json,
}

impl OutputFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to serialize figure: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read plotly.js bundle {path}: {source}")]
    ReadBundle {
        path: String,
        source: std::io::Error,
    },

    #[error("HTML output needs plotly.js: pass --plotly-js <PATH> (or set PLOTLY_JS), or --plotly-cdn")]
    MissingPlotly,
}

/// File stem for an ancestry chart
pub fn ancestry_stem(gene: &str, disease: &str) -> String {
    format!(
        "{}_{}_ancestry_plot",
        sanitize_component(gene),
        sanitize_component(disease)
    )
}

/// File stem for an allele size distribution chart
pub fn allele_dist_stem(gene: &str, chrom: &str, position: u64) -> String {
    format!(
        "{}_{}_{}_allele_dist",
        sanitize_component(gene),
        sanitize_component(chrom),
        position
    )
}

/// Wrap a figure in an HTML page loading plotly.js from `plotly`
pub fn render_html(figure: &Figure, plotly: &PlotlySource) -> Result<String, OutputError> {
    // "</" inside the inline script would terminate it early
    let figure_json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let generated = chrono::Utc::now().to_rfc3339();

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8" />
<meta name="generator" content="genetics-plots {version}" />
<meta name="created" content="{generated}" />
{plotly_script}
</head>
<body>
<div id="chart"></div>
<script>
var figure = {figure_json};
Plotly.newPlot("chart", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
        generated = generated,
        plotly_script = plotly.script_tag(),
        figure_json = figure_json,
    ))
}

/// Writes chart documents into one output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    output_dir: PathBuf,
    format: OutputFormat,
    plotly: Option<PlotlySource>,
}

impl OutputWriter {
    /// Create the writer, creating the output directory if absent
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Result<Self, OutputError> {
        let output_dir = output_dir.into();
        std::fs::create_dir_all(&output_dir).map_err(|source| OutputError::CreateDir {
            path: output_dir.display().to_string(),
            source,
        })?;

        Ok(Self {
            output_dir,
            format,
            plotly: None,
        })
    }

    /// Set the plotly.js source used by HTML documents
    pub fn with_plotly(mut self, plotly: PlotlySource) -> Self {
        self.plotly = Some(plotly);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Full path a document with this stem would be written to
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", stem, self.format.extension()))
    }

    /// Write one chart document, replacing any existing file
    pub fn write_figure(&self, stem: &str, figure: &Figure) -> Result<PathBuf, OutputError> {
        let path = self.path_for(stem);
        let contents = match self.format {
            OutputFormat::Html => {
                let plotly = self.plotly.as_ref().ok_or(OutputError::MissingPlotly)?;
                render_html(figure, plotly)?
            }
            OutputFormat::Json => serde_json::to_string_pretty(figure)?,
        };

        let write_error = |source: std::io::Error| OutputError::Write {
            path: path.display().to_string(),
            source,
        };
        let mut writer = BufWriter::new(File::create(&path).map_err(write_error)?);
        writer.write_all(contents.as_bytes()).map_err(write_error)?;
        writer.flush().map_err(write_error)?;

        debug!("Wrote {:?}", path);
        Ok(path)
    }
}

/// Write serializable rows as a CSV table with header
pub fn write_csv<T: Serialize>(path: impl AsRef<Path>, rows: &[T]) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::figure::{BarTrace, Layout};
    use serde_json::json;

    fn figure() -> Figure {
        Figure {
            data: vec![BarTrace::new(
                vec![json!(1)],
                vec![json!("</script>")],
                "%{x}",
                "blue",
            )],
            layout: Layout::standard("Title".to_string(), 0.5),
        }
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_output_format_serde() {
        let json = serde_json::to_string(&OutputFormat::Html).unwrap();
        assert_eq!(json, "\"html\"");

        let parsed: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(parsed, OutputFormat::Json);
    }

    #[test]
    fn test_file_stems() {
        assert_eq!(
            ancestry_stem("C9orf72", "FTD/ALS"),
            "C9orf72_FTD_ALS_ancestry_plot"
        );
        assert_eq!(
            allele_dist_stem("HTT", "chr4", 3074877),
            "HTT_chr4_3074877_allele_dist"
        );
    }

    #[test]
    fn test_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("plots").join("ancestry");

        let writer = OutputWriter::new(&nested, OutputFormat::Html).unwrap();
        assert!(nested.is_dir());
        assert_eq!(writer.path_for("a"), nested.join("a.html"));
    }

    const BUNDLE: &str = "/* plotly.js */ window.Plotly = {newPlot: function () {}}; var t = \"</script>\";";

    #[test]
    fn test_write_html_document() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputFormat::Html)
            .unwrap()
            .with_plotly(PlotlySource::Inline(BUNDLE.to_string()));

        let path = writer.write_figure("chart", &figure()).unwrap();
        let contents = std::fs::read_to_string(path).unwrap();

        assert!(contents.starts_with("<!DOCTYPE html>"));
        assert!(contents.contains("Plotly.newPlot"));
        assert!(contents.contains("window.Plotly = {newPlot"));
        // bundle and figure each escape their "</script"; only the two real tags close
        assert!(contents.contains("var t = \"<\\/script>\""));
        assert!(contents.contains("<\\/script>\"]"));
        assert_eq!(contents.matches("</script>").count(), 2);
    }

    #[test]
    fn test_inline_html_has_no_external_scripts() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("plotly.min.js");
        std::fs::write(&bundle, BUNDLE).unwrap();

        let plotly = PlotlySource::from_file(&bundle).unwrap();
        let html = render_html(&figure(), &plotly).unwrap();

        assert!(!html.contains("src="));
        assert!(!html.contains("http://"));
        assert!(!html.contains("https://"));
        assert!(!html.contains(PLOTLY_CDN));
    }

    #[test]
    fn test_cdn_html_references_plotly() {
        let html = render_html(&figure(), &PlotlySource::Cdn).unwrap();
        assert!(html.contains(&format!(r#"<script src="{}"></script>"#, PLOTLY_CDN)));
    }

    #[test]
    fn test_html_without_plotly_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputFormat::Html).unwrap();

        assert!(matches!(
            writer.write_figure("chart", &figure()),
            Err(OutputError::MissingPlotly)
        ));
        assert!(!writer.path_for("chart").exists());
    }

    #[test]
    fn test_missing_bundle_file() {
        assert!(matches!(
            PlotlySource::from_file("/nonexistent/plotly.min.js"),
            Err(OutputError::ReadBundle { .. })
        ));
    }

    #[test]
    fn test_write_json_document() {
        let dir = tempfile::tempdir().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputFormat::Json).unwrap();

        let path = writer.write_figure("chart", &figure()).unwrap();
        let parsed: Figure = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed, figure());
    }

    #[test]
    fn test_write_csv() {
        #[derive(Serialize)]
        struct Row {
            gene: String,
            count: u32,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary").join("rows.csv");
        write_csv(
            &path,
            &[Row {
                gene: "HTT".to_string(),
                count: 3,
            }],
        )
        .unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "gene,count\nHTT,3\n");
    }
}
