//! HTML Writer
//!
//! Writes a single-page report: the plots written earlier in the same run,
//! the scalar metrics, the community list and a per-node table.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use askama::Template;

use crate::analysis::Analysis;
use crate::error::{NetworkError, NetworkResult};
use crate::io::Writer;
use crate::plot::{PLOT_2D_FILE, PLOT_3D_FILE};

/// File name of the report inside the output directory
pub const REPORT_FILE: &str = "index.html";

/// A plot image linked from the report
#[derive(Debug, Clone)]
pub struct PlotRef {
    pub file: String,
    pub title: String,
}

/// One row of the per-node table
#[derive(Debug, Clone)]
pub struct NodeRow {
    pub id: usize,
    pub degree: usize,
    pub betweenness: String,
    pub community: String,
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    title: &'a str,
    node_count: usize,
    edge_count: usize,
    global_efficiency: String,
    modularity: String,
    density: String,
    plots: &'a [PlotRef],
    communities: &'a [String],
    rows: &'a [NodeRow],
}

/// Writer for the HTML report
pub struct HtmlWriter {
    /// Link the plot files written in the same run (default: true)
    pub include_plots: bool,
}

impl HtmlWriter {
    /// Create a new HTML writer with default options (plots enabled)
    pub fn new() -> Self {
        Self {
            include_plots: true,
        }
    }

    /// Create a new HTML writer with custom options
    pub fn with_options(include_plots: bool) -> Self {
        Self { include_plots }
    }

    /// Plot files among `written`; older plots left in the directory are ignored
    fn find_plots(&self, written: &[PathBuf]) -> Vec<PlotRef> {
        if !self.include_plots {
            return Vec::new();
        }
        [
            (PLOT_2D_FILE, "2D Network Visualization"),
            (PLOT_3D_FILE, "3D Network Visualization"),
        ]
        .into_iter()
        .filter(|(file, _)| {
            written
                .iter()
                .any(|path| path.file_name() == Some(OsStr::new(file)))
        })
        .map(|(file, title)| PlotRef {
            file: file.to_string(),
            title: title.to_string(),
        })
        .collect()
    }

    /// Render the report page to a string
    pub fn render(&self, analysis: &Analysis, written: &[PathBuf]) -> NetworkResult<String> {
        let metrics = &analysis.metrics;
        let plots = self.find_plots(written);

        let communities: Vec<String> = metrics
            .communities
            .iter()
            .map(|c| {
                c.iter()
                    .map(|node| node.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .collect();

        let rows: Vec<NodeRow> = metrics
            .degree
            .iter()
            .map(|(&id, &degree)| NodeRow {
                id,
                degree,
                betweenness: format!("{:.4}", metrics.betweenness.get(&id).copied().unwrap_or_default()),
                community: metrics
                    .community_of(id)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            })
            .collect();

        let template = ReportTemplate {
            title: "Random Network Report",
            node_count: metrics.node_count,
            edge_count: metrics.edge_count,
            global_efficiency: format!("{:.6}", metrics.global_efficiency),
            modularity: format!("{:.6}", metrics.modularity),
            density: format!("{:.6}", metrics.density),
            plots: &plots,
            communities: &communities,
            rows: &rows,
        };

        template
            .render()
            .map_err(|e| NetworkError::Write(e.to_string()))
    }
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for HtmlWriter {
    fn write(
        &self,
        analysis: &Analysis,
        output: &Path,
        written: &[PathBuf],
    ) -> NetworkResult<PathBuf> {
        let html = self.render(analysis, written)?;
        let path = output.join(REPORT_FILE);
        fs::write(&path, html)?;
        Ok(path)
    }

    fn format_id(&self) -> &str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;
    use crate::network::Network;
    use tempfile::TempDir;

    fn path_analysis() -> Analysis {
        let network = Network::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        Analysis::from_network(network, &LayoutConfig::default())
    }

    #[test]
    fn report_lists_metrics_and_nodes() {
        let html = HtmlWriter::new().render(&path_analysis(), &[]).unwrap();

        assert!(html.contains("Random Network Report"));
        assert!(html.contains("0.833333"));
        assert!(html.contains("0.666667"));
        assert!(html.contains("1.0000"));
        assert_eq!(html.matches("<tr class=\"node\">").count(), 3);
    }

    #[test]
    fn report_links_only_plots_from_this_run() {
        let dir = TempDir::new().unwrap();
        let written = vec![dir.path().join(PLOT_2D_FILE)];

        let html = HtmlWriter::new().render(&path_analysis(), &written).unwrap();

        assert!(html.contains(PLOT_2D_FILE));
        assert!(!html.contains(PLOT_3D_FILE));
    }

    #[test]
    fn stale_plots_in_output_are_not_linked() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PLOT_2D_FILE), "<svg></svg>").unwrap();
        fs::write(dir.path().join(PLOT_3D_FILE), "<svg></svg>").unwrap();

        let path = HtmlWriter::new()
            .write(&path_analysis(), dir.path(), &[])
            .unwrap();

        let html = fs::read_to_string(path).unwrap();
        assert!(!html.contains(PLOT_2D_FILE));
        assert!(!html.contains(PLOT_3D_FILE));
    }

    #[test]
    fn plots_can_be_disabled() {
        let dir = TempDir::new().unwrap();
        let written = vec![dir.path().join(PLOT_2D_FILE)];

        let html = HtmlWriter::with_options(false)
            .render(&path_analysis(), &written)
            .unwrap();

        assert!(!html.contains(PLOT_2D_FILE));
    }

    #[test]
    fn writes_index_html() {
        let dir = TempDir::new().unwrap();
        let path = HtmlWriter::new()
            .write(&path_analysis(), dir.path(), &[])
            .unwrap();

        assert_eq!(path, dir.path().join(REPORT_FILE));
        assert!(fs::read_to_string(path).unwrap().starts_with("<!DOCTYPE html>"));
    }
}
