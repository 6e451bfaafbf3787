//! Graph JSON writer
//!
//! Exports the analysed network as JSON: every node with its layout
//! positions and per-node metrics, every edge, and the scalar metrics.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::Analysis;
use crate::error::{NetworkError, NetworkResult};
use crate::io::Writer;

/// File name of the JSON export inside the output directory
pub const GRAPH_JSON_FILE: &str = "network.json";

/// A node in the graph representation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Node id (0..N)
    pub id: usize,

    pub degree: usize,

    /// Normalized betweenness centrality
    pub betweenness: f64,

    /// Index into the community list (largest community is 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<usize>,

    /// Position in the 2D layout
    pub position_2d: [f64; 2],

    /// Position in the 3D layout
    pub position_3d: [f64; 3],
}

/// An undirected edge, stored with `source < target`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: usize,
    pub target: usize,
}

/// Scalar metrics of the whole network
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSummary {
    pub global_efficiency: f64,
    pub modularity: f64,
    pub density: f64,
    pub community_count: usize,
}

/// Complete graph data for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphData {
    /// All nodes in the graph
    pub nodes: Vec<GraphNode>,

    /// All edges in the graph
    pub edges: Vec<GraphEdge>,

    pub summary: GraphSummary,

    /// Version of the graph format (for future compatibility)
    pub format_version: String,
}

impl GraphData {
    /// Format version constant
    pub const FORMAT_VERSION: &'static str = "1.0";

    /// Build graph data from an analysis
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let metrics = &analysis.metrics;

        let nodes = (0..analysis.network.node_count())
            .map(|id| GraphNode {
                id,
                degree: analysis.network.degree(id),
                betweenness: metrics.betweenness.get(&id).copied().unwrap_or_default(),
                community: metrics.community_of(id),
                position_2d: analysis.layout_2d.position(id),
                position_3d: analysis.layout_3d.position(id),
            })
            .collect();

        let mut edges: Vec<GraphEdge> = analysis
            .network
            .edges()
            .map(|(source, target)| GraphEdge { source, target })
            .collect();
        edges.sort_by_key(|e| (e.source, e.target));

        Self {
            nodes,
            edges,
            summary: GraphSummary {
                global_efficiency: metrics.global_efficiency,
                modularity: metrics.modularity,
                density: metrics.density,
                community_count: metrics.communities.len(),
            },
            format_version: Self::FORMAT_VERSION.to_string(),
        }
    }
}

/// Writer that outputs the network as graph JSON
pub struct GraphWriter {
    /// Pretty-print the JSON output (default: true)
    pub pretty: bool,
}

impl GraphWriter {
    /// Create a new GraphWriter with default options
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a GraphWriter with custom options
    pub fn with_options(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for GraphWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer for GraphWriter {
    fn write(
        &self,
        analysis: &Analysis,
        output: &Path,
        _written: &[PathBuf],
    ) -> NetworkResult<PathBuf> {
        let graph = GraphData::from_analysis(analysis);
        let json = if self.pretty {
            serde_json::to_string_pretty(&graph)
        } else {
            serde_json::to_string(&graph)
        }
        .map_err(|e| NetworkError::Write(e.to_string()))?;

        let path = output.join(GRAPH_JSON_FILE);
        fs::write(&path, json)?;
        Ok(path)
    }

    fn format_id(&self) -> &str {
        "json"
    }
}
