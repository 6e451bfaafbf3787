//! Console report
//!
//! Plain-text rendering of the adjacency matrix and metrics, printed to
//! stdout by the CLI.

use std::collections::BTreeMap;
use std::fmt::{Debug, Write};

use crate::community::Community;
use crate::metrics::Metrics;
use crate::network::AdjacencyMatrix;

/// The adjacency matrix section
pub fn adjacency_section(adjacency: &AdjacencyMatrix) -> String {
    format!("Adjacency Matrix:\n{adjacency}\n")
}

/// The metrics section
///
/// Floats use their shortest round-trip form, so `1.0` stays `1.0`.
pub fn metrics_section(metrics: &Metrics) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "Global Efficiency: {:?}", metrics.global_efficiency);
    let _ = writeln!(out, "Modularity: {:?}", metrics.modularity);
    let _ = writeln!(out, "Communities: {}", format_communities(&metrics.communities));
    let _ = writeln!(out, "Density: {:?}", metrics.density);
    let _ = writeln!(out, "Node Degrees:\n{}", format_map(&metrics.degree));
    let _ = writeln!(
        out,
        "Node Betweenness Centrality:\n{}",
        format_map(&metrics.betweenness)
    );
    out
}

/// Both sections, adjacency first
pub fn console_report(adjacency: &AdjacencyMatrix, metrics: &Metrics) -> String {
    adjacency_section(adjacency) + &metrics_section(metrics)
}

/// `{0: 2, 1: 3}`
fn format_map<V: Debug>(map: &BTreeMap<usize, V>) -> String {
    let entries: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v:?}")).collect();
    format!("{{{}}}", entries.join(", "))
}

/// `[{0, 1}, {2}]`
fn format_communities(communities: &[Community]) -> String {
    let sets: Vec<String> = communities
        .iter()
        .map(|c| {
            let members: Vec<String> = c.iter().map(|n| n.to_string()).collect();
            format!("{{{}}}", members.join(", "))
        })
        .collect();
    format!("[{}]", sets.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::calculate_metrics;
    use crate::network::Network;

    #[test]
    fn path_graph_report() {
        let network = Network::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let metrics = calculate_metrics(&network);
        let report = console_report(&network.adjacency_matrix(), &metrics);

        insta::assert_snapshot!(report, @r"
        Adjacency Matrix:
        [[0 1 0]
         [1 0 1]
         [0 1 0]]
        Global Efficiency: 0.8333333333333334
        Modularity: 0.0
        Communities: [{0, 1, 2}]
        Density: 0.6666666666666666
        Node Degrees:
        {0: 1, 1: 2, 2: 1}
        Node Betweenness Centrality:
        {0: 0.0, 1: 1.0, 2: 0.0}
        ");
    }

    #[test]
    fn empty_network_report() {
        let network = Network::with_nodes(0);
        let report = console_report(&network.adjacency_matrix(), &calculate_metrics(&network));

        assert!(report.starts_with("Adjacency Matrix:\n[]\n"));
        assert!(report.contains("Node Degrees:\n{}\n"));
    }

    #[test]
    fn communities_are_formatted_as_sets() {
        let communities = vec![Community::from([0, 1]), Community::from([2])];
        assert_eq!(format_communities(&communities), "[{0, 1}, {2}]");
    }
}
