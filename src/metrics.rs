//! Graph-level and node-level metrics

use std::collections::{BTreeMap, VecDeque};

use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use serde::Serialize;

use crate::community::{self, Community};
use crate::network::Network;

/// All metrics computed for one network
#[derive(Debug, Clone, Serialize)]
pub struct Metrics {
    /// Total number of nodes
    pub node_count: usize,
    /// Total number of edges
    pub edge_count: usize,
    /// Mean inverse shortest-path distance over all ordered node pairs
    pub global_efficiency: f64,
    /// Modularity of the greedy modularity partition
    pub modularity: f64,
    /// Ratio of present edges to possible edges
    pub density: f64,
    /// Degree per node
    pub degree: BTreeMap<usize, usize>,
    /// Normalized betweenness centrality per node
    pub betweenness: BTreeMap<usize, f64>,
    /// Partition used for `modularity`, largest community first
    pub communities: Vec<Community>,
}

impl Metrics {
    /// Index of the community containing `node`, if any
    pub fn community_of(&self, node: usize) -> Option<usize> {
        self.communities.iter().position(|c| c.contains(&node))
    }
}

/// Compute every metric for `network`
pub fn calculate_metrics(network: &Network) -> Metrics {
    let communities = community::greedy_modularity_communities(network);
    let metrics = Metrics {
        node_count: network.node_count(),
        edge_count: network.edge_count(),
        global_efficiency: global_efficiency(network),
        modularity: community::modularity(network, &communities),
        density: density(network),
        degree: degree(network),
        betweenness: betweenness_centrality(network),
        communities,
    };
    tracing::info!(
        nodes = metrics.node_count,
        edges = metrics.edge_count,
        communities = metrics.communities.len(),
        "metrics computed"
    );
    metrics
}

/// Average of `1 / d(u, v)` over all ordered pairs of distinct nodes
///
/// Unreachable pairs contribute zero. Fewer than two nodes gives 0.
pub fn global_efficiency(network: &Network) -> f64 {
    let n = network.node_count();
    if n < 2 {
        return 0.0;
    }

    let graph = network.inner();
    let total: f64 = graph
        .node_indices()
        .map(|source| {
            // Sorted so the floating-point sum does not depend on hash order
            let mut distances: Vec<usize> = dijkstra(graph, source, None, |_| 1_usize)
                .into_values()
                .filter(|&d| d > 0)
                .collect();
            distances.sort_unstable();
            distances.iter().map(|&d| 1.0 / d as f64).sum::<f64>()
        })
        .sum();

    total / (n * (n - 1)) as f64
}

/// `2E / (N (N - 1))`; fewer than two nodes gives 0
pub fn density(network: &Network) -> f64 {
    let n = network.node_count();
    if n < 2 {
        return 0.0;
    }
    2.0 * network.edge_count() as f64 / (n * (n - 1)) as f64
}

/// Degree of every node
pub fn degree(network: &Network) -> BTreeMap<usize, usize> {
    (0..network.node_count())
        .map(|node| (node, network.degree(node)))
        .collect()
}

/// Normalized betweenness centrality of every node (Brandes' algorithm)
///
/// Shortest-path dependencies are accumulated over ordered pairs and scaled
/// by `1 / ((N - 1)(N - 2))`, so every value lies in `[0, 1]`. Networks with
/// at most two nodes have no intermediaries and score 0 everywhere.
pub fn betweenness_centrality(network: &Network) -> BTreeMap<usize, f64> {
    let n = network.node_count();
    let mut centrality = vec![0.0_f64; n];

    for source in 0..n {
        let mut order = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut paths = vec![0.0_f64; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];
        paths[source] = 1.0;
        distance[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            order.push(v);
            let next = distance[v].map_or(0, |d| d + 1);
            for w in network.neighbors(v) {
                if distance[w].is_none() {
                    distance[w] = Some(next);
                    queue.push_back(w);
                }
                if distance[w] == Some(next) {
                    paths[w] += paths[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut dependency = vec![0.0_f64; n];
        while let Some(w) = order.pop() {
            for &v in &predecessors[w] {
                dependency[v] += paths[v] / paths[w] * (1.0 + dependency[w]);
            }
            if w != source {
                centrality[w] += dependency[w];
            }
        }
    }

    let scale = if n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        0.0
    };

    centrality
        .into_iter()
        .enumerate()
        .map(|(node, value)| (node, value * scale))
        .collect()
}

/// Shortest-path distance between two nodes, if connected
pub fn shortest_path_length(network: &Network, from: usize, to: usize) -> Option<usize> {
    dijkstra(
        network.inner(),
        NodeIndex::new(from),
        Some(NodeIndex::new(to)),
        |_| 1_usize,
    )
    .get(&NodeIndex::new(to))
    .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::generate_random_network;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn path3() -> Network {
        Network::from_edges(3, &[(0, 1), (1, 2)]).unwrap()
    }

    fn star(leaves: usize) -> Network {
        let edges: Vec<_> = (1..=leaves).map(|leaf| (0, leaf)).collect();
        Network::from_edges(leaves + 1, &edges).unwrap()
    }

    #[test]
    fn path_metrics() {
        let metrics = calculate_metrics(&path3());

        assert!((metrics.global_efficiency - 5.0 / 6.0).abs() < 1e-12);
        assert!((metrics.density - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.degree, BTreeMap::from([(0, 1), (1, 2), (2, 1)]));
        assert_eq!(metrics.betweenness[&1], 1.0);
        assert_eq!(metrics.betweenness[&0], 0.0);
    }

    #[test]
    fn star_center_has_full_betweenness() {
        let network = star(5);
        let betweenness = betweenness_centrality(&network);

        assert!((betweenness[&0] - 1.0).abs() < 1e-12);
        for leaf in 1..=5 {
            assert_eq!(betweenness[&leaf], 0.0);
        }
    }

    #[test]
    fn cycle_splits_paths_evenly() {
        // In C4 each node lies on one of two shortest paths for one pair
        let network = Network::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let betweenness = betweenness_centrality(&network);
        for node in 0..4 {
            assert!((betweenness[&node] - 1.0 / 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn complete_graph_is_fully_efficient() {
        let network = Network::complete(6);
        assert!((global_efficiency(&network) - 1.0).abs() < 1e-12);
        assert!((density(&network) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn disconnected_pairs_contribute_nothing() {
        let network = Network::from_edges(4, &[(0, 1)]).unwrap();
        // Only 2 of 12 ordered pairs are reachable, each at distance 1
        assert!((global_efficiency(&network) - 2.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn tiny_networks_are_zero() {
        for n in 0..2 {
            let network = Network::with_nodes(n);
            let metrics = calculate_metrics(&network);
            assert_eq!(metrics.global_efficiency, 0.0);
            assert_eq!(metrics.density, 0.0);
            assert_eq!(metrics.modularity, 0.0);
        }
        let pair = Network::from_edges(2, &[(0, 1)]).unwrap();
        assert!(betweenness_centrality(&pair).values().all(|&b| b == 0.0));
    }

    #[test]
    fn random_network_properties_hold() {
        let mut rng = StdRng::seed_from_u64(2024);
        for (n, e) in [(10, 10), (30, 45), (50, 200)] {
            let (network, _) = generate_random_network(n, e, &mut rng).unwrap();
            let metrics = calculate_metrics(&network);

            let expected_density = 2.0 * e as f64 / (n * (n - 1)) as f64;
            assert!((metrics.density - expected_density).abs() < 1e-12);
            assert_eq!(metrics.degree.values().sum::<usize>(), 2 * e);
            assert!((0.0..=1.0).contains(&metrics.global_efficiency));
            assert!((-0.5..=1.0).contains(&metrics.modularity));
            assert!(
                metrics
                    .betweenness
                    .values()
                    .all(|&b| (0.0..=1.0 + 1e-12).contains(&b))
            );
        }
    }

    #[test]
    fn community_lookup() {
        let metrics = calculate_metrics(&Network::from_edges(4, &[(0, 1), (2, 3)]).unwrap());
        assert_eq!(metrics.community_of(0), metrics.community_of(1));
        assert_ne!(metrics.community_of(0), metrics.community_of(2));
        assert_eq!(metrics.community_of(9), None);
    }

    #[test]
    fn shortest_path_on_path_graph() {
        let network = path3();
        assert_eq!(shortest_path_length(&network, 0, 2), Some(2));
        let split = Network::with_nodes(2);
        assert_eq!(shortest_path_length(&split, 0, 1), None);
    }
}
