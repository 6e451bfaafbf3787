//! Community detection by greedy modularity maximization
//!
//! Clauset–Newman–Moore agglomeration: start from singleton communities and
//! repeatedly merge the adjacent pair whose union raises modularity the most,
//! stopping once every remaining merge would lower it.

use std::collections::{BTreeMap, BTreeSet};

use crate::network::Network;

/// A set of node ids forming one community
pub type Community = BTreeSet<usize>;

/// Partition `network` into communities by greedy modularity maximization
///
/// Communities are returned largest first; equal sizes are ordered by their
/// smallest member. An edgeless network yields one singleton per node.
pub fn greedy_modularity_communities(network: &Network) -> Vec<Community> {
    let n = network.node_count();
    let mut communities: Vec<Option<Community>> =
        (0..n).map(|node| Some(BTreeSet::from([node]))).collect();

    let m = network.edge_count() as f64;
    if m > 0.0 {
        // e[i][j]: fraction of edge ends joining community i to community j
        // a[i]: fraction of edge ends attached to community i
        let mut e: Vec<BTreeMap<usize, f64>> = vec![BTreeMap::new(); n];
        for (u, v) in network.edges() {
            *e[u].entry(v).or_default() += 1.0 / (2.0 * m);
            *e[v].entry(u).or_default() += 1.0 / (2.0 * m);
        }
        let mut a: Vec<f64> = (0..n)
            .map(|node| network.degree(node) as f64 / (2.0 * m))
            .collect();

        while let Some((gain, i, j)) = best_merge(&e, &a) {
            if gain < 0.0 {
                break;
            }
            merge(&mut e, &mut a, i, j);
            let absorbed = communities[j].take().unwrap_or_default();
            if let Some(target) = communities[i].as_mut() {
                target.extend(absorbed);
            }
        }
    }

    let mut result: Vec<Community> = communities.into_iter().flatten().collect();
    result.sort_by(|x, y| y.len().cmp(&x.len()).then_with(|| x.first().cmp(&y.first())));
    tracing::debug!(communities = result.len(), "greedy modularity finished");
    result
}

/// Find the adjacent community pair `(i, j)`, `i < j`, with the largest
/// modularity gain; ties resolve to the first pair in index order
fn best_merge(e: &[BTreeMap<usize, f64>], a: &[f64]) -> Option<(f64, usize, usize)> {
    let mut best: Option<(f64, usize, usize)> = None;
    for (i, row) in e.iter().enumerate() {
        for (&j, &e_ij) in row.range(i + 1..) {
            let gain = 2.0 * (e_ij - a[i] * a[j]);
            if best.is_none_or(|(current, _, _)| gain > current) {
                best = Some((gain, i, j));
            }
        }
    }
    best
}

/// Fold community `j` into community `i`
fn merge(e: &mut [BTreeMap<usize, f64>], a: &mut [f64], i: usize, j: usize) {
    let row = std::mem::take(&mut e[j]);
    for (k, e_jk) in row {
        e[k].remove(&j);
        if k == i {
            continue;
        }
        *e[i].entry(k).or_default() += e_jk;
        *e[k].entry(i).or_default() += e_jk;
    }
    a[i] += a[j];
    a[j] = 0.0;
}

/// Modularity of a partition of `network`
///
/// `Q = Σ_c [ L_c / m − (d_c / 2m)² ]` where `L_c` counts edges inside
/// community `c` and `d_c` sums its degrees. Nodes missing from `communities`
/// contribute nothing. An edgeless network has modularity 0.
pub fn modularity(network: &Network, communities: &[Community]) -> f64 {
    let m = network.edge_count() as f64;
    if m == 0.0 {
        return 0.0;
    }

    let mut membership = vec![None; network.node_count()];
    for (index, community) in communities.iter().enumerate() {
        for &node in community {
            if let Some(slot) = membership.get_mut(node) {
                *slot = Some(index);
            }
        }
    }

    let mut internal = vec![0.0_f64; communities.len()];
    for (u, v) in network.edges() {
        if let (Some(cu), Some(cv)) = (membership[u], membership[v]) {
            if cu == cv {
                internal[cu] += 1.0;
            }
        }
    }

    communities
        .iter()
        .zip(internal)
        .map(|(community, links)| {
            let degree_sum: usize = community
                .iter()
                .filter(|&&node| node < network.node_count())
                .map(|&node| network.degree(node))
                .sum();
            let share = degree_sum as f64 / (2.0 * m);
            links / m - share * share
        })
        .sum()
}
