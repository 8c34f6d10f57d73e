//! Single-source shortest-path enumeration on unweighted graphs.

use crate::error::{NetsciError, Result};
use crate::graph::{Graph, NodeId};
use indexmap::IndexMap;
use std::collections::VecDeque;
use tracing::{instrument, trace};

/// Distance reported for nodes the source cannot reach.
pub const UNREACHABLE: i64 = -1;

/// Distances, shortest-path counts and predecessor lists from one source.
///
/// Every node of the graph has an entry in all three maps. Together,
/// `predecessors` and `path_counts` describe the shortest-path DAG rooted at
/// `source`.
#[derive(Debug, Clone)]
pub struct ShortestPaths<N: NodeId> {
    pub source: N,
    /// Hop count from the source, `UNREACHABLE` when there is no path
    pub dist: IndexMap<N, i64>,
    /// Number of distinct shortest paths from the source. Counts double with
    /// every chained diamond, so they are kept as `f64` rather than a bounded
    /// integer.
    pub path_counts: IndexMap<N, f64>,
    /// Nodes one hop closer to the source on some shortest path
    pub predecessors: IndexMap<N, Vec<N>>,
}

impl<N: NodeId> ShortestPaths<N> {
    pub fn distance(&self, node: &N) -> Option<usize> {
        match self.dist.get(node) {
            Some(&d) if d >= 0 => Some(d as usize),
            _ => None,
        }
    }

    pub fn is_reachable(&self, node: &N) -> bool {
        self.path_counts.get(node).map_or(false, |&g| g > 0.0)
    }

    pub fn path_count(&self, node: &N) -> f64 {
        self.path_counts.get(node).copied().unwrap_or(0.0)
    }

    pub fn predecessors_of(&self, node: &N) -> &[N] {
        self.predecessors.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Breadth-first traversal from `source` recording distance, path counts and
/// predecessors for every node.
///
/// The predecessor test runs for every traversed edge, not only when a node
/// is first discovered, so a node reached at the same depth through several
/// neighbors collects all of them. Self-loops never qualify since they do not
/// increase the distance.
#[instrument(level = "debug", skip(graph), fields(nodes = graph.node_count()))]
pub fn all_shortest_from<N: NodeId>(graph: &Graph<N>, source: &N) -> Result<ShortestPaths<N>> {
    if !graph.has_node(source) {
        return Err(NetsciError::node_not_found(source));
    }
    Ok(enumerate_from(graph, source))
}

/// BFS body of [`all_shortest_from`] for a source already known to be a node
/// of `graph`.
pub(crate) fn enumerate_from<N: NodeId>(graph: &Graph<N>, source: &N) -> ShortestPaths<N> {
    let mut dist: IndexMap<N, i64> = graph.nodes().map(|v| (v.clone(), UNREACHABLE)).collect();
    let mut path_counts: IndexMap<N, f64> = graph.nodes().map(|v| (v.clone(), 0.0)).collect();
    let mut predecessors: IndexMap<N, Vec<N>> =
        graph.nodes().map(|v| (v.clone(), Vec::new())).collect();

    dist.insert(source.clone(), 0);
    path_counts.insert(source.clone(), 1.0);

    let mut queue = VecDeque::new();
    queue.push_back(source.clone());

    while let Some(v) = queue.pop_front() {
        let dist_v = dist[&v];
        let count_v = path_counts[&v];

        for w in graph.neighbors(&v) {
            let dist_w = &mut dist[w];
            if *dist_w < 0 {
                *dist_w = dist_v + 1;
                queue.push_back(w.clone());
            }
            if *dist_w == dist_v + 1 {
                path_counts[w] += count_v;
                predecessors[w].push(v.clone());
            }
        }
    }

    trace!(
        reached = path_counts.values().filter(|&&g| g > 0.0).count(),
        "shortest paths enumerated"
    );

    ShortestPaths {
        source: source.clone(),
        dist,
        path_counts,
        predecessors,
    }
}
