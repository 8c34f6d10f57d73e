//! Indicator betweenness centrality (unweighted, unscaled).
//!
//! For every ordered pair `(s, t)` with `t` reachable from `s`, each node on
//! at least one shortest `s -> t` path receives `1 / g(s, t)` exactly once,
//! where `g(s, t)` is the number of shortest paths. Endpoints are credited
//! only when requested.

use crate::graph::{Graph, NodeId};
use crate::paths::{enumerate_from, ShortestPaths};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Node -> accumulated (non-normalized) centrality.
pub type CentralityMap<N> = IndexMap<N, f64>;

/// Sequential indicator betweenness over all sources.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn indicator_betweenness_unscaled<N: NodeId>(
    graph: &Graph<N>,
    endpoints: bool,
) -> CentralityMap<N> {
    let start = Instant::now();
    let mut centrality = zeroed(graph);

    for source in graph.nodes() {
        accumulate_from_source(graph, source, endpoints, &mut centrality);
    }

    info!(
        "Indicator betweenness completed in {:?} for {} nodes",
        start.elapsed(),
        centrality.len()
    );
    centrality
}

/// Parallel indicator betweenness.
///
/// Sources are independent, so each rayon worker folds its sources into a
/// private map and the partial maps are summed at the end. The result matches
/// [`indicator_betweenness_unscaled`] up to floating-point summation order.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn indicator_betweenness_unscaled_par<N>(
    graph: &Graph<N>,
    endpoints: bool,
) -> CentralityMap<N>
where
    N: NodeId + Send + Sync,
{
    let start = Instant::now();
    let sources: Vec<&N> = graph.nodes().collect();

    let centrality = sources
        .par_iter()
        .fold(
            || zeroed(graph),
            |mut acc, &source| {
                accumulate_from_source(graph, source, endpoints, &mut acc);
                acc
            },
        )
        .reduce(
            || zeroed(graph),
            |mut a, b| {
                for (score, partial) in a.values_mut().zip(b.values()) {
                    *score += partial;
                }
                a
            },
        );

    info!(
        "Parallel indicator betweenness completed in {:?} for {} nodes",
        start.elapsed(),
        centrality.len()
    );
    centrality
}

fn zeroed<N: NodeId>(graph: &Graph<N>) -> CentralityMap<N> {
    graph.nodes().map(|v| (v.clone(), 0.0)).collect()
}

/// Fold the contribution of every target reachable from `source`.
fn accumulate_from_source<N: NodeId>(
    graph: &Graph<N>,
    source: &N,
    endpoints: bool,
    centrality: &mut CentralityMap<N>,
) {
    let paths = enumerate_from(graph, source);

    let mut targets = 0usize;
    for (target, &count) in &paths.path_counts {
        if target == source || count == 0.0 {
            continue;
        }
        credit_pair(&paths, target, 1.0 / count, endpoints, centrality);
        targets += 1;
    }
    debug!(?source, targets, "source accumulated");
}

/// Walk the predecessor DAG backward from `target`, crediting each node on
/// some shortest path once.
fn credit_pair<N: NodeId>(
    paths: &ShortestPaths<N>,
    target: &N,
    contrib: f64,
    endpoints: bool,
    centrality: &mut CentralityMap<N>,
) {
    let source = &paths.source;
    let mut visited: HashSet<&N> = HashSet::from([target]);
    let mut stack: Vec<&N> = vec![target];

    while let Some(w) = stack.pop() {
        if endpoints || (w != source && w != target) {
            if let Some(score) = centrality.get_mut(w) {
                *score += contrib;
            }
        }
        for v in paths.predecessors_of(w) {
            if visited.insert(v) {
                stack.push(v);
            }
        }
    }
}
