//! 1-in/1-out core extraction.

use crate::graph::{Graph, NodeId};
use tracing::{debug, info, instrument};

/// Return the maximal subgraph of `graph` in which every node has at least one
/// incoming and one outgoing edge. The input is left untouched.
///
/// Each pass collects every node with zero in- or out-degree against the
/// current graph and removes them together; passes repeat until nothing is
/// removed. On an undirected graph every edge counts as both incoming and
/// outgoing, so only isolated nodes are dropped.
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn directed_1in1out_core<N: NodeId>(graph: &Graph<N>) -> Graph<N> {
    let mut core = graph.clone();
    let mut passes = 0usize;

    loop {
        let to_drop: Vec<N> = core
            .nodes()
            .filter(|n| core.in_degree(n) == 0 || core.out_degree(n) == 0)
            .cloned()
            .collect();
        if to_drop.is_empty() {
            break;
        }

        passes += 1;
        debug!(pass = passes, removed = to_drop.len(), "pruning pass");
        core.remove_nodes_from(&to_drop);
    }

    info!(
        "1-in/1-out core has {} of {} nodes after {} pruning passes",
        core.node_count(),
        graph.node_count(),
        passes
    );
    core
}
