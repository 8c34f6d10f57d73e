//! Degree-preserving randomization by repeated double edge swaps.

use crate::error::{NetsciError, Result};
use crate::graph::{Graph, NodeId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, instrument, trace, warn};

/// Swap budget for a randomization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomizationConfig {
    /// Number of successful swaps to perform
    pub n_iter: usize,
    /// Consecutive failed attempts tolerated before giving up
    pub fail_max: usize,
}

impl Default for RandomizationConfig {
    fn default() -> Self {
        Self {
            n_iter: 500,
            fail_max: 200,
        }
    }
}

/// Result of a single swap attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwapAttempt {
    Swapped,
    NoEdges,
    SharedEndpoint,
    EdgeExists,
}

/// Randomize `graph` with the thread-local rng. See
/// [`degree_preserving_randomization_with_rng`].
pub fn degree_preserving_randomization<N: NodeId>(
    graph: &Graph<N>,
    n_iter: usize,
    fail_max: usize,
) -> Result<Graph<N>> {
    degree_preserving_randomization_with_rng(graph, n_iter, fail_max, &mut rand::thread_rng())
}

/// Return a copy of `graph` rewired by `n_iter` successful double edge swaps.
///
/// Each attempt draws two edges `(u, v)` and `(x, y)` uniformly with
/// replacement. If the four endpoints are distinct, a fair coin picks either
/// `{(u, x), (v, y)}` or `{(u, y), (x, v)}` as the replacement pair, which is
/// accepted only when neither edge already exists. Every node keeps its total
/// degree and the graph stays simple. On directed graphs the in/out split of a
/// node's degree may change.
///
/// Any rejected attempt counts as a failure; a success resets the counter.
/// Reaching `fail_max` consecutive failures before `n_iter` successes returns
/// [`NetsciError::SwapsExhausted`] and the partially rewired copy is dropped.
#[instrument(skip(graph, rng), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn degree_preserving_randomization_with_rng<N, R>(
    graph: &Graph<N>,
    n_iter: usize,
    fail_max: usize,
    rng: &mut R,
) -> Result<Graph<N>>
where
    N: NodeId,
    R: Rng + ?Sized,
{
    let start = Instant::now();
    let mut randomized = graph.clone();
    let mut edges = randomized.edges();
    let mut successes = 0usize;
    let mut failures = 0usize;
    let mut attempts = 0usize;

    while successes < n_iter {
        if failures >= fail_max {
            warn!(
                successes,
                attempts, "Randomization stuck after {} consecutive failures", failures
            );
            return Err(NetsciError::SwapsExhausted {
                fail_max,
                successes,
                n_iter,
            });
        }

        attempts += 1;
        match attempt_swap(&mut randomized, &mut edges, rng) {
            SwapAttempt::Swapped => {
                successes += 1;
                failures = 0;
            }
            rejected => {
                trace!(?rejected, "swap rejected");
                failures += 1;
            }
        }
    }

    debug!(attempts, "swap loop finished");
    info!(
        "Degree-preserving randomization completed {} swaps in {:?}",
        successes,
        start.elapsed()
    );
    Ok(randomized)
}

/// Try one double edge swap, keeping `edges` in sync with `graph`.
fn attempt_swap<N, R>(graph: &mut Graph<N>, edges: &mut [(N, N)], rng: &mut R) -> SwapAttempt
where
    N: NodeId,
    R: Rng + ?Sized,
{
    if edges.is_empty() {
        return SwapAttempt::NoEdges;
    }

    let first = rng.gen_range(0..edges.len());
    let second = rng.gen_range(0..edges.len());
    let (u, v) = edges[first].clone();
    let (x, y) = edges[second].clone();

    if !pairwise_distinct(&u, &v, &x, &y) {
        return SwapAttempt::SharedEndpoint;
    }

    let (left, right) = if rng.gen_bool(0.5) {
        ((u.clone(), x.clone()), (v.clone(), y.clone()))
    } else {
        ((u.clone(), y.clone()), (x.clone(), v.clone()))
    };

    if graph.has_edge(&left.0, &left.1) || graph.has_edge(&right.0, &right.1) {
        return SwapAttempt::EdgeExists;
    }

    graph.remove_edge(&u, &v);
    graph.remove_edge(&x, &y);
    graph.add_edge(left.0.clone(), left.1.clone());
    graph.add_edge(right.0.clone(), right.1.clone());

    // Sampling is uniform over positions, so replacing in place is
    // equivalent to rebuilding the edge list.
    edges[first] = left;
    edges[second] = right;
    SwapAttempt::Swapped
}

fn pairwise_distinct<N: PartialEq>(u: &N, v: &N, x: &N, y: &N) -> bool {
    u != v && u != x && u != y && v != x && v != y && x != y
}
