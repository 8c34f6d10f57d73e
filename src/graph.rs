//! In-memory graph container shared by every algorithm in the toolkit.
//!
//! Adjacency is kept in insertion-ordered maps so that node iteration,
//! neighbor iteration and the materialized edge list are deterministic for a
//! given construction sequence. All mutation happens in place; algorithms that
//! must not disturb the caller's graph work on a `clone()`.

use indexmap::{IndexMap, IndexSet};
use std::fmt;
use std::hash::Hash;

/// Requirements on node identifiers.
pub trait NodeId: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> NodeId for T {}

/// Simple graph (no parallel edges), either directed or undirected.
#[derive(Debug, Clone)]
pub struct Graph<N: NodeId> {
    directed: bool,
    /// Out-neighbors for directed graphs, all neighbors for undirected ones
    succ: IndexMap<N, IndexSet<N>>,
    /// In-neighbors; only populated for directed graphs
    pred: IndexMap<N, IndexSet<N>>,
    edge_count: usize,
}

impl<N: NodeId> Graph<N> {
    pub fn directed() -> Self {
        Self::with_direction(true)
    }

    pub fn undirected() -> Self {
        Self::with_direction(false)
    }

    fn with_direction(directed: bool) -> Self {
        Self {
            directed,
            succ: IndexMap::new(),
            pred: IndexMap::new(),
            edge_count: 0,
        }
    }

    /// Build a graph from an edge list. Endpoints become nodes in order of
    /// first appearance; duplicate edges collapse into one.
    pub fn from_edges<I>(directed: bool, edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N)>,
    {
        let mut graph = Self::with_direction(directed);
        for (a, b) in edges {
            graph.add_edge(a, b);
        }
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.succ.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.succ.is_empty()
    }

    pub fn has_node(&self, node: &N) -> bool {
        self.succ.contains_key(node)
    }

    /// Insert a node. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: N) -> bool {
        if self.succ.contains_key(&node) {
            return false;
        }
        if self.directed {
            self.pred.insert(node.clone(), IndexSet::new());
        }
        self.succ.insert(node, IndexSet::new());
        true
    }

    pub fn add_nodes_from<I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        for node in nodes {
            self.add_node(node);
        }
    }

    /// Insert the edge `a -> b` (or `{a, b}`), adding missing endpoints.
    /// Returns `false` if the edge already existed.
    pub fn add_edge(&mut self, a: N, b: N) -> bool {
        self.add_node(a.clone());
        self.add_node(b.clone());
        if self.has_edge(&a, &b) {
            return false;
        }

        if self.directed {
            if let Some(preds) = self.pred.get_mut(&b) {
                preds.insert(a.clone());
            }
        } else if let Some(nbrs) = self.succ.get_mut(&b) {
            nbrs.insert(a.clone());
        }
        if let Some(nbrs) = self.succ.get_mut(&a) {
            nbrs.insert(b);
        }
        self.edge_count += 1;
        true
    }

    /// Remove the edge `a -> b` (or `{a, b}`). Returns `false` if absent.
    pub fn remove_edge(&mut self, a: &N, b: &N) -> bool {
        let removed = self
            .succ
            .get_mut(a)
            .map_or(false, |nbrs| nbrs.shift_remove(b));
        if !removed {
            return false;
        }

        if self.directed {
            if let Some(preds) = self.pred.get_mut(b) {
                preds.shift_remove(a);
            }
        } else if let Some(nbrs) = self.succ.get_mut(b) {
            nbrs.shift_remove(a);
        }
        self.edge_count -= 1;
        true
    }

    /// Remove a node together with every incident edge.
    pub fn remove_node(&mut self, node: &N) -> bool {
        let Some(outs) = self.succ.shift_remove(node) else {
            return false;
        };

        if self.directed {
            let ins = self.pred.shift_remove(node).unwrap_or_default();
            let self_loop = outs.contains(node);
            for target in outs.iter().filter(|t| *t != node) {
                if let Some(preds) = self.pred.get_mut(target) {
                    preds.shift_remove(node);
                }
            }
            for source in ins.iter().filter(|s| *s != node) {
                if let Some(nbrs) = self.succ.get_mut(source) {
                    nbrs.shift_remove(node);
                }
            }
            self.edge_count -= outs.len() + ins.len() - usize::from(self_loop);
        } else {
            for nbr in outs.iter().filter(|m| *m != node) {
                if let Some(nbrs) = self.succ.get_mut(nbr) {
                    nbrs.shift_remove(node);
                }
            }
            self.edge_count -= outs.len();
        }
        true
    }

    pub fn remove_nodes_from<'a, I>(&mut self, nodes: I)
    where
        I: IntoIterator<Item = &'a N>,
        N: 'a,
    {
        for node in nodes {
            self.remove_node(node);
        }
    }

    pub fn has_edge(&self, a: &N, b: &N) -> bool {
        self.succ.get(a).map_or(false, |nbrs| nbrs.contains(b))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.succ.keys()
    }

    /// Out-neighbors for directed graphs, all neighbors otherwise.
    /// Absent nodes have no neighbors.
    pub fn neighbors<'a>(&'a self, node: &N) -> impl Iterator<Item = &'a N> + 'a {
        self.succ.get(node).into_iter().flatten()
    }

    /// In-degree of a node. Undirected graphs count every incident edge.
    pub fn in_degree(&self, node: &N) -> usize {
        if self.directed {
            self.pred.get(node).map_or(0, IndexSet::len)
        } else {
            self.degree(node)
        }
    }

    /// Out-degree of a node. Undirected graphs count every incident edge.
    pub fn out_degree(&self, node: &N) -> usize {
        if self.directed {
            self.succ.get(node).map_or(0, IndexSet::len)
        } else {
            self.degree(node)
        }
    }

    /// Total degree. A self-loop counts twice on an undirected node.
    pub fn degree(&self, node: &N) -> usize {
        let Some(nbrs) = self.succ.get(node) else {
            return 0;
        };
        if self.directed {
            nbrs.len() + self.pred.get(node).map_or(0, IndexSet::len)
        } else {
            nbrs.len() + usize::from(nbrs.contains(node))
        }
    }

    /// Materialize the edge set. Undirected edges appear once, oriented from
    /// the endpoint inserted first.
    pub fn edges(&self) -> Vec<(N, N)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (i, (a, nbrs)) in self.succ.iter().enumerate() {
            for b in nbrs {
                let keep = self.directed
                    || self.succ.get_index_of(b).map_or(false, |j| j >= i);
                if keep {
                    edges.push((a.clone(), b.clone()));
                }
            }
        }
        edges
    }
}
