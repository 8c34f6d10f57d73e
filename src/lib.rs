/*!
# Netsci Toolkit

Graph-analysis routines for characterizing and perturbing networks.

This library provides:
- Single-source shortest-path enumeration with path counts and predecessor DAGs
- Indicator betweenness centrality (unweighted, unscaled), sequential or parallel
- Iterative pruning of a directed graph to its 1-in/1-out core
- Degree-preserving randomization via bounded-retry double edge swaps
- Log-binned probability densities for heavy-tailed samples

An axum service in [`server`] exposes the same operations over HTTP.
*/

pub mod centrality;
pub mod config;
pub mod cores;
pub mod error;
pub mod graph;
pub mod models;
pub mod paths;
pub mod randomization;
pub mod server;
pub mod stats;

pub use centrality::{
    indicator_betweenness_unscaled, indicator_betweenness_unscaled_par, CentralityMap,
};
pub use cores::directed_1in1out_core;
pub use error::{NetsciError, Result};
pub use graph::{Graph, NodeId};
pub use paths::{all_shortest_from, ShortestPaths, UNREACHABLE};
pub use randomization::{
    degree_preserving_randomization, degree_preserving_randomization_with_rng,
    RandomizationConfig,
};
pub use stats::{log_binned_pdf, LogBinnedPdf};
