use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Graph upload: an edge list plus optional extra (possibly isolated) nodes
#[derive(Debug, Deserialize)]
pub struct GraphPayload {
    #[serde(default)]
    pub directed: bool,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<(String, String)>,
}

/// Request for single-source shortest paths
#[derive(Debug, Deserialize)]
pub struct ShortestPathsRequest {
    pub source: String,
}

/// Request for indicator betweenness centrality
#[derive(Debug, Deserialize)]
pub struct BetweennessRequest {
    #[serde(default)]
    pub endpoints: bool,
}

/// Request for the 1-in/1-out core
#[derive(Debug, Deserialize)]
pub struct CoreRequest {
    #[serde(default = "default_store_result")]
    pub store_result: bool,
}

/// Request for degree-preserving randomization; budgets fall back to the
/// service configuration
#[derive(Debug, Deserialize)]
pub struct RandomizeRequest {
    pub n_iter: Option<usize>,
    pub fail_max: Option<usize>,
    pub seed: Option<u64>,
    #[serde(default = "default_store_result")]
    pub store_result: bool,
}

/// Request for a log-binned density estimate
#[derive(Debug, Deserialize)]
pub struct LogBinnedPdfRequest {
    pub values: Vec<f64>,
    #[serde(default = "default_nbins")]
    pub nbins: usize,
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
}

/// Summary of a stored graph
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphSummary {
    pub graph_id: Uuid,
    pub directed: bool,
    pub nodes: usize,
    pub edges: usize,
}

/// Response for single-source shortest paths
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortestPathsResponse {
    pub source: String,
    pub dist: HashMap<String, i64>,
    pub path_counts: HashMap<String, f64>,
    pub predecessors: HashMap<String, Vec<String>>,
    pub execution_time_ms: u128,
}

/// Response for a centrality metric
#[derive(Debug, Serialize, Deserialize)]
pub struct CentralityResponse {
    pub scores: HashMap<String, f64>,
    pub metric: String,
    pub nodes_processed: usize,
    pub execution_time_ms: u128,
}

/// Response for operations that derive a new graph from a stored one
#[derive(Debug, Serialize, Deserialize)]
pub struct DerivedGraphResponse {
    /// Set when the derived graph was stored
    pub graph_id: Option<Uuid>,
    pub directed: bool,
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub execution_time_ms: u128,
}

/// Response for a log-binned density estimate
#[derive(Debug, Serialize, Deserialize)]
pub struct LogBinnedPdfResponse {
    pub centers: Vec<f64>,
    pub density: Vec<f64>,
}

// Default values for serde
fn default_store_result() -> bool {
    true
}

fn default_nbins() -> usize {
    50
}
