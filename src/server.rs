use crate::centrality::{indicator_betweenness_unscaled, indicator_betweenness_unscaled_par};
use crate::config::ServiceConfig;
use crate::cores::directed_1in1out_core;
use crate::error::{NetsciError, Result};
use crate::graph::Graph;
use crate::models::{
    BetweennessRequest, CentralityResponse, CoreRequest, DerivedGraphResponse, GraphPayload,
    GraphSummary, LogBinnedPdfRequest, LogBinnedPdfResponse, RandomizeRequest,
    ShortestPathsRequest, ShortestPathsResponse,
};
use crate::paths::all_shortest_from;
use crate::randomization::{
    degree_preserving_randomization, degree_preserving_randomization_with_rng,
};
use crate::stats::log_binned_pdf;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Application state holding uploaded graphs
#[derive(Clone)]
pub struct AppState {
    graphs: Arc<DashMap<Uuid, Graph<String>>>,
    /// Slots reserved against `max_graphs`, taken before insert
    stored: Arc<AtomicUsize>,
    config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            graphs: Arc::new(DashMap::new()),
            stored: Arc::new(AtomicUsize::new(0)),
            config: Arc::new(config),
        }
    }

    /// Clone a stored graph so no map guard is held across an await
    fn load_graph(&self, graph_id: Uuid) -> Result<Graph<String>> {
        self.graphs
            .get(&graph_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| NetsciError::GraphNotFound {
                graph_id: graph_id.to_string(),
            })
    }

    fn store_graph(&self, graph: Graph<String>) -> Result<Uuid> {
        let max_graphs = self.config.max_graphs;
        self.stored
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max_graphs).then_some(n + 1)
            })
            .map_err(|_| {
                NetsciError::invalid_parameter(format!("graph limit of {} reached", max_graphs))
            })?;
        let graph_id = Uuid::new_v4();
        self.graphs.insert(graph_id, graph);
        Ok(graph_id)
    }

    fn remove_graph(&self, graph_id: Uuid) -> Option<Graph<String>> {
        let (_, graph) = self.graphs.remove(&graph_id)?;
        self.stored.fetch_sub(1, Ordering::AcqRel);
        Some(graph)
    }
}

/// Create the HTTP server with all toolkit endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/graphs", post(create_graph))
        .route("/graphs/:graph_id", get(get_graph).delete(delete_graph))
        .route("/graphs/:graph_id/shortest-paths", post(shortest_paths_endpoint))
        .route("/graphs/:graph_id/betweenness", post(betweenness_endpoint))
        .route("/graphs/:graph_id/core", post(core_endpoint))
        .route("/graphs/:graph_id/randomize", post(randomize_endpoint))
        .route("/stats/log-binned-pdf", post(log_binned_pdf_endpoint))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "netsci-toolkit-rs"
    }))
}

fn summarize(graph_id: Uuid, graph: &Graph<String>) -> GraphSummary {
    GraphSummary {
        graph_id,
        directed: graph.is_directed(),
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    }
}

/// Upload a graph
async fn create_graph(
    State(state): State<AppState>,
    Json(payload): Json<GraphPayload>,
) -> impl IntoResponse {
    let mut graph = Graph::from_edges(payload.directed, payload.edges);
    graph.add_nodes_from(payload.nodes);
    let (directed, nodes, edges) = (graph.is_directed(), graph.node_count(), graph.edge_count());

    match state.store_graph(graph) {
        Ok(graph_id) => {
            info!(
                "Stored graph {} with {} nodes and {} edges",
                graph_id, nodes, edges
            );
            let summary = GraphSummary {
                graph_id,
                directed,
                nodes,
                edges,
            };
            (StatusCode::CREATED, Json(summary)).into_response()
        }
        Err(e) => {
            warn!("Rejected graph upload: {}", e);
            handle_error(e).into_response()
        }
    }
}

/// Summary of a stored graph
async fn get_graph(
    State(state): State<AppState>,
    Path(graph_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.load_graph(graph_id) {
        Ok(graph) => Json(summarize(graph_id, &graph)).into_response(),
        Err(e) => handle_error(e).into_response(),
    }
}

/// Drop a stored graph
async fn delete_graph(
    State(state): State<AppState>,
    Path(graph_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.remove_graph(graph_id) {
        Some(_) => {
            info!("Deleted graph {}", graph_id);
            StatusCode::NO_CONTENT.into_response()
        }
        None => handle_error(NetsciError::GraphNotFound {
            graph_id: graph_id.to_string(),
        })
        .into_response(),
    }
}

/// Run CPU-bound work off the async executor
async fn run_blocking<T, F>(work: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| NetsciError::internal(format!("worker task failed: {}", e)))?
}

/// Single-source shortest paths endpoint
async fn shortest_paths_endpoint(
    State(state): State<AppState>,
    Path(graph_id): Path<Uuid>,
    Json(request): Json<ShortestPathsRequest>,
) -> impl IntoResponse {
    let start = Instant::now();

    let result = match state.load_graph(graph_id) {
        Ok(graph) => run_blocking(move || all_shortest_from(&graph, &request.source)).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(paths) => Json(ShortestPathsResponse {
            source: paths.source,
            dist: paths.dist.into_iter().collect(),
            path_counts: paths.path_counts.into_iter().collect(),
            predecessors: paths.predecessors.into_iter().collect(),
            execution_time_ms: start.elapsed().as_millis(),
        })
        .into_response(),
        Err(e) => {
            error!("Shortest path enumeration failed: {}", e);
            handle_error(e).into_response()
        }
    }
}

/// Indicator betweenness endpoint
async fn betweenness_endpoint(
    State(state): State<AppState>,
    Path(graph_id): Path<Uuid>,
    Json(request): Json<BetweennessRequest>,
) -> impl IntoResponse {
    let start = Instant::now();
    let parallel_threshold = state.config.parallel_threshold;
    let endpoints = request.endpoints;

    let result = match state.load_graph(graph_id) {
        Ok(graph) => {
            run_blocking(move || {
                let scores = if graph.node_count() >= parallel_threshold {
                    indicator_betweenness_unscaled_par(&graph, endpoints)
                } else {
                    indicator_betweenness_unscaled(&graph, endpoints)
                };
                Ok(scores)
            })
            .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(scores) => {
            let nodes_processed = scores.len();
            Json(CentralityResponse {
                scores: scores.into_iter().collect(),
                metric: if endpoints {
                    "indicator_betweenness_endpoints".to_string()
                } else {
                    "indicator_betweenness".to_string()
                },
                nodes_processed,
                execution_time_ms: start.elapsed().as_millis(),
            })
            .into_response()
        }
        Err(e) => {
            error!("Betweenness calculation failed: {}", e);
            handle_error(e).into_response()
        }
    }
}

/// 1-in/1-out core endpoint
async fn core_endpoint(
    State(state): State<AppState>,
    Path(graph_id): Path<Uuid>,
    Json(request): Json<CoreRequest>,
) -> impl IntoResponse {
    let start = Instant::now();

    let result = match state.load_graph(graph_id) {
        Ok(graph) => run_blocking(move || Ok(directed_1in1out_core(&graph))).await,
        Err(e) => Err(e),
    };

    match result.and_then(|core| derived_response(&state, core, request.store_result, start)) {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("Core extraction failed: {}", e);
            handle_error(e).into_response()
        }
    }
}

/// Degree-preserving randomization endpoint
async fn randomize_endpoint(
    State(state): State<AppState>,
    Path(graph_id): Path<Uuid>,
    Json(request): Json<RandomizeRequest>,
) -> impl IntoResponse {
    let start = Instant::now();
    let budget = state.config.randomization;
    let n_iter = request.n_iter.unwrap_or(budget.n_iter);
    let fail_max = request.fail_max.unwrap_or(budget.fail_max);
    let seed = request.seed;

    let result = match state.load_graph(graph_id) {
        Ok(graph) => {
            run_blocking(move || match seed {
                Some(seed) => degree_preserving_randomization_with_rng(
                    &graph,
                    n_iter,
                    fail_max,
                    &mut StdRng::seed_from_u64(seed),
                ),
                None => degree_preserving_randomization(&graph, n_iter, fail_max),
            })
            .await
        }
        Err(e) => Err(e),
    };

    match result.and_then(|randomized| {
        derived_response(&state, randomized, request.store_result, start)
    }) {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            error!("Randomization failed: {}", e);
            handle_error(e).into_response()
        }
    }
}

fn derived_response(
    state: &AppState,
    graph: Graph<String>,
    store_result: bool,
    start: Instant,
) -> Result<DerivedGraphResponse> {
    let nodes = graph.nodes().cloned().collect();
    let edges = graph.edges();
    let directed = graph.is_directed();
    let graph_id = if store_result {
        Some(state.store_graph(graph)?)
    } else {
        None
    };

    Ok(DerivedGraphResponse {
        graph_id,
        directed,
        nodes,
        edges,
        execution_time_ms: start.elapsed().as_millis(),
    })
}

/// Log-binned density endpoint
async fn log_binned_pdf_endpoint(Json(request): Json<LogBinnedPdfRequest>) -> impl IntoResponse {
    match log_binned_pdf(&request.values, request.nbins, request.xmin, request.xmax) {
        Ok(pdf) => Json(LogBinnedPdfResponse {
            centers: pdf.centers,
            density: pdf.density,
        })
        .into_response(),
        Err(e) => handle_error(e).into_response(),
    }
}

/// Convert errors to HTTP responses
fn handle_error(error: NetsciError) -> (StatusCode, Json<serde_json::Value>) {
    let (status, message) = match &error {
        NetsciError::NodeNotFound { .. } => (StatusCode::NOT_FOUND, "Node not found"),
        NetsciError::GraphNotFound { .. } => (StatusCode::NOT_FOUND, "Graph not found"),
        NetsciError::SwapsExhausted { .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Randomization exhausted",
        ),
        NetsciError::InvalidParameter { .. } => (StatusCode::BAD_REQUEST, "Invalid parameter"),
        NetsciError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal error"),
    };

    (
        status,
        Json(json!({
            "error": message,
            "details": error.to_string()
        })),
    )
}
