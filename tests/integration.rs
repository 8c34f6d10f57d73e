use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use netsci_toolkit::{
    config::ServiceConfig,
    randomization::RandomizationConfig,
    server::{create_router, AppState},
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Create a router backed by a fresh in-memory graph store
fn create_test_app() -> Router {
    create_router(AppState::new(ServiceConfig::default()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })
        .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Router should not fail");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response should be JSON")
    };
    (status, json)
}

async fn upload(app: &Router, graph: Value) -> String {
    let (status, body) = send(app, Method::POST, "/graphs", Some(graph)).await;
    assert_eq!(status, StatusCode::CREATED, "upload failed: {}", body);
    body["graph_id"]
        .as_str()
        .expect("graph_id should be a string")
        .to_string()
}

#[tokio::test]
async fn test_health() {
    let app = create_test_app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_upload_and_summary() {
    let app = create_test_app();
    let id = upload(
        &app,
        json!({
            "directed": true,
            "nodes": ["isolated"],
            "edges": [["a", "b"], ["b", "c"], ["a", "b"]]
        }),
    )
    .await;

    let (status, body) = send(&app, Method::GET, &format!("/graphs/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["directed"], true);
    assert_eq!(body["nodes"], 4);
    assert_eq!(body["edges"], 2);
}

#[tokio::test]
async fn test_betweenness_on_path_graph() {
    let app = create_test_app();
    let id = upload(
        &app,
        json!({ "edges": [["s", "a"], ["a", "b"], ["b", "t"]] }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/graphs/{}/betweenness", id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metric"], "indicator_betweenness");
    assert_eq!(body["nodes_processed"], 4);
    assert_eq!(body["scores"]["a"].as_f64(), Some(4.0));
    assert_eq!(body["scores"]["b"].as_f64(), Some(4.0));
    assert_eq!(body["scores"]["s"].as_f64(), Some(0.0));
    assert_eq!(body["scores"]["t"].as_f64(), Some(0.0));
}

#[tokio::test]
async fn test_betweenness_parallel_path_matches() {
    let app = create_router(AppState::new(ServiceConfig {
        parallel_threshold: 1,
        ..ServiceConfig::default()
    }));
    let id = upload(
        &app,
        json!({ "edges": [["s", "a"], ["a", "b"], ["b", "t"]] }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/graphs/{}/betweenness", id),
        Some(json!({ "endpoints": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["metric"], "indicator_betweenness_endpoints");
    // 4 interior credits plus 6 pairs with a as an endpoint
    assert_eq!(body["scores"]["a"].as_f64(), Some(10.0));
    assert_eq!(body["scores"]["s"].as_f64(), Some(6.0));
}

#[tokio::test]
async fn test_shortest_paths() {
    let app = create_test_app();
    let id = upload(
        &app,
        json!({
            "edges": [["s", "x"], ["s", "y"], ["x", "t"], ["y", "t"]],
            "nodes": ["far"]
        }),
    )
    .await;

    let uri = format!("/graphs/{}/shortest-paths", id);
    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "source": "s" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["dist"]["t"], 2);
    assert_eq!(body["dist"]["far"], -1);
    assert_eq!(body["path_counts"]["t"], 2.0);
    assert_eq!(body["path_counts"]["s"], 1.0);
    assert_eq!(body["predecessors"]["t"], json!(["x", "y"]));

    let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "source": "nope" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_core_is_stored() {
    let app = create_test_app();
    let id = upload(
        &app,
        json!({
            "directed": true,
            "edges": [["a", "b"], ["b", "c"], ["c", "a"], ["tail", "a"], ["c", "sink"]]
        }),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/graphs/{}/core", id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nodes"], json!(["a", "b", "c"]));
    assert_eq!(body["edges"].as_array().map(Vec::len), Some(3));

    let core_id = body["graph_id"].as_str().expect("core should be stored");
    let (status, summary) = send(&app, Method::GET, &format!("/graphs/{}", core_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["nodes"], 3);
}

#[tokio::test]
async fn test_randomize_preserves_degrees() {
    let app = create_test_app();
    let edges: Vec<Value> = (0..20)
        .flat_map(|i| {
            vec![
                json!([format!("n{}", i), format!("n{}", (i + 1) % 20)]),
                json!([format!("n{}", i), format!("n{}", (i + 2) % 20)]),
            ]
        })
        .collect();
    let id = upload(&app, json!({ "edges": edges })).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/graphs/{}/randomize", id),
        Some(json!({ "n_iter": 30, "fail_max": 200, "seed": 11, "store_result": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "randomize failed: {}", body);
    assert!(body["graph_id"].is_null());

    let edges = body["edges"].as_array().expect("edges should be an array");
    assert_eq!(edges.len(), 40);
    let mut degree = std::collections::HashMap::new();
    for edge in edges {
        for end in edge.as_array().expect("edge should be a pair") {
            *degree.entry(end.as_str().unwrap_or_default().to_string()).or_insert(0) += 1;
        }
    }
    assert_eq!(degree.len(), 20);
    assert!(degree.values().all(|&d| d == 4));
}

#[tokio::test]
async fn test_randomize_triangle_is_exhausted() {
    let app = create_test_app();
    let id = upload(&app, json!({ "edges": [["a", "b"], ["b", "c"], ["c", "a"]] })).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/graphs/{}/randomize", id),
        Some(json!({ "n_iter": 5, "fail_max": 20 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Randomization exhausted");
}

#[tokio::test]
async fn test_randomize_uses_configured_budget() {
    let config = ServiceConfig {
        randomization: RandomizationConfig {
            n_iter: 7,
            fail_max: 3,
        },
        ..ServiceConfig::default()
    };
    let app = create_router(AppState::new(config));
    let id = upload(&app, json!({ "edges": [["a", "b"], ["b", "c"], ["c", "a"]] })).await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/graphs/{}/randomize", id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let details = body["details"].as_str().expect("details should be a string");
    assert!(details.contains("reached 3 consecutive"), "{}", details);
    assert!(details.contains("0 of 7 swaps"), "{}", details);
}

#[tokio::test]
async fn test_unknown_graph_and_delete() {
    let app = create_test_app();
    let missing = format!("/graphs/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, Method::GET, &missing, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = upload(&app, json!({ "edges": [["a", "b"]] })).await;
    let uri = format!("/graphs/{}", id);
    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_log_binned_pdf() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/stats/log-binned-pdf",
        Some(json!({ "values": [2.0, 2.0, 2.0] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["centers"], json!([2.0]));
    assert_eq!(body["density"], json!([1.0]));

    let (status, _) = send(
        &app,
        Method::POST,
        "/stats/log-binned-pdf",
        Some(json!({ "values": [1.0, 10.0], "nbins": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
