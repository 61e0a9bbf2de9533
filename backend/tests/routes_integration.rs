//! HTTP API tests driven through the router with `tower::ServiceExt::oneshot`.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use insight_dash::db::{AnalysisRepository, LocalRepository};
use insight_dash::http::{create_router, AppState};

use support::{builtin_engine, retail_payload_json};

fn app_with(repo: Arc<LocalRepository>) -> Router {
    let repository: Arc<dyn AnalysisRepository> = repo;
    create_router(AppState::new(repository, builtin_engine()))
}

fn app() -> Router {
    app_with(Arc::new(LocalRepository::new()))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "connected");
}

#[tokio::test]
async fn test_health_reports_unhealthy_store() {
    let repo = Arc::new(LocalRepository::new());
    repo.set_healthy(false);
    let (status, body) = send(app_with(repo), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["storage"], "disconnected");
}

#[tokio::test]
async fn test_list_industries() {
    let (status, body) = send(app(), Method::GET, "/v1/industries", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);

    let keys: Vec<&str> = body["industries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["finance", "healthcare", "manufacturing", "retail"]);
}

#[tokio::test]
async fn test_resolve_headers() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/v1/industries/manufacturing/headers",
        Some(json!({"headers": ["Unit Cost", "banana", "cost"]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mapped"][0]["header"], "Unit Cost");
    assert_eq!(body["mapped"][0]["field"], "costCol");
    assert_eq!(body["duplicates"][0]["header"], "cost");
    assert_eq!(body["unresolved"], json!(["banana"]));
}

#[tokio::test]
async fn test_resolve_headers_unknown_industry() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/v1/industries/aerospace/headers",
        Some(json!({"headers": ["cost"]})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_INDUSTRY");
}

#[tokio::test]
async fn test_render_inline_payload() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/v1/industries/retail/dashboard",
        Some(json!({"payload": {"insights": {"kpis": {"total_sales": 1234.5678}}}})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let section = &body["sections"][0];
    assert_eq!(section["key"], "kpis");
    assert_eq!(section["decision"]["strategy"], "stat-cards");
    assert_eq!(section["data"]["kind"], "stat-cards");
    assert_eq!(section["data"]["cards"][0]["label"], "Total Sales");
    assert!(body.get("summary").is_none());
}

#[tokio::test]
async fn test_render_rejects_bad_window() {
    let (status, body) = send(
        app(),
        Method::POST,
        "/v1/industries/retail/dashboard",
        Some(json!({"payload": {}, "window": "fortnight"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_stored_analysis_dashboard() {
    let repo = Arc::new(LocalRepository::new());

    let (status, info) = send(
        app_with(Arc::clone(&repo)),
        Method::PUT,
        "/v1/analyses/sales-q1",
        Some(retail_payload_json()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["file_id"], "sales-q1");
    assert_eq!(info["summary_fields"], 3);

    let (status, view) = send(
        app_with(Arc::clone(&repo)),
        Method::GET,
        "/v1/analyses/sales-q1/dashboard?industry=Retail&window=3&summary=true",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["industry"], "retail");
    assert_eq!(view["summary"].as_array().unwrap().len(), 3);

    let trends = view["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["key"] == "trends")
        .unwrap();
    assert_eq!(trends["decision"]["strategy"], "area");
    assert_eq!(trends["data"]["records"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_dashboard_for_missing_analysis() {
    let (status, body) = send(
        app(),
        Method::GET,
        "/v1/analyses/nope/dashboard?industry=retail",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_analysis_lifecycle() {
    let repo = Arc::new(LocalRepository::new());

    let (status, info) = send(
        app_with(Arc::clone(&repo)),
        Method::POST,
        "/v1/analyses",
        Some(retail_payload_json()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let file_id = info["file_id"].as_str().unwrap().to_string();

    let (status, list) = send(app_with(Arc::clone(&repo)), Method::GET, "/v1/analyses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["total"], 1);
    assert_eq!(list["analyses"][0]["file_id"], file_id.as_str());

    let uri = format!("/v1/analyses/{}", file_id);
    let (status, payload) = send(app_with(Arc::clone(&repo)), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["insights"]["kpis"]["orders"], 30);

    let (status, _) = send(app_with(Arc::clone(&repo)), Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(app_with(Arc::clone(&repo)), Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_padded_file_id_round_trips() {
    let repo = Arc::new(LocalRepository::new());

    let (status, info) = send(
        app_with(Arc::clone(&repo)),
        Method::PUT,
        "/v1/analyses/%20q1",
        Some(retail_payload_json()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["file_id"], "q1");

    let (status, _) = send(app_with(Arc::clone(&repo)), Method::GET, "/v1/analyses/%20q1", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app_with(Arc::clone(&repo)),
        Method::GET,
        "/v1/analyses/%20q1/dashboard?industry=retail",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
