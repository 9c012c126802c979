use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use search_server::{build_app, AppConfig};
use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use tower::ServiceExt;

const DOCUMENTS: &str = r#"{"id": 0, "text": "белый кот и модный ошейник", "ratings": [8, -3]}
{"id": 1, "text": "пушистый кот пушистый хвост", "ratings": [7, 2, 7]}
{"id": 2, "text": "ухоженный пёс выразительные глаза", "ratings": [5, -12, 2, 1]}
{"id": 3, "text": "ухоженный скворец евгений", "status": "banned", "ratings": [9]}
"#;

const RANKED_QUERY: &str = "пушистый ухоженный кот";
const EXCLUDING_QUERY: &str = "кот -хвост";

fn build_test_app(admin_token: Option<&str>) -> Router {
    let dir = tempdir().unwrap();
    let path = dir.path().join("docs.jsonl");
    fs::write(&path, DOCUMENTS).unwrap();
    let config = AppConfig {
        documents: Some(path),
        stop_words: Some("и в на".into()),
        admin_token: admin_token.map(String::from),
    };
    build_app(config).unwrap()
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// Percent-encode every byte so Cyrillic and spaces survive the query string.
fn encode(query: &str) -> String {
    query.bytes().map(|b| format!("%{b:02X}")).collect()
}

fn result_ids(json: &Value) -> Vec<u64> {
    json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn search_returns_ranked_results() {
    let app = build_test_app(None);
    let uri = format!("/search?q={}", encode(RANKED_QUERY));
    let (status, json) = call(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    let ids = result_ids(&json);
    // Document 3 is banned and filtered out by the default status;
    // 0 and 2 score the same and 0 has the higher rating
    assert_eq!(ids, vec![1, 0, 2]);
    assert_eq!(json["results"][0]["rating"].as_i64(), Some(5));
}

#[tokio::test]
async fn search_by_status() {
    let app = build_test_app(None);
    let uri = format!("/search?q={}&status=banned", encode("ухоженный"));
    let (status, json) = call(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"].as_u64(), Some(3));
}

#[tokio::test]
async fn search_with_min_rating() {
    let app = build_test_app(None);
    // Ratings: document 0 averages 2, document 1 averages 5
    let uri = format!("/search?q={}", encode("кот"));
    let (_, json) = call(&app, get(&uri)).await;
    assert_eq!(result_ids(&json), vec![1, 0]);

    let (status, json) = call(&app, get(&format!("{uri}&min_rating=3"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result_ids(&json), vec![1]);

    let (_, json) = call(&app, get(&format!("{uri}&min_rating=6"))).await;
    assert!(result_ids(&json).is_empty());
}

#[tokio::test]
async fn invalid_query_is_bad_request() {
    let app = build_test_app(None);
    let (status, json) = call(&app, get("/search?q=cat%20--dog")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("invalid argument"));
}

#[tokio::test]
async fn match_reports_exclusion() {
    let app = build_test_app(None);
    let uri = format!("/match?q={}&id=1", encode(EXCLUDING_QUERY));
    let (status, json) = call(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["excluded"], Value::Bool(true));
    assert!(json["words"].as_array().unwrap().is_empty());

    let (status, _) = call(&app, get("/match?q=cat&id=42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn documents_keep_insertion_order() {
    let app = build_test_app(None);
    let (status, json) = call(&app, get("/documents")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"].as_u64(), Some(4));
    let (_, json) = call(&app, get("/documents/2")).await;
    assert_eq!(json["document_id"].as_i64(), Some(2));
    let (status, _) = call(&app, get("/documents/4")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn adding_documents_requires_token() {
    let app = build_test_app(Some("secret"));
    let body = r#"{"id": 7, "text": "cat with hat", "ratings": [1]}"#;
    let post = |token: &str| {
        Request::post("/documents")
            .header("content-type", "application/json")
            .header("X-ADMIN-TOKEN", token)
            .body(Body::from(body))
            .unwrap()
    };

    let (status, _) = call(&app, post("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = call(&app, post("secret")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["count"].as_u64(), Some(5));

    let (status, _) = call(&app, post("secret")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, json) = call(&app, get("/search?q=hat")).await;
    assert_eq!(json["results"][0]["id"].as_u64(), Some(7));
}
