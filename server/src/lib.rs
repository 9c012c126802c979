use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::RwLock;
use search_core::input::{parse_jsonl, InputDocument};
use search_core::{Document, DocumentId, DocumentStatus, SearchServer};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod errors;

use errors::ApiError;

/// Startup configuration of the HTTP surface.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// JSONL file loaded into the index at startup
    pub documents: Option<PathBuf>,
    /// Space separated stop words
    pub stop_words: Option<String>,
    /// Token required by write endpoints; writes are refused when unset
    pub admin_token: Option<String>,
}

impl AppConfig {
    /// Fill the admin token from `ADMIN_TOKEN` when not set explicitly.
    pub fn with_env(mut self) -> Self {
        if self.admin_token.is_none() {
            self.admin_token = std::env::var("ADMIN_TOKEN").ok();
        }
        self
    }
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<SearchServer>>,
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub status: DocumentStatus,
    pub min_rating: Option<i32>,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub count: usize,
    pub results: Vec<Document>,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
    pub id: DocumentId,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub document_id: DocumentId,
    pub status: DocumentStatus,
    pub words: Vec<String>,
    pub excluded: bool,
}

#[derive(Serialize)]
pub struct DocumentList {
    pub count: usize,
    pub ids: Vec<DocumentId>,
}

#[derive(Serialize)]
pub struct DocumentPosition {
    pub index: usize,
    pub document_id: DocumentId,
}

pub fn build_app(config: AppConfig) -> Result<Router> {
    let mut engine = match &config.stop_words {
        Some(text) => SearchServer::with_stop_words_text(text)?,
        None => SearchServer::new(),
    };
    if let Some(path) = &config.documents {
        let docs = parse_jsonl(BufReader::new(File::open(path)?))?;
        for doc in &docs {
            if let Err(e) = doc.add_to(&mut engine) {
                tracing::warn!(id = doc.id, error = %e, "document rejected");
            }
        }
        tracing::info!(
            path = %path.display(),
            documents = engine.document_count(),
            "documents loaded"
        );
    }
    let app_state = AppState {
        engine: Arc::new(RwLock::new(engine)),
        admin_token: config.admin_token,
    };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let allow_origin = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<HeaderValue> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                AllowOrigin::any()
            } else {
                AllowOrigin::list(origins)
            }
        }
        Err(_) => AllowOrigin::any(),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/match", get(match_handler))
        .route("/documents", get(list_documents).post(add_document))
        .route("/documents/:index", get(document_at))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let status = params.status;
    let min_rating = params.min_rating.unwrap_or(i32::MIN);
    let results = state
        .engine
        .read()
        .find_top_documents_with(&params.q, |_, doc_status, rating| {
            doc_status == status && rating >= min_rating
        })?;
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse {
        query: params.q,
        took_s: elapsed.as_secs_f64(),
        count: results.len(),
        results,
    }))
}

pub async fn match_handler(
    State(state): State<AppState>,
    Query(params): Query<MatchParams>,
) -> Result<Json<MatchResponse>, ApiError> {
    let (outcome, status) = state.engine.read().match_document_outcome(&params.q, params.id)?;
    let excluded = outcome.is_excluded();
    Ok(Json(MatchResponse {
        document_id: params.id,
        status,
        words: outcome.into_words(),
        excluded,
    }))
}

pub async fn list_documents(State(state): State<AppState>) -> Json<DocumentList> {
    let engine = state.engine.read();
    Json(DocumentList { count: engine.document_count(), ids: engine.document_ids().collect() })
}

pub async fn document_at(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<DocumentPosition>, ApiError> {
    let document_id = state.engine.read().document_id(index)?;
    Ok(Json(DocumentPosition { index, document_id }))
}

async fn add_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(doc): Json<InputDocument>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    authorize(&state, &headers)?;
    let mut engine = state.engine.write();
    doc.add_to(&mut engine)?;
    tracing::info!(id = doc.id, documents = engine.document_count(), "document added");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "document_id": doc.id, "count": engine.document_count() })),
    ))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(ApiError::Unauthorized("ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token".into()))
    }
}
