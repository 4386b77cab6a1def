use anyhow::Result;
use axum::{extract::{Query, State}, http::{HeaderMap, StatusCode}, response::{IntoResponse, Response}, routing::{get, post}, Json, Router};
use quickfind_core::{highlight, index_articles, load_articles, CorpusOptions, Document, SearchConfig, SearchIndex, SharedIndex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<ResultItem>,
}

#[derive(Serialize)]
pub struct ResultItem {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    /// Snippet with the first query match wrapped in `<em>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<String>,
}

#[derive(Deserialize)]
pub struct DocParams {
    pub id: String,
}

#[derive(Deserialize)]
pub struct RemoveRequest {
    pub id: String,
}

#[derive(Clone)]
pub struct AppState {
    pub index: SharedIndex,
    pub admin_token: Option<String>,
}

/// Load a corpus from disk into a fresh shared index.
pub fn load_index(input: impl AsRef<Path>, opts: CorpusOptions, config: SearchConfig) -> Result<SharedIndex> {
    let articles = load_articles(input)?;
    let mut index = SearchIndex::with_config(config);
    index_articles(&mut index, &articles, opts);
    Ok(SharedIndex::new(index))
}

pub fn build_app(index: SharedIndex) -> Router {
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    build_app_with_state(AppState { index, admin_token })
}

pub fn build_app_with_state(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc", get(doc_handler))
        .route("/index/batch", post(index_batch))
        .route("/index/remove", post(index_remove))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let index = state.index.clone();
    let q = params.q.clone();
    // search is CPU-bound; keep it off the async workers
    let hits = tokio::task::spawn_blocking(move || index.search(&q))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("search task failed: {e}")))?;

    let results = hits
        .into_iter()
        .map(|hit| {
            let highlighted = hit
                .snippet
                .as_ref()
                .map(|s| highlight(s, &params.q))
                .filter(|h| h.has_match())
                .map(|h| h.render("<em>", "</em>"));
            ResultItem { id: hit.id, title: hit.title, snippet: hit.snippet, highlighted }
        })
        .collect::<Vec<_>>();
    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %params.q, hits = results.len(), took_s, "search");
    Ok(Json(SearchResponse { query: params.q, took_s, results }))
}

pub async fn doc_handler(State(state): State<AppState>, Query(params): Query<DocParams>) -> Response {
    match state.index.get(&params.id) {
        Some(doc) => Json(doc).into_response(),
        None => Json(serde_json::json!({ "error": "not found" })).into_response(),
    }
}

async fn index_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(docs): Json<Vec<Document>>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let indexed = state.index.index_batch(docs).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    tracing::info!(indexed, total = state.index.len(), "batch indexed");
    Ok(Json(serde_json::json!({ "indexed": indexed })))
}

async fn index_remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RemoveRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let removed = state.index.remove(&req.id);
    Ok(Json(serde_json::json!({ "removed": removed })))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
