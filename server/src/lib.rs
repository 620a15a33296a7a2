use anyhow::Result;
use axum::{extract::{Query, State}, routing::get, Json, Router};
use cinematch_core::{EngineConfig, IndexStats, Recommendation, RecommendationEngine};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RecommendParams {
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Deserialize)]
pub struct SuggestParams {
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub took_s: f64,
    pub total: usize,
    pub results: Vec<RecommendationHit>,
}

#[derive(Serialize)]
pub struct RecommendationHit {
    pub title: String,
    pub overview: String,
    pub imdb_url: String,
}

impl From<Recommendation> for RecommendationHit {
    fn from(r: Recommendation) -> Self {
        Self { title: r.display_title().to_string(), overview: r.display_overview().to_string(), imdb_url: r.imdb_url() }
    }
}

#[derive(Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RecommendationEngine>,
}

/// Load the catalog, build the index once and serve it.
pub fn build_app<P: AsRef<Path>>(catalog: P, config: EngineConfig) -> Result<Router> {
    let engine = RecommendationEngine::from_csv_path(catalog, config)?;
    Ok(router(Arc::new(engine)))
}

pub fn router(engine: Arc<RecommendationEngine>) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
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
        .route("/recommend/title", get(by_title_handler))
        .route("/recommend/storyline", get(by_storyline_handler))
        .route("/suggest", get(suggest_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { engine })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn by_title_handler(State(state): State<AppState>, Query(params): Query<RecommendParams>) -> Json<RecommendResponse> {
    let start = std::time::Instant::now();
    let recs = state.engine.recommend_by_title(&params.q, clamp_k(params.k.unwrap_or(state.engine.config().default_top_n)));
    Json(respond(params.q, start, recs))
}

pub async fn by_storyline_handler(State(state): State<AppState>, Query(params): Query<RecommendParams>) -> Json<RecommendResponse> {
    let start = std::time::Instant::now();
    let recs = state.engine.recommend_by_storyline(&params.q, clamp_k(params.k.unwrap_or(state.engine.config().default_top_n)));
    Json(respond(params.q, start, recs))
}

pub async fn suggest_handler(State(state): State<AppState>, Query(params): Query<SuggestParams>) -> Json<SuggestResponse> {
    let suggestions = state.engine.suggest_titles(&params.q, clamp_k(params.k.unwrap_or(state.engine.config().max_suggestions)));
    Json(SuggestResponse { query: params.q, suggestions })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> { Json(state.engine.stats()) }

fn clamp_k(k: usize) -> usize { k.clamp(1, 100) }

fn respond(query: String, start: std::time::Instant, recs: Vec<Recommendation>) -> RecommendResponse {
    let results: Vec<RecommendationHit> = recs.into_iter().map(RecommendationHit::from).collect();
    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(query = %query, total = results.len(), took_s, "recommendations served");
    RecommendResponse { query, took_s, total: results.len(), results }
}
