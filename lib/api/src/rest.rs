use crate::config::ApiState;
use actix_cors::Cors;
use actix_web::{http::StatusCode, web, App, HttpResponse, HttpServer, ResponseError};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Arc;
use tenderx_core::{Document, DocumentId, Query, Vector};
use tenderx_similarity::{Preference, PreferenceError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] tenderx_core::Error),

    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error("{0}")]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        tracing::warn!(error = %self, "rejected request");
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}

type ApiResult = Result<HttpResponse, ApiError>;

#[derive(Deserialize)]
struct VectorizeRequest {
    text: String,
}

#[derive(Deserialize)]
struct SimilarRequest {
    vector: Option<Vec<f32>>,
    text: Option<String>,
    document: Option<Document>,
    #[serde(default)]
    pool: Vec<Document>,
    k: Option<usize>,
    #[serde(default)]
    exclude_ids: Vec<DocumentId>,
}

#[derive(Deserialize)]
struct RecommendRequest {
    preference: Preference,
    #[serde(default)]
    pool: Vec<Document>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct TrendingRequest {
    #[serde(default)]
    pool: Vec<Document>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    top_k: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(state: Arc<ApiState>) -> std::io::Result<()> {
        let host = state.config.host.clone();
        let port = state.config.port;
        tracing::info!("REST API listening on {}:{}", host, port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(state.clone()))
                .configure(Self::configure)
        })
        .bind((host.as_str(), port))?
        .run()
        .await
    }

    /// Route table, shared by the server and tests
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::JsonConfig::default().limit(32 * 1024 * 1024))
            .route("/health", web::get().to(health))
            .route("/vectorize", web::post().to(vectorize))
            .route("/similar", web::post().to(similar))
            .route("/recommend", web::post().to(recommend))
            .route("/trending", web::post().to(trending))
            .route("/cache/stats", web::get().to(cache_stats));
    }
}

fn check_pool(state: &ApiState, pool: &[Document]) -> Result<(), ApiError> {
    if pool.len() > state.config.max_pool_size {
        return Err(tenderx_core::Error::PoolTooLarge {
            size: pool.len(),
            limit: state.config.max_pool_size,
        }
        .into());
    }
    Ok(())
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn vectorize(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<VectorizeRequest>,
) -> ApiResult {
    let vector = state.vectorizer.vectorize(&req.text);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": {
            "dim": vector.dim(),
            "vector": vector,
        }
    })))
}

async fn similar(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<SimilarRequest>,
) -> ApiResult {
    let req = req.into_inner();
    check_pool(&state, &req.pool)?;

    let k = req.k.unwrap_or(state.config.ranker.default_limit);
    let exclude: HashSet<DocumentId> = req.exclude_ids.into_iter().collect();

    let text_vector;
    let raw_vector;
    let query = if let Some(document) = &req.document {
        Query::Document(document)
    } else if let Some(data) = req.vector {
        if data.len() != state.vectorizer.dim() {
            return Err(tenderx_core::Error::InvalidDimension {
                expected: state.vectorizer.dim(),
                actual: data.len(),
            }
            .into());
        }
        raw_vector = Vector::new(data);
        Query::Vector(&raw_vector)
    } else if let Some(text) = &req.text {
        text_vector = state.vectorizer.vectorize(text);
        Query::Vector(&text_vector)
    } else {
        return Err(ApiError::BadRequest(
            "Either 'document', 'vector' or 'text' must be provided".to_string(),
        ));
    };

    let results = state
        .index
        .find_similar(query, &req.pool, &state.vectorizer, k, &exclude);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": results
    })))
}

async fn recommend(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<RecommendRequest>,
) -> ApiResult {
    let req = req.into_inner();
    req.preference.validate()?;
    check_pool(&state, &req.pool)?;

    let limit = req.limit.unwrap_or(state.config.ranker.default_limit);
    let recommendations = state
        .ranker
        .recommend_with_stats(&req.preference, &req.pool, limit);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": recommendations.items,
        "stats": recommendations.stats,
    })))
}

async fn trending(
    state: web::Data<Arc<ApiState>>,
    req: web::Json<TrendingRequest>,
) -> ApiResult {
    let req = req.into_inner();
    check_pool(&state, &req.pool)?;
    state.trending.validate_window(req.window_start, req.window_end)?;

    let top_k = req.top_k.unwrap_or(state.trending.config().default_top_k);
    let report = state
        .trending
        .report(&req.pool, req.window_start, req.window_end, top_k);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": report
    })))
}

async fn cache_stats(state: web::Data<Arc<ApiState>>) -> HttpResponse {
    match &state.cache {
        Some(cache) => HttpResponse::Ok().json(serde_json::json!({
            "result": cache.stats()
        })),
        None => HttpResponse::NotFound().json(serde_json::json!({
            "error": "Vector cache is disabled"
        })),
    }
}
