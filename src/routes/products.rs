use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::core::{ProductSearch, SearchError};
use crate::models::{ErrorResponse, HealthResponse, PriceRangeQuery, SearchResponse, SuperSearchRequest, TextQuery};
use crate::services::CatalogStore;

/// Application state shared across all handlers
pub struct AppState<S> {
    pub search: Arc<ProductSearch<S>>,
    pub search_timeout: Option<Duration>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            search: Arc::clone(&self.search),
            search_timeout: self.search_timeout,
        }
    }
}

/// Configure all product routes for a catalog backend
pub fn configure<S: CatalogStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check::<S>))
        .route("/products/search", web::get().to(find_by_description::<S>))
        .route("/products/similar", web::get().to(find_by_similar_name_description::<S>))
        .route("/products/price", web::get().to(search_by_price_range::<S>))
        .route("/products/tag/{tag}", web::get().to(search_by_tag::<S>))
        .route("/products/super-search", web::post().to(super_search::<S>));
}

/// Token cancelled once `timeout` elapses
fn deadline_token(timeout: Option<Duration>) -> CancellationToken {
    let token = CancellationToken::new();
    if let Some(timeout) = timeout {
        let guard = token.clone();
        actix_web::rt::spawn(async move {
            tokio::time::sleep(timeout).await;
            guard.cancel();
        });
    }
    token
}

fn error_response(context: &str, err: &SearchError) -> HttpResponse {
    match err {
        SearchError::Cancelled => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "Search timed out".to_string(),
            message: err.to_string(),
            status_code: 503,
        }),
        _ => {
            tracing::error!("{}: {}", context, err);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: context.to_string(),
                message: err.to_string(),
                status_code: 500,
            })
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check<S: CatalogStore>(state: web::Data<AppState<S>>) -> impl Responder {
    let db_healthy = state.search.store().health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// GET /api/v1/products/search?q={text}
async fn find_by_description<S: CatalogStore>(
    state: web::Data<AppState<S>>,
    query: web::Query<TextQuery>,
) -> impl Responder {
    match state.search.find_by_description(&query.q).await {
        Ok(products) => HttpResponse::Ok().json(SearchResponse::from(products)),
        Err(e) => error_response("Failed to search descriptions", &e),
    }
}

/// GET /api/v1/products/similar?q={text}
async fn find_by_similar_name_description<S: CatalogStore>(
    state: web::Data<AppState<S>>,
    query: web::Query<TextQuery>,
) -> impl Responder {
    let cancel = deadline_token(state.search_timeout);

    match state.search.find_by_similar_name_description(&query.q, &cancel).await {
        Ok(results) => {
            tracing::info!("Similar search {:?} returned {} products", query.q, results.len());
            HttpResponse::Ok().json(SearchResponse::from(results.into_vec()))
        }
        Err(e) => error_response("Failed to run similar search", &e),
    }
}

/// GET /api/v1/products/price?min={min}&max={max}
async fn search_by_price_range<S: CatalogStore>(
    state: web::Data<AppState<S>>,
    query: web::Query<PriceRangeQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    match state.search.search_by_price_range(query.min, query.max).await {
        Ok(products) => HttpResponse::Ok().json(SearchResponse::from(products)),
        Err(e) => error_response("Failed to search by price", &e),
    }
}

/// GET /api/v1/products/tag/{tag}
async fn search_by_tag<S: CatalogStore>(
    state: web::Data<AppState<S>>,
    tag: web::Path<String>,
) -> impl Responder {
    match state.search.search_by_tag(&tag).await {
        Ok(products) => HttpResponse::Ok().json(SearchResponse::from(products)),
        Err(e) => error_response("Failed to search by tag", &e),
    }
}

/// Combined search endpoint
///
/// POST /api/v1/products/super-search
///
/// Request body:
/// ```json
/// {
///   "minPrice": 0.0,
///   "maxPrice": 50.0,
///   "tag": "accessories",
///   "query": "dragon shield"
/// }
/// ```
/// A missing tag, an empty tag or the legacy `"NULL"` all mean no tag filter.
async fn super_search<S: CatalogStore>(
    state: web::Data<AppState<S>>,
    req: web::Json<SuperSearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for super_search request: {:?}", errors);
        return validation_failed(errors);
    }

    let cancel = deadline_token(state.search_timeout);
    let tag = req.tag_filter();

    match state
        .search
        .super_search(req.min_price, req.max_price, tag, &req.query, &cancel)
        .await
    {
        Ok(results) => {
            tracing::info!(
                "Super search {:?} (price {}..={}, tag {:?}) returned {} products",
                req.query,
                req.min_price,
                req.max_price,
                tag,
                results.len()
            );
            HttpResponse::Ok().json(SearchResponse::from(results.into_vec()))
        }
        Err(e) => error_response("Failed to run super search", &e),
    }
}
