use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::{
    catalog::Catalog,
    middleware::{make_span_with_request_id, request_id_middleware},
    services::{GenreIndex, PosterResolver, Recommender},
};

pub mod genres;
pub mod home;
pub mod recommendations;

/// Shared application state
///
/// Everything here is read-only after startup, so handlers share it without locking.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Recommender,
    pub genres: GenreIndex,
    pub posters: PosterResolver,
    /// Number of leading catalog entries shown as trending
    pub trending_count: usize,
}

impl AppState {
    pub fn new(catalog: Catalog, posters: PosterResolver, trending_count: usize) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            recommender: Recommender::new(catalog.clone()),
            genres: GenreIndex::new(catalog.clone()),
            catalog,
            posters,
            trending_count,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/home", get(home::home))
        .route("/recommend", get(recommendations::recommend))
        .route("/genres", get(genres::list_genres))
        .route("/movies-by-genre", get(genres::movies_by_genre))
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "catalog": state.catalog.status(),
        })),
    )
}
