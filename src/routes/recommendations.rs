use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Movie, RecommendationResponse},
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    movie: Option<String>,
}

/// Handler for recommendation endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let title = params
        .movie
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("No movie title provided".to_string()))?;

    let searched = state
        .catalog
        .position(&title)
        .and_then(|idx| state.catalog.get(idx))
        .ok_or_else(|| AppError::NotFound(format!("Movie '{}' not found", title)))?;

    let recommendations = state.recommender.recommend(&title)?;

    tracing::info!(
        request_id = %request_id,
        movie = %title,
        recommendations = recommendations.len(),
        "Resolving recommendation posters"
    );

    let movies: Vec<&Movie> = std::iter::once(searched).chain(recommendations).collect();
    let mut cards = state.posters.cards(&movies).await.into_iter();

    let searched_movie = cards
        .next()
        .ok_or_else(|| AppError::Internal("Poster resolution returned no cards".to_string()))?;

    Ok(Json(RecommendationResponse {
        searched_movie,
        recommendations: cards.collect(),
    }))
}
