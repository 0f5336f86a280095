use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::GenreMoviesResponse,
    routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    genre: Option<String>,
}

/// Handler listing genres present in the catalog
pub async fn list_genres(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .genres
            .list_genres()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// Handler for genre filter endpoint
pub async fn movies_by_genre(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenreQuery>,
) -> AppResult<Json<GenreMoviesResponse>> {
    let genre = params
        .genre
        .ok_or_else(|| AppError::InvalidInput("No genre provided".to_string()))?;

    let movies = state.genres.filter_by_genre(&genre)?;

    tracing::info!(genre = %genre, matches = movies.len(), "Genre filter completed");

    Ok(Json(GenreMoviesResponse {
        movies: state.posters.cards(&movies).await,
    }))
}
