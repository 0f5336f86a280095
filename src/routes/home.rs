use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    models::{HomeResponse, Movie},
    routes::AppState,
};

/// Handler for the landing page data: genres, searchable titles and trending posters
pub async fn home(State(state): State<Arc<AppState>>) -> Json<HomeResponse> {
    let genres: Vec<String> = state
        .genres
        .list_genres()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut movies: Vec<String> = state
        .catalog
        .movies()
        .iter()
        .map(|m| m.title.clone())
        .collect();
    movies.sort();

    // Trending is simply the head of the catalog
    let trending: Vec<&Movie> = state
        .catalog
        .movies()
        .iter()
        .take(state.trending_count)
        .collect();

    Json(HomeResponse {
        genres,
        movies,
        trending: state.posters.cards(&trending).await,
    })
}
