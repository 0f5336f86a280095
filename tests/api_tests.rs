use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

use cinematch_api::{
    catalog::{builtin_sample, Catalog, CatalogSource},
    error::{AppError, AppResult},
    models::{GenreMoviesResponse, HomeResponse, Movie, RecommendationResponse},
    routes::{create_router, AppState},
    services::{posters::PLACEHOLDER_POSTER_URL, PosterResolver, PosterSource},
};

const IMAGE_BASE: &str = "https://img.test/w500";

/// Poster service that knows a fixed set of IDs and titles
struct FakePosters;

#[async_trait::async_trait]
impl PosterSource for FakePosters {
    async fn poster_by_id(&self, movie_id: u64) -> AppResult<Option<String>> {
        match movie_id {
            1 | 278 => Ok(Some(format!("/id-{}.jpg", movie_id))),
            _ => Err(AppError::ExternalApi("status 404".to_string())),
        }
    }

    async fn poster_by_title(&self, title: &str) -> AppResult<Option<String>> {
        match title {
            "C" => Ok(Some("/title-c.jpg".to_string())),
            _ => Ok(None),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn scenario_catalog() -> Catalog {
    Catalog::new(
        vec![
            Movie::new(1, "A", Some("Drama")),
            Movie::new(2, "B", Some("Action")),
            Movie::new(3, "C", Some("Drama Crime")),
        ],
        vec![
            vec![1.0, 0.2, 0.8],
            vec![0.2, 1.0, 0.1],
            vec![0.8, 0.1, 1.0],
        ],
        CatalogSource::BuiltinSample,
    )
    .unwrap()
}

fn create_test_server(catalog: Catalog) -> TestServer {
    let posters = PosterResolver::new(
        Arc::new(FakePosters),
        IMAGE_BASE.to_string(),
        Duration::from_secs(2),
    );
    let state = Arc::new(AppState::new(catalog, posters, 5));
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check_reports_catalog() {
    let server = create_test_server(builtin_sample());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["catalog"]["source"], "builtin_sample");
    assert_eq!(body["catalog"]["movies"], 8);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server(builtin_sample());
    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn test_recommend_ranks_and_resolves_posters() {
    let server = create_test_server(scenario_catalog());

    let response = server
        .get("/api/v1/recommend")
        .add_query_param("movie", "A")
        .await;
    response.assert_status_ok();

    let result: RecommendationResponse = response.json();
    assert_eq!(result.searched_movie.title, "A");
    assert_eq!(
        result.searched_movie.poster_url,
        format!("{}/id-1.jpg", IMAGE_BASE)
    );

    let titles: Vec<&str> = result
        .recommendations
        .iter()
        .map(|c| c.title.as_str())
        .collect();
    assert_eq!(titles, vec!["C", "B"]);

    // C is unknown by ID but found by title; B is unknown either way
    assert_eq!(
        result.recommendations[0].poster_url,
        format!("{}/title-c.jpg", IMAGE_BASE)
    );
    assert_eq!(result.recommendations[1].poster_url, PLACEHOLDER_POSTER_URL);
}

#[tokio::test]
async fn test_recommend_unknown_title_is_404() {
    let server = create_test_server(scenario_catalog());

    let response = server
        .get("/api/v1/recommend")
        .add_query_param("movie", "Z")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_recommend_single_movie_is_empty_not_404() {
    let catalog = Catalog::new(
        vec![Movie::new(1, "Alone", None)],
        vec![vec![1.0]],
        CatalogSource::BuiltinSample,
    )
    .unwrap();
    let server = create_test_server(catalog);

    let response = server
        .get("/api/v1/recommend")
        .add_query_param("movie", "Alone")
        .await;
    response.assert_status_ok();

    let result: RecommendationResponse = response.json();
    assert!(result.recommendations.is_empty());
}

#[tokio::test]
async fn test_recommend_missing_title_is_400() {
    let server = create_test_server(scenario_catalog());

    server
        .get("/api/v1/recommend")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/api/v1/recommend")
        .add_query_param("movie", "")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_movies_by_genre() {
    let server = create_test_server(scenario_catalog());

    let response = server
        .get("/api/v1/movies-by-genre")
        .add_query_param("genre", "drama")
        .await;
    response.assert_status_ok();

    let result: GenreMoviesResponse = response.json();
    let titles: Vec<&str> = result.movies.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn test_movies_by_genre_missing_genre_is_400() {
    let server = create_test_server(scenario_catalog());

    server
        .get("/api/v1/movies-by-genre")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_genres() {
    let server = create_test_server(scenario_catalog());

    let response = server.get("/api/v1/genres").await;
    response.assert_status_ok();

    let genres: Vec<String> = response.json();
    assert_eq!(genres, vec!["Action", "Drama"]);
}

#[tokio::test]
async fn test_home_lists_titles_and_trending() {
    let server = create_test_server(builtin_sample());

    let response = server.get("/api/v1/home").await;
    response.assert_status_ok();

    let home: HomeResponse = response.json();
    assert_eq!(home.genres, vec!["Action", "Drama", "Sci-Fi", "Thriller"]);
    assert_eq!(home.movies.len(), 8);
    assert_eq!(home.movies[0], "Forrest Gump");

    let trending: Vec<&str> = home.trending.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        trending,
        vec![
            "The Shawshank Redemption",
            "The Godfather",
            "The Dark Knight",
            "Pulp Fiction",
            "Forrest Gump"
        ]
    );
    assert_eq!(home.trending[0].poster_url, format!("{}/id-278.jpg", IMAGE_BASE));
    assert_eq!(home.trending[1].poster_url, PLACEHOLDER_POSTER_URL);
}
