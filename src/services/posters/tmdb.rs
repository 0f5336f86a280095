/// TMDB poster source
///
/// API Flow:
/// 1. By ID: /movie/{id} → `poster_path`
/// 2. By title: /search/movie?query=… → `results[0].poster_path`
use crate::{
    error::{AppError, AppResult},
    models::{TmdbMovie, TmdbSearchResponse},
    services::posters::PosterSource,
};
use reqwest::{Client as HttpClient, Response};
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    /// Creates a client whose requests give up after `timeout`
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Converts non-success statuses into errors
    async fn check_status(response: Response) -> AppResult<Response> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl PosterSource for TmdbClient {
    async fn poster_by_id(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let movie: TmdbMovie = Self::check_status(response).await?.json().await?;

        tracing::debug!(
            movie_id = movie_id,
            has_poster = movie.poster().is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(movie.poster().map(str::to_string))
    }

    async fn poster_by_title(&self, title: &str) -> AppResult<Option<String>> {
        let url = format!("{}/search/movie", self.api_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("query", title)])
            .send()
            .await?;

        let search: TmdbSearchResponse = Self::check_status(response).await?.json().await?;

        tracing::debug!(
            query = %title,
            results = search.results.len(),
            provider = "tmdb",
            "Title search completed"
        );

        Ok(search.first_poster().map(str::to_string))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
