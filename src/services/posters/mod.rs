/// Poster resolution with tiered fallbacks
///
/// A poster is looked up first by TMDB ID, then by title search, and finally
/// replaced by a fixed placeholder. Every lookup failure (network error, bad
/// status, malformed body, missing poster, timeout) only moves resolution on to
/// the next tier, so callers always get a usable URL.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::{
    config::Config,
    error::AppResult,
    models::{Movie, MovieCard},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

/// Image shown when no poster can be resolved
pub const PLACEHOLDER_POSTER_URL: &str = "https://images.unsplash.com/photo-1594909122845-11baa439b7bf?q=80&w=500&h=750&auto=format&fit=crop";

/// External poster metadata service
///
/// Both lookups return the service's poster *path* (to be joined with the image
/// base URL), `None` when the record has no poster, or an error when the
/// service could not answer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterSource: Send + Sync {
    /// Poster path of the movie with this ID
    async fn poster_by_id(&self, movie_id: u64) -> AppResult<Option<String>>;

    /// Poster path of the first search hit for this title
    async fn poster_by_title(&self, title: &str) -> AppResult<Option<String>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Outcome of a single lookup tier
#[derive(Debug, Clone, PartialEq)]
pub enum TierOutcome {
    Found(String),
    Miss(String),
}

#[derive(Clone)]
pub struct PosterResolver {
    /// `None` disables lookups, every movie gets the placeholder
    source: Option<Arc<dyn PosterSource>>,
    image_base_url: String,
    timeout: Duration,
}

impl PosterResolver {
    pub fn new(source: Arc<dyn PosterSource>, image_base_url: String, timeout: Duration) -> Self {
        Self {
            source: Some(source),
            image_base_url,
            timeout,
        }
    }

    /// Resolver that never calls out and always returns the placeholder
    pub fn disabled() -> Self {
        Self {
            source: None,
            image_base_url: String::new(),
            timeout: Duration::ZERO,
        }
    }

    /// Builds a TMDB-backed resolver, or a disabled one when no API key is configured
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let Some(api_key) = config.tmdb_api_key.clone() else {
            tracing::warn!("TMDB_API_KEY not set, posters will use the placeholder image");
            return Ok(Self::disabled());
        };

        let client = TmdbClient::new(api_key, config.tmdb_api_url.clone(), config.poster_timeout())?;

        Ok(Self::new(
            Arc::new(client),
            config.tmdb_image_base_url.clone(),
            config.poster_timeout(),
        ))
    }

    /// Resolves a poster URL for a movie. Never fails.
    ///
    /// The title search tier only runs when `title` is non-blank. Results are
    /// not cached; identical calls repeat the full lookup sequence.
    #[instrument(skip(self))]
    pub async fn resolve(&self, movie_id: u64, title: Option<&str>) -> String {
        let Some(source) = self.source.as_ref() else {
            return PLACEHOLDER_POSTER_URL.to_string();
        };

        match self.attempt(source.poster_by_id(movie_id)).await {
            TierOutcome::Found(url) => return url,
            TierOutcome::Miss(reason) => {
                tracing::debug!(source = source.name(), reason = %reason, "Poster lookup by ID missed");
            }
        }

        if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
            match self.attempt(source.poster_by_title(title)).await {
                TierOutcome::Found(url) => return url,
                TierOutcome::Miss(reason) => {
                    tracing::debug!(source = source.name(), reason = %reason, "Poster lookup by title missed");
                }
            }
        }

        PLACEHOLDER_POSTER_URL.to_string()
    }

    /// Resolves a card for one movie
    pub async fn card(&self, movie: &Movie) -> MovieCard {
        MovieCard {
            title: movie.title.clone(),
            poster_url: self.resolve(movie.id, Some(&movie.title)).await,
        }
    }

    /// Resolves cards for several movies concurrently.
    ///
    /// Output order always matches input order, regardless of which lookups
    /// finish first.
    pub async fn cards(&self, movies: &[&Movie]) -> Vec<MovieCard> {
        let mut tasks = Vec::with_capacity(movies.len());

        for movie in movies {
            let resolver = self.clone();
            let movie_id = movie.id;
            let title = movie.title.clone();
            let task = tokio::spawn(async move {
                let poster_url = resolver.resolve(movie_id, Some(&title)).await;
                MovieCard { title, poster_url }
            });
            tasks.push((movie.title.clone(), task));
        }

        let mut cards = Vec::with_capacity(tasks.len());
        for (title, task) in tasks {
            match task.await {
                Ok(card) => cards.push(card),
                Err(e) => {
                    tracing::error!(error = %e, title = %title, "Poster task join error");
                    cards.push(MovieCard {
                        title,
                        poster_url: PLACEHOLDER_POSTER_URL.to_string(),
                    });
                }
            }
        }

        cards
    }

    /// Runs one lookup tier under the per-attempt timeout
    async fn attempt<F>(&self, lookup: F) -> TierOutcome
    where
        F: Future<Output = AppResult<Option<String>>>,
    {
        match tokio::time::timeout(self.timeout, lookup).await {
            Ok(Ok(Some(path))) if !path.trim().is_empty() => {
                TierOutcome::Found(self.image_url(&path))
            }
            Ok(Ok(_)) => TierOutcome::Miss("no poster in response".to_string()),
            Ok(Err(e)) => TierOutcome::Miss(e.to_string()),
            Err(_) => TierOutcome::Miss(format!("timed out after {:?}", self.timeout)),
        }
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url, poster_path)
    }
}
