use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod tmdb;

pub use tmdb::{TmdbMovie, TmdbSearchResponse};

/// A recommendable movie as stored in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// TMDB movie ID, used for poster lookups
    #[serde(alias = "movie_id")]
    pub id: u64,
    /// Display title, also the lookup key for recommendations
    pub title: String,
    /// Free-text genre/keyword description
    #[serde(default)]
    pub tags: Option<String>,
}

impl Movie {
    pub fn new(id: u64, title: impl Into<String>, tags: Option<&str>) -> Self {
        Self {
            id,
            title: title.into(),
            tags: tags.map(str::to_string),
        }
    }

    /// Case-insensitive substring test against the tags field.
    /// Movies without tags never match.
    pub fn has_tag(&self, needle: &str) -> bool {
        self.tags
            .as_deref()
            .map(|tags| tags.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }
}

// ============================================================================
// Response Types
// ============================================================================

/// A movie paired with its resolved poster image
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub poster_url: String,
}

/// Response for the recommendation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub searched_movie: MovieCard,
    /// Most similar movies first, at most ten
    pub recommendations: Vec<MovieCard>,
}

/// Response for the genre filter endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct GenreMoviesResponse {
    pub movies: Vec<MovieCard>,
}

/// Response for the home page data endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub genres: Vec<String>,
    /// Every catalog title, sorted ascending for the search dropdown
    pub movies: Vec<String>,
    pub trending: Vec<MovieCard>,
}

/// Catalog summary reported by the health endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogStatus {
    pub source: String,
    pub movies: usize,
    pub loaded_at: DateTime<Utc>,
}
