use serde::Deserialize;

// ============================================================================
// TMDB API Types
// ============================================================================

/// Movie record returned by `GET /movie/{id}` and inside search results.
/// Only the poster path is of interest; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl TmdbMovie {
    /// Returns the poster path when present and non-empty
    pub fn poster(&self) -> Option<&str> {
        self.poster_path.as_deref().filter(|p| !p.trim().is_empty())
    }
}

/// Response from `GET /search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

impl TmdbSearchResponse {
    /// Poster of the first search hit. Later hits are never consulted.
    pub fn first_poster(&self) -> Option<&str> {
        self.results.first().and_then(TmdbMovie::poster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tmdb_movie_deserialization() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "vote_average": 8.2
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.poster(), Some("/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"));
    }

    #[test]
    fn test_tmdb_movie_null_poster() {
        let movie: TmdbMovie = serde_json::from_str(r#"{"poster_path": null}"#).unwrap();
        assert_eq!(movie.poster(), None);

        let movie: TmdbMovie = serde_json::from_str(r#"{"poster_path": ""}"#).unwrap();
        assert_eq!(movie.poster(), None);
    }

    #[test]
    fn test_search_uses_only_first_result() {
        let json = r#"{
            "page": 1,
            "results": [
                {"title": "Obscure", "poster_path": null},
                {"title": "Popular", "poster_path": "/popular.jpg"}
            ]
        }"#;

        let response: TmdbSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_poster(), None);
    }

    #[test]
    fn test_search_missing_results() {
        let response: TmdbSearchResponse = serde_json::from_str(r#"{"page": 1}"#).unwrap();
        assert_eq!(response.first_poster(), None);
    }
}
