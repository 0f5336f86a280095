use std::collections::BTreeSet;
use std::sync::Arc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::Movie,
};

/// Coarse genre labels offered for browsing
pub const GENRE_VOCABULARY: [&str; 8] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Animation",
    "Thriller",
    "Adventure",
];

/// Maximum number of movies returned by a genre filter
pub const MAX_GENRE_RESULTS: usize = 12;

/// Genre lookups over catalog tags
#[derive(Clone)]
pub struct GenreIndex {
    catalog: Arc<Catalog>,
}

impl GenreIndex {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Vocabulary labels that appear in at least one movie's tags, sorted ascending
    pub fn list_genres(&self) -> Vec<&'static str> {
        let mut found = BTreeSet::new();
        for tags in self.catalog.movies().iter().filter_map(|m| m.tags.as_deref()) {
            let tags = tags.to_lowercase();
            for genre in GENRE_VOCABULARY {
                if tags.contains(&genre.to_lowercase()) {
                    found.insert(genre);
                }
            }
        }
        found.into_iter().collect()
    }

    /// First [`MAX_GENRE_RESULTS`] movies whose tags contain `genre`, in catalog order.
    ///
    /// Matching is a case-insensitive substring test, so any text is accepted,
    /// not just vocabulary labels. A blank genre is rejected.
    pub fn filter_by_genre(&self, genre: &str) -> AppResult<Vec<&Movie>> {
        if genre.trim().is_empty() {
            return Err(AppError::InvalidInput("No genre provided".to_string()));
        }

        Ok(self
            .catalog
            .movies()
            .iter()
            .filter(|m| m.has_tag(genre))
            .take(MAX_GENRE_RESULTS)
            .collect())
    }
}
