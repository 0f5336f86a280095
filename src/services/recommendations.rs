use std::sync::Arc;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::Movie,
};

/// Maximum number of recommendations returned for a title
pub const MAX_RECOMMENDATIONS: usize = 10;

/// Ranks catalog movies by precomputed similarity to a selected title
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Returns up to [`MAX_RECOMMENDATIONS`] movies most similar to `title`.
    ///
    /// `title` must match a catalog title exactly. Candidates are ordered by
    /// descending similarity; equal scores keep catalog order. The movie
    /// itself is never included.
    ///
    /// Returns `AppError::NotFound` when the title is unknown, so callers can
    /// tell it apart from a known title with nothing to recommend.
    pub fn recommend(&self, title: &str) -> AppResult<Vec<&Movie>> {
        let idx = self
            .catalog
            .position(title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' not found", title)))?;

        let row = self
            .catalog
            .similarity_row(idx)
            .filter(|row| !row.is_empty())
            .ok_or_else(|| {
                AppError::NotFound(format!("No similarity data for movie '{}'", title))
            })?;

        let mut scores: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(j, _)| *j != idx)
            .collect();

        // sort_by is stable, so ties stay in catalog order
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));

        let movies = scores
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .filter_map(|(j, _)| self.catalog.get(j))
            .collect();

        Ok(movies)
    }
}
